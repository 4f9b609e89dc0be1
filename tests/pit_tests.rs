//! Pit grid placement and clearing

use std::sync::Arc;

use blockout_pit::core::{standard_shapes, Coord, Orientation, Pit, Polycube};
use blockout_pit::types::{CellContent, Rgb};

const STONE: CellContent = CellContent {
    color: Rgb::new(90, 90, 90),
};
const MARK: CellContent = CellContent {
    color: Rgb::new(250, 0, 0),
};

fn fill_layer(pit: &mut Pit, z: i32) {
    for y in 0..pit.depth() {
        for x in 0..pit.width() {
            pit.set(x, y, z, Some(STONE));
        }
    }
}

#[test]
fn can_place_matches_bounds_rule_on_empty_pits() {
    for (w, d, h) in [(3u8, 3u8, 6u8), (5, 5, 12), (6, 4, 10)] {
        let pit = Pit::new(w, d, h);
        let (w, d, h) = (w as i32, d as i32, h as i32);
        for shape in standard_shapes() {
            let shape = Arc::new(shape);
            for o in Orientation::all().step_by(5) {
                for x in -2..=w + 1 {
                    for y in -2..=d + 1 {
                        for z in [-1, 0, h - 2, h - 1, h] {
                            let mut piece = Polycube::new(Arc::clone(&shape));
                            piece.orientation = o;
                            piece.position = Coord::new(x, y, z);
                            let expected = piece.world_cells().iter().all(|c| {
                                c.x >= 0
                                    && c.x < w
                                    && c.y >= 0
                                    && c.y < d
                                    && c.z >= 0
                                    && (c.z < h || z >= h - 1)
                            });
                            assert_eq!(
                                pit.can_place(&piece),
                                expected,
                                "{} at ({x},{y},{z}) {:?}",
                                piece.name(),
                                o
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn cascade_removes_two_separate_layers() {
    let mut pit = Pit::new(5, 5, 10);
    fill_layer(&mut pit, 2);
    fill_layer(&mut pit, 4);
    pit.set(0, 0, 3, Some(MARK));
    for z in 5..10 {
        pit.set(1, 1, z, Some(MARK));
    }

    assert_eq!(pit.check_and_clear_layers(), 2);

    assert!(pit.is_occupied(0, 0, 2));
    for z in 3..8 {
        assert!(pit.is_occupied(1, 1, z), "z={z}");
    }
    for z in 8..10 {
        for y in 0..5 {
            for x in 0..5 {
                assert!(!pit.is_occupied(x, y, z));
            }
        }
    }
    assert_eq!(pit.occupied_count(), 6);
}

#[test]
fn second_scan_clears_nothing() {
    let mut pit = Pit::new(4, 4, 8);
    fill_layer(&mut pit, 0);
    fill_layer(&mut pit, 1);
    pit.set(2, 2, 2, Some(MARK));
    assert_eq!(pit.check_and_clear_layers(), 2);
    assert_eq!(pit.check_and_clear_layers(), 0);
}

#[test]
fn lock_then_clear_keeps_cells_unique() {
    let mut pit = Pit::new(5, 5, 15);
    for shape in standard_shapes() {
        let mut piece = Polycube::new(Arc::new(shape));
        piece.position = Coord::new(1, 1, 14);
        let distance = pit.drop_distance(&piece);
        piece.translate(0, 0, -distance);
        if pit.can_place(&piece) {
            let written = pit.lock(&piece);
            assert!(written.iter().all(|c| pit.is_occupied(c.x, c.y, c.z)));
        }
        pit.check_and_clear_layers();
    }
    let cells: Vec<_> = pit.occupied_cells().map(|(c, _)| c).collect();
    let unique: std::collections::HashSet<_> = cells.iter().collect();
    assert_eq!(unique.len(), cells.len());
    assert_eq!(cells.len(), pit.occupied_count());
}
