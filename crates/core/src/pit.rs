//! Pit module - the 3D occupancy grid
//!
//! The pit is a `width x depth x height` box where each cell is empty or
//! holds one locked cube. Uses a flat vector, layer-major (`z`, then `y`,
//! then `x`), so a whole layer is one contiguous slice and a cascade is a
//! single `copy_within`.
//!
//! Coordinates: `x` in `0..width`, `y` in `0..depth`, `z` in `0..height`
//! with `z = 0` the floor. Pieces spawn with their position at
//! `z = height - 1`.

use arrayvec::ArrayVec;

use crate::geometry::Coord;
use crate::polycube::{PieceCells, Polycube};
use crate::types::{Cell, CellContent};

/// Spawn candidates tried in order: center, then one cell off in ±x and ±y
pub type SpawnCandidates = ArrayVec<Coord, 5>;

#[derive(Debug, Clone, PartialEq)]
pub struct Pit {
    width: usize,
    depth: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Pit {
    /// Create a new empty pit
    pub fn new(width: u8, depth: u8, height: u8) -> Self {
        let (width, depth, height) = (width as usize, depth as usize, height as usize);
        Self {
            width,
            depth,
            height,
            cells: vec![None; width * depth * height],
        }
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn depth(&self) -> i32 {
        self.depth as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Cells per layer
    fn layer_len(&self) -> usize {
        self.width * self.depth
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if !self.in_bounds(x, y, z) {
            return None;
        }
        Some((z as usize * self.depth + y as usize) * self.width + x as usize)
    }

    /// Strict bounds check on all three axes
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        self.in_footprint(x, y) && z >= 0 && z < self.height()
    }

    /// Horizontal bounds only
    pub fn in_footprint(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.depth()
    }

    /// Get cell at `(x, y, z)`; `None` if out of bounds
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Cell> {
        self.index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Set cell at `(x, y, z)`; returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, z: i32, cell: Cell) -> bool {
        match self.index(x, y, z) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.get(x, y, z), Some(Some(_)))
    }

    /// Whether every cell of `piece` is inside the pit and empty
    ///
    /// Cells above the rim (`z >= height`) are tolerated only while the
    /// piece's position sits at or above `height - 1`, i.e. at spawn. Those
    /// cells are not checked for occupancy.
    pub fn can_place(&self, piece: &Polycube) -> bool {
        let above_rim_allowed = piece.position.z >= self.height() - 1;
        piece.world_cells().iter().all(|c| {
            if !self.in_footprint(c.x, c.y) || c.z < 0 {
                return false;
            }
            if c.z >= self.height() {
                return above_rim_allowed;
            }
            !self.is_occupied(c.x, c.y, c.z)
        })
    }

    /// Write the piece's in-pit cells; cells above the rim are dropped
    ///
    /// The caller must have confirmed the pose with [`Pit::can_place`].
    /// Returns the cells actually written.
    pub fn lock(&mut self, piece: &Polycube) -> PieceCells {
        debug_assert!(self.can_place(piece), "lock on an unvalidated pose");
        let content = CellContent {
            color: piece.color(),
        };
        let mut written = PieceCells::new();
        for c in piece.world_cells() {
            if self.set(c.x, c.y, c.z, Some(content)) {
                written.push(c);
            }
        }
        written
    }

    /// Empty specific cells (out-of-bounds coordinates are ignored)
    pub fn remove_cells(&mut self, cells: &[Coord]) {
        for c in cells {
            self.set(c.x, c.y, c.z, None);
        }
    }

    fn layer(&self, z: usize) -> &[Cell] {
        let start = z * self.layer_len();
        &self.cells[start..start + self.layer_len()]
    }

    /// Check if every `(x, y)` of layer `z` is occupied
    pub fn layer_is_full(&self, z: i32) -> bool {
        if z < 0 || z >= self.height() {
            return false;
        }
        self.layer(z as usize).iter().all(|cell| cell.is_some())
    }

    /// Empty layer `z` and shift every layer above it down by one
    ///
    /// The top layer is empty afterwards.
    pub fn clear_layer(&mut self, z: i32) {
        if z < 0 || z >= self.height() {
            return;
        }
        let len = self.layer_len();
        let start = z as usize * len;
        let end = self.cells.len();

        self.cells.copy_within(start + len..end, start);

        for cell in &mut self.cells[end - len..end] {
            *cell = None;
        }
    }

    /// Clear every full layer, cascading, and return how many were cleared
    ///
    /// The scan index is not advanced after a clear, because the layer that
    /// slid down into `z` has to be examined too.
    pub fn check_and_clear_layers(&mut self) -> usize {
        let mut cleared = 0;
        let mut z = 0;
        while z < self.height() {
            if self.layer_is_full(z) {
                self.clear_layer(z);
                cleared += 1;
            } else {
                z += 1;
            }
        }
        cleared
    }

    /// Empty every full row of one color along x or y within a layer
    ///
    /// A cell shared by a crossing x-row and y-row counts for both rows.
    /// Returns the number of rows cleared.
    pub fn clear_same_color_lines(&mut self) -> usize {
        let mut doomed: Vec<Coord> = Vec::new();
        let mut lines = 0;

        for z in 0..self.height() {
            for y in 0..self.depth() {
                let row: Vec<Coord> = (0..self.width()).map(|x| Coord::new(x, y, z)).collect();
                if self.is_uniform_row(&row) {
                    lines += 1;
                    doomed.extend(row);
                }
            }
            for x in 0..self.width() {
                let row: Vec<Coord> = (0..self.depth()).map(|y| Coord::new(x, y, z)).collect();
                if self.is_uniform_row(&row) {
                    lines += 1;
                    doomed.extend(row);
                }
            }
        }

        self.remove_cells(&doomed);
        lines
    }

    fn is_uniform_row(&self, row: &[Coord]) -> bool {
        let mut color = None;
        for c in row {
            match self.get(c.x, c.y, c.z).flatten() {
                None => return false,
                Some(content) => match color {
                    None => color = Some(content.color),
                    Some(first) if first != content.color => return false,
                    Some(_) => {}
                },
            }
        }
        color.is_some()
    }

    /// Whether no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Highest `z` holding any cube
    pub fn highest_occupied_z(&self) -> Option<i32> {
        (0..self.height()).rev().find(|&z| self.layer(z as usize).iter().any(|c| c.is_some()))
    }

    /// Occupied cells with their contents, in layer-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Coord, CellContent)> + '_ {
        let (w, d) = (self.width, self.depth);
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|content| {
                let x = (i % w) as i32;
                let y = ((i / w) % d) as i32;
                let z = (i / (w * d)) as i32;
                (Coord::new(x, y, z), content)
            })
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Spawn positions in priority order for this pit
    pub fn spawn_candidates(&self) -> SpawnCandidates {
        let center = Coord::new((self.width() - 1) / 2, (self.depth() - 1) / 2, self.height() - 1);
        [
            center,
            center.offset(1, 0, 0),
            center.offset(-1, 0, 0),
            center.offset(0, 1, 0),
            center.offset(0, -1, 0),
        ]
        .into_iter()
        .collect()
    }

    /// First spawn position at which `piece` (with its current orientation) fits
    pub fn spawn_position(&self, piece: &Polycube) -> Option<Coord> {
        let mut trial = piece.clone();
        self.spawn_candidates().into_iter().find(|&pos| {
            trial.position = pos;
            self.can_place(&trial)
        })
    }

    /// Whether `next` fits at none of the spawn candidates
    pub fn is_game_over(&self, next: &Polycube) -> bool {
        self.spawn_position(next).is_none()
    }

    /// How many cells `piece` can fall before it would collide
    pub fn drop_distance(&self, piece: &Polycube) -> i32 {
        let mut trial = piece.clone();
        let mut distance = 0;
        loop {
            trial.translate(0, 0, -1);
            if !self.can_place(&trial) {
                return distance;
            }
            distance += 1;
        }
    }

    /// Empty the whole pit
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Get a reference to the flat cell storage (layer-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::standard_shape;
    use crate::types::Rgb;
    use std::sync::Arc;

    const RED: CellContent = CellContent {
        color: Rgb::new(255, 0, 0),
    };
    const BLUE: CellContent = CellContent {
        color: Rgb::new(0, 0, 255),
    };

    fn piece_at(name: &str, x: i32, y: i32, z: i32) -> Polycube {
        let mut p = Polycube::new(Arc::new(standard_shape(name).unwrap()));
        p.position = Coord::new(x, y, z);
        p
    }

    fn fill_layer(pit: &mut Pit, z: i32, content: CellContent) {
        for y in 0..pit.depth() {
            for x in 0..pit.width() {
                pit.set(x, y, z, Some(content));
            }
        }
    }

    #[test]
    fn index_is_layer_major() {
        let pit = Pit::new(5, 4, 3);
        assert_eq!(pit.index(0, 0, 0), Some(0));
        assert_eq!(pit.index(4, 0, 0), Some(4));
        assert_eq!(pit.index(0, 1, 0), Some(5));
        assert_eq!(pit.index(0, 0, 1), Some(20));
        assert_eq!(pit.index(4, 3, 2), Some(59));
        assert_eq!(pit.index(5, 0, 0), None);
        assert_eq!(pit.index(0, 0, -1), None);
    }

    #[test]
    fn can_place_allows_cells_above_rim_at_spawn_height() {
        let mut pit = Pit::new(5, 5, 10);
        assert!(pit.can_place(&piece_at("cube", 2, 2, 9)));
        assert!(pit.can_place(&piece_at("cube", 2, 2, 8)));

        pit.set(3, 3, 9, Some(RED));
        assert!(!pit.can_place(&piece_at("cube", 2, 2, 9)));
    }

    #[test]
    fn can_place_rejects_above_rim_below_spawn_height() {
        let pit = Pit::new(5, 5, 10);
        let bar = Polycube::new(Arc::new(
            crate::pieces::Shape::new(
                "pillar",
                &[Coord::new(0, 0, 0), Coord::new(0, 0, 1), Coord::new(0, 0, 2)],
                RED.color,
            )
            .unwrap(),
        ));
        let mut p = bar.clone();
        p.position = Coord::new(0, 0, 8);
        assert!(!pit.can_place(&p));
        p.position.z = 9;
        assert!(pit.can_place(&p));
    }

    #[test]
    fn can_place_rejects_horizontal_and_floor_violations() {
        let pit = Pit::new(5, 5, 10);
        assert!(!pit.can_place(&piece_at("domino", 4, 0, 0)));
        assert!(!pit.can_place(&piece_at("domino", -1, 0, 0)));
        assert!(!pit.can_place(&piece_at("domino", 0, 5, 0)));
        assert!(!pit.can_place(&piece_at("domino", 0, 0, -1)));
        assert!(pit.can_place(&piece_at("domino", 3, 4, 0)));
    }

    #[test]
    fn can_place_rejects_overlap() {
        let mut pit = Pit::new(5, 5, 10);
        pit.set(1, 0, 0, Some(RED));
        assert!(!pit.can_place(&piece_at("domino", 0, 0, 0)));
        assert!(pit.can_place(&piece_at("domino", 0, 0, 1)));
    }

    #[test]
    fn lock_drops_cells_above_rim() {
        let mut pit = Pit::new(5, 5, 10);
        let cube = piece_at("cube", 0, 0, 9);
        let written = pit.lock(&cube);
        assert_eq!(written.len(), 4);
        assert_eq!(pit.occupied_count(), 4);
        assert!(pit.is_occupied(1, 1, 9));
    }

    #[test]
    fn clear_layer_shifts_everything_above() {
        let mut pit = Pit::new(2, 2, 4);
        fill_layer(&mut pit, 1, RED);
        pit.set(0, 0, 2, Some(BLUE));
        pit.set(1, 1, 3, Some(BLUE));

        pit.clear_layer(1);

        assert_eq!(pit.get(0, 0, 1), Some(Some(BLUE)));
        assert_eq!(pit.get(1, 1, 2), Some(Some(BLUE)));
        assert_eq!(pit.occupied_count(), 2);
        assert!(!pit.is_occupied(1, 1, 3));
    }

    #[test]
    fn cascade_reexamines_slid_down_layer() {
        let mut pit = Pit::new(2, 2, 5);
        fill_layer(&mut pit, 0, RED);
        fill_layer(&mut pit, 1, BLUE);
        pit.set(0, 0, 2, Some(RED));

        assert_eq!(pit.check_and_clear_layers(), 2);
        assert_eq!(pit.occupied_count(), 1);
        assert_eq!(pit.get(0, 0, 0), Some(Some(RED)));
    }

    #[test]
    fn check_and_clear_is_idempotent() {
        let mut pit = Pit::new(3, 3, 6);
        fill_layer(&mut pit, 2, RED);
        pit.set(1, 1, 3, Some(BLUE));
        assert_eq!(pit.check_and_clear_layers(), 1);
        assert_eq!(pit.check_and_clear_layers(), 0);
    }

    #[test]
    fn same_color_lines_clear_rows_only() {
        let mut pit = Pit::new(3, 3, 3);
        for x in 0..3 {
            pit.set(x, 1, 0, Some(RED));
        }
        pit.set(0, 0, 0, Some(BLUE));
        pit.set(1, 0, 0, Some(RED));
        pit.set(2, 0, 0, Some(RED));

        assert_eq!(pit.clear_same_color_lines(), 1);
        assert_eq!(pit.occupied_count(), 3);
        assert!(!pit.is_occupied(1, 1, 0));
    }

    #[test]
    fn crossing_lines_count_twice() {
        let mut pit = Pit::new(3, 3, 2);
        for i in 0..3 {
            pit.set(i, 1, 0, Some(RED));
            pit.set(1, i, 0, Some(RED));
        }
        assert_eq!(pit.clear_same_color_lines(), 2);
        assert!(pit.is_empty());
    }

    #[test]
    fn spawn_candidates_center_then_neighbours() {
        let pit = Pit::new(5, 5, 15);
        let c = pit.spawn_candidates();
        assert_eq!(c[0], Coord::new(2, 2, 14));
        assert_eq!(c[1], Coord::new(3, 2, 14));
        assert_eq!(c[2], Coord::new(1, 2, 14));
        assert_eq!(c[3], Coord::new(2, 3, 14));
        assert_eq!(c[4], Coord::new(2, 1, 14));
    }

    #[test]
    fn spawn_falls_back_to_offset_pose() {
        let mut pit = Pit::new(5, 5, 15);
        pit.set(2, 2, 14, Some(RED));
        let next = piece_at("special", 0, 0, 0);
        assert_eq!(pit.spawn_position(&next), Some(Coord::new(3, 2, 14)));
        assert!(!pit.is_game_over(&next));
    }

    #[test]
    fn game_over_when_every_spawn_pose_blocked() {
        let mut pit = Pit::new(5, 5, 15);
        fill_layer(&mut pit, 14, RED);
        assert!(pit.is_game_over(&piece_at("special", 0, 0, 0)));
    }

    #[test]
    fn drop_distance_stops_on_stack() {
        let mut pit = Pit::new(5, 5, 10);
        pit.set(2, 2, 3, Some(RED));
        assert_eq!(pit.drop_distance(&piece_at("special", 2, 2, 9)), 5);
        assert_eq!(pit.drop_distance(&piece_at("special", 0, 0, 9)), 9);
    }

    #[test]
    fn highest_occupied_and_reset() {
        let mut pit = Pit::new(3, 3, 5);
        assert_eq!(pit.highest_occupied_z(), None);
        pit.set(0, 0, 3, Some(RED));
        pit.set(1, 1, 1, Some(RED));
        assert_eq!(pit.highest_occupied_z(), Some(3));
        pit.reset();
        assert!(pit.is_empty());
    }

    #[test]
    fn occupied_cells_report_coordinates() {
        let mut pit = Pit::new(3, 4, 5);
        pit.set(2, 3, 4, Some(BLUE));
        let cells: Vec<_> = pit.occupied_cells().collect();
        assert_eq!(cells, vec![(Coord::new(2, 3, 4), BLUE)]);
    }
}
