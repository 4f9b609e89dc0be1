//! Rotation group properties

use std::collections::HashSet;

use blockout_pit::core::{compose, rotate, standard_shapes, Coord, Orientation};
use blockout_pit::types::Axis;

const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

fn sample_offsets() -> Vec<Coord> {
    let mut offsets = Vec::new();
    for x in -2..=2 {
        for y in -2..=2 {
            for z in -2..=2 {
                offsets.push(Coord::new(x, y, z));
            }
        }
    }
    offsets
}

#[test]
fn four_quarter_turns_restore_every_offset() {
    for axis in AXES {
        for sign in [1, -1] {
            let turn = Orientation::quarter_turn(axis, sign);
            for offset in sample_offsets() {
                let mut v = offset;
                for _ in 0..4 {
                    v = rotate(v, turn);
                }
                assert_eq!(v, offset, "axis {axis:?} sign {sign}");
            }
        }
    }
}

#[test]
fn rotations_preserve_length() {
    let norm = |c: Coord| c.x * c.x + c.y * c.y + c.z * c.z;
    for o in Orientation::all() {
        for offset in sample_offsets() {
            assert_eq!(norm(rotate(offset, o)), norm(offset));
        }
    }
}

#[test]
fn compose_matches_sequential_rotation() {
    for a in Orientation::all() {
        for b in Orientation::all() {
            let ab = compose(a, b);
            for offset in sample_offsets() {
                assert_eq!(rotate(offset, ab), rotate(rotate(offset, a), b));
            }
        }
    }
}

#[test]
fn compose_is_associative() {
    for a in Orientation::all() {
        for b in Orientation::all() {
            for c in Orientation::all() {
                assert_eq!(compose(compose(a, b), c), compose(a, compose(b, c)));
            }
        }
    }
}

#[test]
fn every_orientation_has_an_inverse() {
    for a in Orientation::all() {
        assert!(Orientation::all().any(|b| compose(a, b) == Orientation::IDENTITY));
    }
}

#[test]
fn standard_shapes_stay_distinct_in_every_orientation() {
    for shape in standard_shapes() {
        for o in Orientation::all() {
            let cells: HashSet<Coord> = shape.offsets().iter().map(|&c| rotate(c, o)).collect();
            assert_eq!(cells.len(), shape.len(), "{} in {:?}", shape.name(), o);
        }
    }
}
