//! Geometry kernel - integer coordinates and the 24 cube rotations
//!
//! Orientations are stored as an index into a table of signed permutation
//! matrices with determinant +1, built at compile time. Every rotation is a
//! composition of 90° turns, so rotating an integer offset always yields an
//! exact integer offset and no rounding is ever needed.

use std::ops::{Add, Neg, Sub};

use crate::types::Axis;

/// Integer cell coordinate or relative offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const ZERO: Coord = Coord::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Translate by a delta
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Translate by a delta, `None` if any axis overflows
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    fn component(&self, i: usize) -> i32 {
        match i {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Coord::new(x, y, z)
    }
}

/// Row-major 3x3 rotation matrix
type Matrix = [[i8; 3]; 3];

/// Number of proper rotations of the cube
pub const ORIENTATION_COUNT: usize = 24;

const fn determinant(m: &Matrix) -> i32 {
    let a = m[0][0] as i32 * (m[1][1] as i32 * m[2][2] as i32 - m[1][2] as i32 * m[2][1] as i32);
    let b = m[0][1] as i32 * (m[1][0] as i32 * m[2][2] as i32 - m[1][2] as i32 * m[2][0] as i32);
    let c = m[0][2] as i32 * (m[1][0] as i32 * m[2][1] as i32 - m[1][1] as i32 * m[2][0] as i32);
    a - b + c
}

const fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    let mut out = [[0i8; 3]; 3];
    let mut r = 0;
    while r < 3 {
        let mut c = 0;
        while c < 3 {
            let mut k = 0;
            let mut sum = 0i8;
            while k < 3 {
                sum += a[r][k] * b[k][c];
                k += 1;
            }
            out[r][c] = sum;
            c += 1;
        }
        r += 1;
    }
    out
}

const fn matrices_equal(a: &Matrix, b: &Matrix) -> bool {
    let mut r = 0;
    while r < 3 {
        let mut c = 0;
        while c < 3 {
            if a[r][c] != b[r][c] {
                return false;
            }
            c += 1;
        }
        r += 1;
    }
    true
}

/// Enumerate signed permutation matrices with det +1; identity lands at index 0
const fn build_rotations() -> [Matrix; ORIENTATION_COUNT] {
    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut out = [[[0i8; 3]; 3]; ORIENTATION_COUNT];
    let mut n = 0;
    let mut p = 0;
    while p < PERMUTATIONS.len() {
        let mut signs: usize = 0;
        while signs < 8 {
            let mut m = [[0i8; 3]; 3];
            let mut row = 0;
            while row < 3 {
                m[row][PERMUTATIONS[p][row]] = if (signs >> row) & 1 == 1 { -1 } else { 1 };
                row += 1;
            }
            if determinant(&m) == 1 {
                out[n] = m;
                n += 1;
            }
            signs += 1;
        }
        p += 1;
    }
    assert!(n == ORIENTATION_COUNT);
    out
}

const fn index_of(m: &Matrix) -> u8 {
    let mut i = 0;
    while i < ORIENTATION_COUNT {
        if matrices_equal(&ROTATIONS[i], m) {
            return i as u8;
        }
        i += 1;
    }
    panic!("matrix is not a proper cube rotation");
}

/// `COMPOSITION[a][b]` = orientation of applying `b` after `a` (`M_b * M_a`)
const fn build_composition() -> [[u8; ORIENTATION_COUNT]; ORIENTATION_COUNT] {
    let mut out = [[0u8; ORIENTATION_COUNT]; ORIENTATION_COUNT];
    let mut a = 0;
    while a < ORIENTATION_COUNT {
        let mut b = 0;
        while b < ORIENTATION_COUNT {
            out[a][b] = index_of(&multiply(&ROTATIONS[b], &ROTATIONS[a]));
            b += 1;
        }
        a += 1;
    }
    out
}

/// Positive (right-handed) quarter turns about X, Y, Z
const QUARTER_TURN_MATRICES: [Matrix; 3] = [
    [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
    [[0, 0, 1], [0, 1, 0], [-1, 0, 0]],
    [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
];

const fn transpose(m: &Matrix) -> Matrix {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

const ROTATIONS: [Matrix; ORIENTATION_COUNT] = build_rotations();
const COMPOSITION: [[u8; ORIENTATION_COUNT]; ORIENTATION_COUNT] = build_composition();

/// `[axis][0]` = positive quarter turn, `[axis][1]` = negative quarter turn
const QUARTER_TURNS: [[u8; 2]; 3] = [
    [
        index_of(&QUARTER_TURN_MATRICES[0]),
        index_of(&transpose(&QUARTER_TURN_MATRICES[0])),
    ],
    [
        index_of(&QUARTER_TURN_MATRICES[1]),
        index_of(&transpose(&QUARTER_TURN_MATRICES[1])),
    ],
    [
        index_of(&QUARTER_TURN_MATRICES[2]),
        index_of(&transpose(&QUARTER_TURN_MATRICES[2])),
    ],
];

/// One of the 24 proper rotations of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation(u8);

impl Orientation {
    pub const IDENTITY: Orientation = Orientation(0);

    /// All 24 orientations, identity first
    pub fn all() -> impl Iterator<Item = Orientation> {
        (0..ORIENTATION_COUNT as u8).map(Orientation)
    }

    /// Table index in `0..24`
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// A single 90° turn about `axis`; `sign >= 0` is the positive direction
    pub fn quarter_turn(axis: Axis, sign: i8) -> Self {
        let dir = if sign >= 0 { 0 } else { 1 };
        Orientation(QUARTER_TURNS[axis.index()][dir])
    }

    /// This orientation followed by `turns` quarter turns about `axis`
    pub fn turned(self, axis: Axis, turns: i8) -> Self {
        let steps = turns.rem_euclid(4);
        let step = Self::quarter_turn(axis, 1);
        (0..steps).fold(self, |acc, _| compose(acc, step))
    }
}

/// Rotate an integer offset by `orientation`
pub fn rotate(offset: Coord, orientation: Orientation) -> Coord {
    let m = &ROTATIONS[orientation.0 as usize];
    let row = |r: usize| (0..3).map(|c| m[r][c] as i32 * offset.component(c)).sum::<i32>();
    Coord::new(row(0), row(1), row(2))
}

/// Orientation equivalent to applying `b` after `a`
pub fn compose(a: Orientation, b: Orientation) -> Orientation {
    Orientation(COMPOSITION[a.0 as usize][b.0 as usize])
}

/// Position plus orientation of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pose {
    pub position: Coord,
    pub orientation: Orientation,
}

impl Pose {
    pub fn new(position: Coord, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// World cell of a shape offset placed at this pose
    pub fn place(&self, offset: Coord) -> Coord {
        rotate(offset, self.orientation) + self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [Coord; 4] = [
        Coord::new(1, 0, 0),
        Coord::new(0, 2, 0),
        Coord::new(-1, 1, 3),
        Coord::new(2, -3, 1),
    ];

    #[test]
    fn identity_is_index_zero() {
        assert_eq!(ROTATIONS[0], [[1, 0, 0], [0, 1, 0], [0, 0, 1]]);
        for v in SAMPLE {
            assert_eq!(rotate(v, Orientation::IDENTITY), v);
        }
    }

    #[test]
    fn checked_offset_detects_overflow() {
        let c = Coord::new(2, 2, 14);
        assert_eq!(c.checked_offset(1, -2, 3), Some(Coord::new(3, 0, 17)));
        assert_eq!(c.checked_offset(i32::MAX, 0, 0), None);
        assert_eq!(c.checked_offset(0, 0, i32::MAX), None);
        assert_eq!(Coord::new(0, -1, 0).checked_offset(0, i32::MIN, 0), None);
    }

    #[test]
    fn all_orientations_are_distinct() {
        for a in 0..ORIENTATION_COUNT {
            for b in (a + 1)..ORIENTATION_COUNT {
                assert_ne!(ROTATIONS[a], ROTATIONS[b]);
            }
        }
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let r = Orientation::quarter_turn(Axis::Z, 1);
        assert_eq!(rotate(Coord::new(1, 0, 0), r), Coord::new(0, 1, 0));
        assert_eq!(rotate(Coord::new(0, 1, 0), r), Coord::new(-1, 0, 0));
        assert_eq!(rotate(Coord::new(0, 0, 1), r), Coord::new(0, 0, 1));
    }

    #[test]
    fn quarter_turn_about_x_maps_y_to_z() {
        let r = Orientation::quarter_turn(Axis::X, 1);
        assert_eq!(rotate(Coord::new(0, 1, 0), r), Coord::new(0, 0, 1));
    }

    #[test]
    fn quarter_turn_about_y_maps_z_to_x() {
        let r = Orientation::quarter_turn(Axis::Y, 1);
        assert_eq!(rotate(Coord::new(0, 0, 1), r), Coord::new(1, 0, 0));
    }

    #[test]
    fn four_quarter_turns_return_every_offset() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for sign in [1, -1] {
                let step = Orientation::quarter_turn(axis, sign);
                let mut o = Orientation::IDENTITY;
                for _ in 0..4 {
                    o = compose(o, step);
                }
                assert_eq!(o, Orientation::IDENTITY);
                for v in SAMPLE {
                    let mut w = v;
                    for _ in 0..4 {
                        w = rotate(w, step);
                    }
                    assert_eq!(w, v);
                }
            }
        }
    }

    #[test]
    fn opposite_turns_cancel() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let o = compose(
                Orientation::quarter_turn(axis, 1),
                Orientation::quarter_turn(axis, -1),
            );
            assert_eq!(o, Orientation::IDENTITY);
        }
    }

    #[test]
    fn compose_applies_b_after_a() {
        let a = Orientation::quarter_turn(Axis::X, 1);
        let b = Orientation::quarter_turn(Axis::Z, 1);
        let ab = compose(a, b);
        for v in SAMPLE {
            assert_eq!(rotate(v, ab), rotate(rotate(v, a), b));
        }
    }

    #[test]
    fn quarter_turns_generate_all_orientations() {
        let mut seen = [false; ORIENTATION_COUNT];
        let mut frontier = vec![Orientation::IDENTITY];
        seen[0] = true;
        while let Some(o) = frontier.pop() {
            for axis in [Axis::X, Axis::Y, Axis::Z] {
                let next = compose(o, Orientation::quarter_turn(axis, 1));
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    frontier.push(next);
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn turned_normalizes_negative_turns() {
        let o = Orientation::IDENTITY;
        assert_eq!(o.turned(Axis::Y, -1), Orientation::quarter_turn(Axis::Y, -1));
        assert_eq!(o.turned(Axis::Y, 4), o);
    }

    #[test]
    fn pose_places_rotated_offset() {
        let pose = Pose::new(Coord::new(2, 2, 10), Orientation::quarter_turn(Axis::Z, 1));
        assert_eq!(pose.place(Coord::new(1, 0, 0)), Coord::new(2, 3, 10));
    }
}
