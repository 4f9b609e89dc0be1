//! Pieces module - polycube shape definitions and the rotation kick search
//!
//! A [`Shape`] is an immutable template: a set of unique, face-connected
//! integer offsets plus a color. Shapes are validated once when built and
//! shared between piece instances through `Arc`.

use std::collections::HashSet;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::error::{CatalogError, ShapeError};
use crate::geometry::Coord;
use crate::polycube::Polycube;
use crate::types::{Axis, Rgb, MAX_SHAPE_CELLS};

/// Relative offsets of one shape
pub type ShapeCells = ArrayVec<Coord, MAX_SHAPE_CELLS>;

/// Immutable polycube template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    offsets: ShapeCells,
    color: Rgb,
    special: bool,
    unlock_level: u32,
}

impl Shape {
    /// Build and validate a shape
    ///
    /// Offsets must be non-empty, unique, face-connected and at most
    /// [`MAX_SHAPE_CELLS`] long. New shapes unlock at level 1.
    pub fn new(name: impl Into<String>, offsets: &[Coord], color: Rgb) -> Result<Self, ShapeError> {
        let name = name.into();
        if offsets.is_empty() {
            return Err(ShapeError::Empty(name));
        }
        if offsets.len() > MAX_SHAPE_CELLS {
            return Err(ShapeError::TooManyCells {
                name,
                count: offsets.len(),
                max: MAX_SHAPE_CELLS,
            });
        }

        let mut seen = HashSet::with_capacity(offsets.len());
        for &offset in offsets {
            if !seen.insert(offset) {
                return Err(ShapeError::DuplicateOffset { name, offset });
            }
        }

        if !is_face_connected(offsets) {
            return Err(ShapeError::Disconnected(name));
        }

        Ok(Self::trusted(name, offsets, color, 1))
    }

    fn trusted(name: impl Into<String>, offsets: &[Coord], color: Rgb, unlock_level: u32) -> Self {
        Self {
            name: name.into(),
            offsets: offsets.iter().copied().collect(),
            color,
            special: false,
            unlock_level,
        }
    }

    /// Mark as the dedicated special shape
    pub fn into_special(mut self) -> Self {
        self.special = true;
        self
    }

    /// Set the level at which the randomizer starts handing this shape out
    pub fn unlocked_at(mut self, level: u32) -> Self {
        self.unlock_level = level.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offsets(&self) -> &[Coord] {
        &self.offsets
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_special(&self) -> bool {
        self.special
    }

    pub fn unlock_level(&self) -> u32 {
        self.unlock_level
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

fn is_face_connected(offsets: &[Coord]) -> bool {
    let cells: HashSet<Coord> = offsets.iter().copied().collect();
    let mut visited = HashSet::with_capacity(cells.len());
    let mut stack = vec![offsets[0]];
    visited.insert(offsets[0]);

    while let Some(c) = stack.pop() {
        for n in [
            c.offset(1, 0, 0),
            c.offset(-1, 0, 0),
            c.offset(0, 1, 0),
            c.offset(0, -1, 0),
            c.offset(0, 0, 1),
            c.offset(0, 0, -1),
        ] {
            if cells.contains(&n) && visited.insert(n) {
                stack.push(n);
            }
        }
    }

    visited.len() == cells.len()
}

const fn c(x: i32, y: i32, z: i32) -> Coord {
    Coord::new(x, y, z)
}

/// Default catalog: (name, offsets, color, unlock level)
const STANDARD_SHAPES: [(&str, &[Coord], Rgb, u32); 11] = [
    ("domino", &[c(0, 0, 0), c(1, 0, 0)], Rgb::new(0x4f, 0xc3, 0xf7), 1),
    ("bar3", &[c(-1, 0, 0), c(0, 0, 0), c(1, 0, 0)], Rgb::new(0x81, 0xc7, 0x84), 1),
    ("corner3", &[c(0, 0, 0), c(1, 0, 0), c(0, 1, 0)], Rgb::new(0xff, 0xb7, 0x4d), 1),
    (
        "square",
        &[c(0, 0, 0), c(1, 0, 0), c(0, 1, 0), c(1, 1, 0)],
        Rgb::new(0xff, 0xf1, 0x76),
        1,
    ),
    (
        "tee",
        &[c(-1, 0, 0), c(0, 0, 0), c(1, 0, 0), c(0, 1, 0)],
        Rgb::new(0xba, 0x68, 0xc8),
        1,
    ),
    (
        "bar4",
        &[c(-1, 0, 0), c(0, 0, 0), c(1, 0, 0), c(2, 0, 0)],
        Rgb::new(0x00, 0xbc, 0xd4),
        2,
    ),
    (
        "ell",
        &[c(-1, 0, 0), c(0, 0, 0), c(1, 0, 0), c(1, 1, 0)],
        Rgb::new(0xff, 0x98, 0x00),
        3,
    ),
    (
        "zed",
        &[c(-1, 0, 0), c(0, 0, 0), c(0, 1, 0), c(1, 1, 0)],
        Rgb::new(0xe5, 0x39, 0x35),
        4,
    ),
    (
        "tripod",
        &[c(0, 0, 0), c(1, 0, 0), c(0, 1, 0), c(0, 0, 1)],
        Rgb::new(0x3f, 0x51, 0xb5),
        5,
    ),
    (
        "twist",
        &[c(0, 0, 0), c(1, 0, 0), c(0, 1, 0), c(0, 1, 1)],
        Rgb::new(0x8d, 0x6e, 0x63),
        6,
    ),
    (
        "cube",
        &[
            c(0, 0, 0),
            c(1, 0, 0),
            c(0, 1, 0),
            c(1, 1, 0),
            c(0, 0, 1),
            c(1, 0, 1),
            c(0, 1, 1),
            c(1, 1, 1),
        ],
        Rgb::new(0x90, 0xa4, 0xae),
        7,
    ),
];

/// Name of the standard special shape
pub const SPECIAL_SHAPE_NAME: &str = "special";

/// Gold
pub const SPECIAL_COLOR: Rgb = Rgb::new(0xff, 0xd7, 0x00);

/// The standard shapes, unvalidated copies for building custom catalogs
pub fn standard_shapes() -> Vec<Shape> {
    let mut shapes: Vec<Shape> = STANDARD_SHAPES
        .iter()
        .map(|&(name, offsets, color, level)| Shape::trusted(name, offsets, color, level))
        .collect();
    shapes.push(Shape::trusted(SPECIAL_SHAPE_NAME, &[Coord::ZERO], SPECIAL_COLOR, 1).into_special());
    shapes
}

/// Look up one standard shape by name
pub fn standard_shape(name: &str) -> Option<Shape> {
    standard_shapes().into_iter().find(|s| s.name() == name)
}

/// The set of shapes a session may hand out
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<Arc<Shape>>,
}

impl ShapeCatalog {
    /// Build a catalog from validated shapes
    ///
    /// Names must be unique and at least one regular (non-special) shape
    /// must be available at level 1.
    pub fn new(shapes: Vec<Shape>) -> Result<Self, CatalogError> {
        let mut names = HashSet::with_capacity(shapes.len());
        for shape in &shapes {
            if !names.insert(shape.name()) {
                return Err(CatalogError::DuplicateName(shape.name().to_string()));
            }
        }
        if !shapes.iter().any(|s| !s.is_special() && s.unlock_level() <= 1) {
            return Err(CatalogError::NothingUnlocked);
        }
        Ok(Self {
            shapes: shapes.into_iter().map(Arc::new).collect(),
        })
    }

    /// The standard eleven shapes plus the gold special cube
    pub fn standard() -> Self {
        Self {
            shapes: standard_shapes().into_iter().map(Arc::new).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Shape>> {
        self.shapes.iter().find(|s| s.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Shape>> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Regular shapes available at `level`
    pub fn unlocked_at(&self, level: u32) -> impl Iterator<Item = &Arc<Shape>> {
        self.shapes
            .iter()
            .filter(move |s| !s.is_special() && s.unlock_level() <= level)
    }

    /// The dedicated special shape, if the catalog has one
    pub fn special_shape(&self) -> Option<&Arc<Shape>> {
        self.shapes.iter().find(|s| s.is_special())
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rotation kick offsets, tried in order until one fits
///
/// No offset, the six unit axis offsets, horizontal diagonals, vertical
/// diagonals, then double-unit axis offsets.
pub const KICK_OFFSETS: [Coord; 25] = [
    c(0, 0, 0),
    // unit axis
    c(1, 0, 0),
    c(-1, 0, 0),
    c(0, 1, 0),
    c(0, -1, 0),
    c(0, 0, 1),
    c(0, 0, -1),
    // horizontal diagonals
    c(1, 1, 0),
    c(1, -1, 0),
    c(-1, 1, 0),
    c(-1, -1, 0),
    // vertical diagonals
    c(1, 0, 1),
    c(-1, 0, 1),
    c(0, 1, 1),
    c(0, -1, 1),
    c(1, 0, -1),
    c(-1, 0, -1),
    c(0, 1, -1),
    c(0, -1, -1),
    // double-unit axis
    c(2, 0, 0),
    c(-2, 0, 0),
    c(0, 2, 0),
    c(0, -2, 0),
    c(0, 0, 2),
    c(0, 0, -2),
];

/// Try to rotate a piece with kicks
///
/// Returns the rotated (and possibly shifted) piece plus the kick that was
/// used, or `None` if no kick offset yields a placement accepted by `fits`.
/// Zero net turns is rejected.
pub fn try_rotate(
    piece: &Polycube,
    axis: Axis,
    turns: i8,
    fits: impl Fn(&Polycube) -> bool,
) -> Option<(Polycube, Coord)> {
    if turns.rem_euclid(4) == 0 {
        return None;
    }

    let mut rotated = piece.clone();
    rotated.orientation = piece.orientation.turned(axis, turns);
    let origin = piece.position;

    for kick in KICK_OFFSETS {
        rotated.position = origin + kick;
        if fits(&rotated) {
            return Some((rotated, kick));
        }
    }

    None
}
