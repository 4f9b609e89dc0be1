//! Active piece instance - a shape placed at a pose
//!
//! Mutators here never look at the pit. Validation is the pit's job; the
//! session clones a piece, mutates the clone, and only commits it after
//! [`crate::Pit::can_place`] accepts it.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::geometry::{compose, Coord, Orientation, Pose};
use crate::pieces::Shape;
use crate::types::{Axis, Rgb, MAX_SHAPE_CELLS};

/// World cells of one piece
pub type PieceCells = ArrayVec<Coord, MAX_SHAPE_CELLS>;

#[derive(Debug, Clone, PartialEq)]
pub struct Polycube {
    shape: Arc<Shape>,
    pub position: Coord,
    pub orientation: Orientation,
    special: bool,
}

impl Polycube {
    /// New piece at the origin in the identity orientation
    pub fn new(shape: Arc<Shape>) -> Self {
        let special = shape.is_special();
        Self {
            shape,
            position: Coord::ZERO,
            orientation: Orientation::IDENTITY,
            special,
        }
    }

    /// Same piece flagged as a special block
    pub fn into_special(mut self) -> Self {
        self.special = true;
        self
    }

    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    pub fn name(&self) -> &str {
        self.shape.name()
    }

    pub fn color(&self) -> Rgb {
        self.shape.color()
    }

    pub fn is_special(&self) -> bool {
        self.special
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
    }

    /// Rotated and translated cells
    pub fn world_cells(&self) -> PieceCells {
        let pose = self.pose();
        self.shape.offsets().iter().map(|&o| pose.place(o)).collect()
    }

    /// Lowest world z of any cell
    pub fn lowest_z(&self) -> i32 {
        self.world_cells()
            .iter()
            .map(|c| c.z)
            .min()
            .unwrap_or(self.position.z)
    }

    pub fn translate(&mut self, dx: i32, dy: i32, dz: i32) {
        self.position = self.position.offset(dx, dy, dz);
    }

    /// Compose one 90° turn about `axis` onto the current orientation
    pub fn apply_quarter_turn(&mut self, axis: Axis, sign: i8) {
        self.orientation = compose(self.orientation, Orientation::quarter_turn(axis, sign));
    }

    /// Copy translated by a delta, `None` if the position would overflow
    pub fn translated(&self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        let position = self.position.checked_offset(dx, dy, dz)?;
        Some(Self {
            position,
            ..self.clone()
        })
    }
}
