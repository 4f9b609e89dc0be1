//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the pit engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, rendering, audio, input mapping).
//!
//! # Pit Dimensions
//!
//! The pit is a `width x depth x height` box of unit cells:
//!
//! - **x**: `0..width` (left to right)
//! - **y**: `0..depth` (front to back)
//! - **z**: `0..height` (floor to rim; pieces fall towards `z = 0`)
//!
//! Default pit is 5x5x15.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested host timestep (~60 FPS) |
//! | `DEFAULT_FALL_INTERVAL_MS` | 1000 | Automatic fall interval at level 1 |
//! | `DEFAULT_MIN_FALL_INTERVAL_MS` | 100 | Floor for the level-scaled interval |
//! | `DEFAULT_PENALTY_DURATION_MS` | 10000 | Special-block penalty window |
//! | `DEFAULT_ROTATION_ANIMATION_MS` | 150 | Rotation animation hint for renderers |
//! | `DEFAULT_DROP_ANIMATION_MS` | 200 | Hard drop animation hint for renderers |
//!
//! # Scoring Constants
//!
//! | Constant | Value |
//! |----------|-------|
//! | `DEFAULT_POINTS_PER_BLOCK` | 10 |
//! | `DEFAULT_POINTS_PER_LAYER` | 100 |
//! | `DEFAULT_POINTS_PER_LINE` | 50 |
//! | `DEFAULT_FULL_CLEAR_BONUS` | 1000 |
//! | `DEFAULT_LEVEL_UP_THRESHOLD` | 1000 |
//!
//! # Examples
//!
//! ```
//! use blockout_pit_types::{Axis, GameAction, DEFAULT_PIT_WIDTH};
//!
//! let axis = Axis::from_str("z").unwrap();
//! assert_eq!(axis, Axis::Z);
//!
//! let action = GameAction::from_str("rotateZCw").unwrap();
//! assert_eq!(action.rotation(), Some((Axis::Z, 1)));
//!
//! assert_eq!(DEFAULT_PIT_WIDTH, 5);
//! ```

/// Default pit width in cells (x extent)
pub const DEFAULT_PIT_WIDTH: u8 = 5;

/// Default pit depth in cells (y extent)
pub const DEFAULT_PIT_DEPTH: u8 = 5;

/// Default pit height in cells (z extent)
pub const DEFAULT_PIT_HEIGHT: u8 = 15;

/// Suggested fixed timestep for hosts driving `tick` (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic fall interval at level 1
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 1000;

/// Per-level multiplier applied to the fall interval
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 0.85;

/// Shortest fall interval the level formula may produce
pub const DEFAULT_MIN_FALL_INTERVAL_MS: u32 = 100;

/// Longest fall interval the level formula may produce
pub const DEFAULT_MAX_FALL_INTERVAL_MS: u32 = 1000;

/// Points awarded for every locked piece
pub const DEFAULT_POINTS_PER_BLOCK: u32 = 10;

/// Points per cleared layer (multiplied by the triangular multi-clear factor)
pub const DEFAULT_POINTS_PER_LAYER: u32 = 100;

/// Points per cleared same-color line (line-clear extension only)
pub const DEFAULT_POINTS_PER_LINE: u32 = 50;

/// Bonus for emptying the whole pit
pub const DEFAULT_FULL_CLEAR_BONUS: u32 = 1000;

/// Score needed per level (`level * threshold` advances the level)
pub const DEFAULT_LEVEL_UP_THRESHOLD: u32 = 1000;

/// Fewest locked pieces between two special pieces
pub const DEFAULT_SPECIAL_MIN_INTERVAL: u32 = 10;

/// Most locked pieces between two special pieces
pub const DEFAULT_SPECIAL_MAX_INTERVAL: u32 = 20;

/// Fall interval multiplier while a special-block penalty is active
pub const DEFAULT_PENALTY_INTERVAL_FACTOR: f64 = 0.5;

/// Length of the special-block penalty window
pub const DEFAULT_PENALTY_DURATION_MS: u32 = 10_000;

/// Rotation animation duration reported to renderers
pub const DEFAULT_ROTATION_ANIMATION_MS: u32 = 150;

/// Hard drop animation duration reported to renderers
pub const DEFAULT_DROP_ANIMATION_MS: u32 = 200;

/// Number of upcoming pieces kept in the preview queue
pub const DEFAULT_QUEUE_LEN: usize = 3;

/// Upper bound on cubes per shape (keeps piece cell sets on the stack)
pub const MAX_SHAPE_CELLS: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pit_is_five_by_five_by_fifteen() {
        assert_eq!(DEFAULT_PIT_WIDTH, 5);
        assert_eq!(DEFAULT_PIT_DEPTH, 5);
        assert_eq!(DEFAULT_PIT_HEIGHT, 15);
    }

    #[test]
    fn scoring_defaults() {
        assert_eq!(DEFAULT_POINTS_PER_BLOCK, 10);
        assert_eq!(DEFAULT_POINTS_PER_LAYER, 100);
        assert!(DEFAULT_SPECIAL_MIN_INTERVAL <= DEFAULT_SPECIAL_MAX_INTERVAL);
        assert!(DEFAULT_MIN_FALL_INTERVAL_MS <= DEFAULT_MAX_FALL_INTERVAL_MS);
    }

    #[test]
    fn game_action_round_trips_through_str() {
        for action in GameAction::ALL {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn rotation_actions_carry_axis_and_direction() {
        assert_eq!(GameAction::RotateXCcw.rotation(), Some((Axis::X, -1)));
        assert_eq!(GameAction::RotateYCw.rotation(), Some((Axis::Y, 1)));
        assert_eq!(GameAction::MoveLeft.rotation(), None);
    }
}

/// Principal axes of the pit
///
/// - **X**: width (left/right)
/// - **Y**: depth (front/back)
/// - **Z**: height (up/down, gravity pulls towards `-Z`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Parse axis from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockout_pit_types::Axis;
    ///
    /// assert_eq!(Axis::from_str("X"), Some(Axis::X));
    /// assert_eq!(Axis::from_str("w"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Index into an `[x, y, z]` triple
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// 24-bit display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Contents of one occupied pit cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellContent {
    pub color: Rgb,
}

/// A cell in the pit
///
/// - `None`: Empty cell
/// - `Some(CellContent)`: Cell holding one locked cube
pub type Cell = Option<CellContent>;

/// Player actions that external input layers translate into core calls
///
/// Each action maps to one session operation. Rotations are one quarter
/// turn; `Cw` is the positive (right-handed) direction about the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell towards `-x`
    MoveLeft,
    /// Move piece one cell towards `+x`
    MoveRight,
    /// Move piece one cell towards `+y`
    MoveBack,
    /// Move piece one cell towards `-y`
    MoveForward,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    RotateXCw,
    RotateXCcw,
    RotateYCw,
    RotateYCcw,
    RotateZCw,
    RotateZCcw,
    /// Toggle pause state (starts the session if it has not started)
    Pause,
    /// Restart the session
    Restart,
}

impl GameAction {
    pub const ALL: [GameAction; 14] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveBack,
        GameAction::MoveForward,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateXCw,
        GameAction::RotateXCcw,
        GameAction::RotateYCw,
        GameAction::RotateYCcw,
        GameAction::RotateZCw,
        GameAction::RotateZCcw,
        GameAction::Pause,
        GameAction::Restart,
    ];

    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockout_pit_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("MOVELEFT"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "moveback" => Some(GameAction::MoveBack),
            "moveforward" => Some(GameAction::MoveForward),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatexcw" => Some(GameAction::RotateXCw),
            "rotatexccw" => Some(GameAction::RotateXCcw),
            "rotateycw" => Some(GameAction::RotateYCw),
            "rotateyccw" => Some(GameAction::RotateYCcw),
            "rotatezcw" => Some(GameAction::RotateZCw),
            "rotatezccw" => Some(GameAction::RotateZCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveBack => "moveBack",
            GameAction::MoveForward => "moveForward",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateXCw => "rotateXCw",
            GameAction::RotateXCcw => "rotateXCcw",
            GameAction::RotateYCw => "rotateYCw",
            GameAction::RotateYCcw => "rotateYCcw",
            GameAction::RotateZCw => "rotateZCw",
            GameAction::RotateZCcw => "rotateZCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Translation delta for movement actions
    pub fn translation(&self) -> Option<(i32, i32, i32)> {
        match self {
            GameAction::MoveLeft => Some((-1, 0, 0)),
            GameAction::MoveRight => Some((1, 0, 0)),
            GameAction::MoveBack => Some((0, 1, 0)),
            GameAction::MoveForward => Some((0, -1, 0)),
            GameAction::SoftDrop => Some((0, 0, -1)),
            _ => None,
        }
    }

    /// Axis and signed quarter-turn count for rotation actions
    pub fn rotation(&self) -> Option<(Axis, i8)> {
        match self {
            GameAction::RotateXCw => Some((Axis::X, 1)),
            GameAction::RotateXCcw => Some((Axis::X, -1)),
            GameAction::RotateYCw => Some((Axis::Y, 1)),
            GameAction::RotateYCcw => Some((Axis::Y, -1)),
            GameAction::RotateZCw => Some((Axis::Z, 1)),
            GameAction::RotateZCcw => Some((Axis::Z, -1)),
            _ => None,
        }
    }
}
