//! Core pit engine - pure, deterministic, and testable
//!
//! This crate contains the rules of a Blockout-style 3D stacking game:
//! polycube pieces fall into a rectangular pit, players translate and rotate
//! them, full layers clear and score, and the game ends when a new piece
//! cannot be placed. It has **no dependencies** on rendering, audio or input:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Exact**: Orientations are one of 24 integer rotation matrices, never
//!   floating-point angles
//! - **Non-blocking**: Deferred work is a deadline on a host-driven clock
//!
//! # Module Structure
//!
//! - [`geometry`]: Integer coordinates, the 24 cube rotations, poses
//! - [`pieces`]: Shape templates, the default catalog, rotation kicks
//! - [`polycube`]: A shape placed at a pose
//! - [`pit`]: The occupancy grid with placement checks and layer clearing
//! - [`rng`]: Bag randomizer with level unlocks and special-piece injection
//! - [`scoring`]: Clear bonuses, leveling and fall speed
//! - [`session`]: The game state machine tying everything together
//! - [`timers`]: Generation-stamped deadlines
//! - [`events`]: Notifications for rendering and audio layers
//!
//! # Game Rules
//!
//! - **Bag Randomizer**: every unlocked shape appears once per bag
//! - **Wall Kicks**: 25 offsets tried in order when a rotation collides
//! - **Cascading Clears**: `n` layers at once pay `100 * n * (n + 1) / 2`
//! - **Special Blocks**: clear the bottom layer when dropped into a gap,
//!   otherwise cost points and speed up falling for a while
//!
//! # Example
//!
//! ```
//! use blockout_pit_core::{PitConfig, Session};
//! use blockout_pit_types::GameAction;
//!
//! let mut session = Session::new(PitConfig::default(), 12345).unwrap();
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::RotateZCw);
//! session.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(session.blocks_placed(), 1);
//! assert!(session.score() >= 10);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) every frame with elapsed
//! time. The fall interval starts at 1000ms and shrinks by a factor of 0.85
//! per level, never below 100ms.

pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod pieces;
pub mod pit;
pub mod polycube;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timers;

pub use blockout_pit_types as types;

// Re-export commonly used types for convenience
pub use config::{PitConfig, SpecialGeometry};
pub use error::{CatalogError, ConfigError, EngineError, ShapeError};
pub use events::{PitEvent, RotationAnimation, SpecialOutcome};
pub use geometry::{compose, rotate, Coord, Orientation, Pose};
pub use pieces::{standard_shape, standard_shapes, try_rotate, Shape, ShapeCatalog, KICK_OFFSETS};
pub use pit::Pit;
pub use polycube::Polycube;
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{fall_interval_ms, layer_clear_score, level_for_score};
pub use session::{Phase, Session};
pub use snapshot::{ActiveSnapshot, PitSnapshot};
pub use timers::{TimerKind, Timers};
