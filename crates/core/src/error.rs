//! Construction-time errors
//!
//! Gameplay never fails: actions are accepted or rejected with a `bool`.
//! Everything that can be wrong with shapes, catalogs or configuration is
//! rejected here, before a session starts.

use thiserror::Error;

use crate::geometry::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape `{0}` has no cells")]
    Empty(String),
    #[error("shape `{name}` has {count} cells, at most {max} are supported")]
    TooManyCells {
        name: String,
        count: usize,
        max: usize,
    },
    #[error("shape `{name}` repeats offset {offset:?}")]
    DuplicateOffset { name: String, offset: Coord },
    #[error("shape `{0}` is not face-connected")]
    Disconnected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("no regular shape is unlocked at level 1")]
    NothingUnlocked,
    #[error("fixed special geometry requested but the catalog has no special shape")]
    MissingSpecialShape,
    #[error("shape name `{0}` is used twice")]
    DuplicateName(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pit dimensions must be non-zero (got {width}x{depth}x{height})")]
    EmptyPit { width: u8, depth: u8, height: u8 },
    #[error("fall interval must be positive")]
    ZeroFallInterval,
    #[error("minimum fall interval {min}ms exceeds maximum {max}ms")]
    FallIntervalRange { min: u32, max: u32 },
    #[error("speed multiplier must be in (0, 1], got {0}")]
    SpeedMultiplier(f64),
    #[error("penalty interval factor must be positive, got {0}")]
    PenaltyFactor(f64),
    #[error("level-up threshold must be positive")]
    ZeroLevelThreshold,
    #[error("special interval [{min}, {max}] is empty or starts at zero")]
    SpecialInterval { min: u32, max: u32 },
    #[error("preview queue must hold at least one piece")]
    EmptyQueue,
}

/// Any failure building a [`crate::Session`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid shape catalog: {0}")]
    Catalog(#[from] CatalogError),
}
