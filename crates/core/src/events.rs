//! Events emitted by the session
//!
//! The session queues notifications as state changes happen; rendering,
//! audio and score layers pull them with
//! [`Session::drain_events`](crate::Session::drain_events). Events are
//! informational only: dropping them never changes gameplay.

use crate::geometry::{Coord, Pose};

/// Presentation record for a committed rotation
///
/// The logical pose is already `to` when this is emitted; renderers may
/// interpolate from `from` over `duration_ms` on their own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationAnimation {
    pub from: Pose,
    pub to: Pose,
    pub duration_ms: u32,
}

/// Which way a special block resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOutcome {
    /// Reached into a gap: bottom layer cleared and the block removed
    Clearing { bonus: u32 },
    /// Sat on top of the stack: score deducted and falling sped up
    Penalty { deducted: u32, fall_interval_ms: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PitEvent {
    Started,
    Paused,
    Resumed,
    PieceSpawned {
        shape: String,
        position: Coord,
        special: bool,
    },
    PieceMoved {
        from: Coord,
        to: Coord,
    },
    PieceRotated(RotationAnimation),
    /// Hard drop, before the landing it causes
    PieceDropped {
        distance: u32,
        duration_ms: u32,
    },
    PieceLanded {
        cells: Vec<Coord>,
        special: bool,
    },
    LayersCleared {
        count: usize,
        bonus: u32,
    },
    LinesCleared {
        count: usize,
        bonus: u32,
    },
    PitCleared {
        bonus: u32,
    },
    SpecialTriggered(SpecialOutcome),
    PenaltyExpired {
        fall_interval_ms: u32,
    },
    ScoreChanged {
        score: u32,
    },
    LevelChanged {
        level: u32,
        fall_interval_ms: u32,
    },
    /// Upcoming shape names, head first
    QueueChanged {
        queue: Vec<String>,
    },
    GameOver {
        score: u32,
    },
    Restarted {
        episode_id: u32,
    },
}
