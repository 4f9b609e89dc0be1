use crate::geometry::{Coord, Pose};
use crate::polycube::Polycube;
use crate::session::Phase;
use crate::types::{CellContent, Rgb};

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSnapshot {
    pub shape: String,
    pub special: bool,
    pub color: Rgb,
    pub pose: Pose,
    pub cells: Vec<Coord>,
}

impl From<&Polycube> for ActiveSnapshot {
    fn from(value: &Polycube) -> Self {
        Self {
            shape: value.name().to_string(),
            special: value.is_special(),
            color: value.color(),
            pose: value.pose(),
            cells: value.world_cells().to_vec(),
        }
    }
}

/// Render-ready copy of a session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PitSnapshot {
    pub width: i32,
    pub depth: i32,
    pub height: i32,
    /// Occupied cells, layer-major
    pub cells: Vec<(Coord, CellContent)>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_offset: Option<i32>,
    pub queue: Vec<String>,
    pub phase: Phase,
    pub episode_id: u32,
    pub seed: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub blocks_placed: u32,
    pub blocks_since_special: u32,
    pub layers_cleared: u32,
    pub lines_cleared: u32,
    pub fall_interval_ms: u32,
    pub penalty_active: bool,
    pub now_ms: u64,
}

impl PitSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Where the active piece would come to rest on a hard drop
    pub fn ghost_cells(&self) -> Vec<Coord> {
        match (&self.active, self.ghost_offset) {
            (Some(active), Some(offset)) => {
                active.cells.iter().map(|c| c.offset(0, 0, -offset)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Occupied cell count per layer, bottom first
    pub fn layer_fill(&self) -> Vec<usize> {
        let mut fill = vec![0; self.height.max(0) as usize];
        for (c, _) in &self.cells {
            if let Some(slot) = fill.get_mut(c.z as usize) {
                *slot += 1;
            }
        }
        fill
    }
}
