//! Session configuration
//!
//! Fixed set of options consumed at construction. The engine owns no file
//! format; hosts deserialize a [`PitConfig`] however they like (every field
//! has a default, so partial documents are accepted).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::*;

/// How the special piece's geometry is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialGeometry {
    /// Drawn from the bag like any other piece, then flagged special
    #[default]
    Drawn,
    /// Always the catalog's dedicated special shape
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitConfig {
    pub width: u8,
    pub depth: u8,
    pub height: u8,
    /// Fall interval at level 1
    pub fall_interval_ms: u32,
    /// Interval multiplier applied once per level above 1
    pub speed_multiplier: f64,
    pub min_fall_interval_ms: u32,
    pub max_fall_interval_ms: u32,
    pub points_per_block: u32,
    pub points_per_layer: u32,
    pub points_per_line: u32,
    pub full_clear_bonus: u32,
    pub level_up_threshold: u32,
    pub special_min_interval: u32,
    pub special_max_interval: u32,
    pub special_geometry: SpecialGeometry,
    /// Fall interval multiplier while a penalty is active
    pub penalty_interval_factor: f64,
    pub penalty_duration_ms: u32,
    /// Same-color row clearing on top of layer clearing
    pub line_clears: bool,
    pub queue_len: usize,
    pub rotation_animation_ms: u32,
    pub drop_animation_ms: u32,
}

impl Default for PitConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PIT_WIDTH,
            depth: DEFAULT_PIT_DEPTH,
            height: DEFAULT_PIT_HEIGHT,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            min_fall_interval_ms: DEFAULT_MIN_FALL_INTERVAL_MS,
            max_fall_interval_ms: DEFAULT_MAX_FALL_INTERVAL_MS,
            points_per_block: DEFAULT_POINTS_PER_BLOCK,
            points_per_layer: DEFAULT_POINTS_PER_LAYER,
            points_per_line: DEFAULT_POINTS_PER_LINE,
            full_clear_bonus: DEFAULT_FULL_CLEAR_BONUS,
            level_up_threshold: DEFAULT_LEVEL_UP_THRESHOLD,
            special_min_interval: DEFAULT_SPECIAL_MIN_INTERVAL,
            special_max_interval: DEFAULT_SPECIAL_MAX_INTERVAL,
            special_geometry: SpecialGeometry::default(),
            penalty_interval_factor: DEFAULT_PENALTY_INTERVAL_FACTOR,
            penalty_duration_ms: DEFAULT_PENALTY_DURATION_MS,
            line_clears: false,
            queue_len: DEFAULT_QUEUE_LEN,
            rotation_animation_ms: DEFAULT_ROTATION_ANIMATION_MS,
            drop_animation_ms: DEFAULT_DROP_ANIMATION_MS,
        }
    }
}

impl PitConfig {
    /// 5x5x12 variant
    pub fn shallow() -> Self {
        Self {
            height: 12,
            ..Self::default()
        }
    }

    pub fn with_dimensions(mut self, width: u8, depth: u8, height: u8) -> Self {
        self.width = width;
        self.depth = depth;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.depth == 0 || self.height == 0 {
            return Err(ConfigError::EmptyPit {
                width: self.width,
                depth: self.depth,
                height: self.height,
            });
        }
        if self.fall_interval_ms == 0 || self.min_fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        if self.min_fall_interval_ms > self.max_fall_interval_ms {
            return Err(ConfigError::FallIntervalRange {
                min: self.min_fall_interval_ms,
                max: self.max_fall_interval_ms,
            });
        }
        if !(self.speed_multiplier > 0.0 && self.speed_multiplier <= 1.0) {
            return Err(ConfigError::SpeedMultiplier(self.speed_multiplier));
        }
        if !(self.penalty_interval_factor > 0.0) {
            return Err(ConfigError::PenaltyFactor(self.penalty_interval_factor));
        }
        if self.level_up_threshold == 0 {
            return Err(ConfigError::ZeroLevelThreshold);
        }
        if self.special_min_interval == 0 || self.special_min_interval > self.special_max_interval
        {
            return Err(ConfigError::SpecialInterval {
                min: self.special_min_interval,
                max: self.special_max_interval,
            });
        }
        if self.queue_len == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        Ok(())
    }
}
