//! Scoring module - clear bonuses, leveling and fall speed
//!
//! Multi-layer clears pay super-linearly: `n` layers at once are worth
//! `points_per_layer * n * (n + 1) / 2`, so one layer pays 100, two pay 300
//! and three pay 600 with the default table.

use crate::config::PitConfig;

/// Points for clearing `layers` layers with one lock
pub fn layer_clear_score(points_per_layer: u32, layers: usize) -> u32 {
    let n = layers as u32;
    points_per_layer.saturating_mul(n * (n + 1) / 2)
}

/// Points for clearing `lines` same-color rows with one lock
pub fn line_clear_score(points_per_line: u32, lines: usize) -> u32 {
    points_per_line.saturating_mul(lines as u32)
}

/// Score deducted when a special block lands flush on the stack
pub fn special_penalty(points_per_block: u32) -> u32 {
    points_per_block.saturating_mul(2)
}

/// Amount actually taken off `score` by a penalty; the score never goes negative
pub fn penalty_deduction(points_per_block: u32, score: u32) -> u32 {
    special_penalty(points_per_block).min(score)
}

/// Level reached from `level` with `score`
///
/// Level `L` advances once the score reaches `L * threshold`; it never goes
/// back down, even if a penalty later lowers the score.
pub fn level_for_score(score: u32, level: u32, threshold: u32) -> u32 {
    if threshold == 0 {
        return level;
    }
    let mut level = level.max(1);
    while u64::from(score) >= u64::from(level) * u64::from(threshold) {
        level += 1;
    }
    level
}

/// Fall interval for a level, clamped to the configured range
///
/// `fall_interval_ms * speed_multiplier^(level - 1)`, never shorter than
/// `min_fall_interval_ms` nor longer than `max_fall_interval_ms`.
pub fn fall_interval_ms(config: &PitConfig, level: u32) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let scaled = config.fall_interval_ms as f64 * config.speed_multiplier.powi(exponent);
    let clamped = scaled
        .round()
        .clamp(config.min_fall_interval_ms as f64, config.max_fall_interval_ms as f64);
    clamped as u32
}

/// Fall interval with the special-block penalty factor applied
pub fn penalized_interval_ms(interval_ms: u32, factor: f64) -> u32 {
    ((interval_ms as f64 * factor).round() as u32).max(1)
}
