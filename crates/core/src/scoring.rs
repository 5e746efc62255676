//! Scoring module - line-clear points and level progression
//!
//! Points for a clear are `base * level`, with the base taken from
//! [`LINE_SCORES`] for up to four rows and `rows * 500` beyond that.
//! A level is gained every ten cleared rows; each level-up shortens the
//! auto-descent interval by 80ms, down to a 120ms floor.

use crate::types::{
    DROP_INTERVAL_FLOOR_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    OVERFLOW_LINE_SCORE,
};

/// Base points for clearing `cleared` rows at once (before the level multiplier)
pub fn base_line_score(cleared: usize) -> u32 {
    match LINE_SCORES.get(cleared) {
        Some(&points) => points,
        None => (cleared as u32).saturating_mul(OVERFLOW_LINE_SCORE),
    }
}

/// Points awarded for clearing `cleared` rows at `level`
pub fn score_delta(cleared: usize, level: u32) -> u32 {
    base_line_score(cleared).saturating_mul(level)
}

/// Level reached after `total_lines` cleared rows (1-based)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Interval after one level-up
pub fn next_drop_interval(interval_ms: u32) -> u32 {
    interval_ms
        .saturating_sub(DROP_INTERVAL_STEP_MS)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Compute the level and drop interval after `total_lines` cleared rows.
///
/// Never lowers the level and never raises the interval. The interval steps
/// down once per call that raises the level, even when several levels are
/// gained at once.
pub fn advance_level(total_lines: u32, current_level: u32, current_interval_ms: u32) -> (u32, u32) {
    let new_level = level_for_lines(total_lines);
    if new_level > current_level {
        (new_level, next_drop_interval(current_interval_ms))
    } else {
        (current_level, current_interval_ms)
    }
}
