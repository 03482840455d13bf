//! Gravity speed curve.
//!
//! The interval shrinks by `DROP_STEP_MS` for every `ROWS_PER_STEP` cleared
//! rows and stops at `DROP_FLOOR_MS`. It is a ratchet: recomputed only while
//! the current value is above the floor, so it never grows back.

use crate::types::{DROP_FLOOR_MS, DROP_STEP_MS, INITIAL_DROP_MS, ROWS_PER_STEP};

/// Interval for `cleared_rows`, ignoring the ratchet.
pub fn interval_for(cleared_rows: u32) -> u32 {
    let steps = cleared_rows / ROWS_PER_STEP;
    INITIAL_DROP_MS
        .saturating_sub(steps.saturating_mul(DROP_STEP_MS))
        .max(DROP_FLOOR_MS)
}

/// Next interval given the current one.
pub fn next_interval(current_ms: u32, cleared_rows: u32) -> u32 {
    if current_ms > DROP_FLOOR_MS {
        interval_for(cleared_rows)
    } else {
        current_ms
    }
}
