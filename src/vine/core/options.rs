//! vine::core::options — configuration for batch density evaluation.
//!
//! Purpose
//! -------
//! Collect the numerical and scheduling knobs of vine evaluation in one
//! validated value, so the engine and orchestrator receive explicit options
//! instead of ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - `transform_floor` clamps every h-function output to
//!   `[floor, 1 − floor]` before it is stored, keeping later tree levels
//!   inside the open unit interval.
//! - `parallel` and `min_rows_per_task` control how a batch is split into
//!   contiguous row chunks for rayon. Output order never depends on them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 ≤ transform_floor < 0.5`, so the clamp interval is non-empty.
//! - `min_rows_per_task ≥ 1`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the defaults and each rejected value.
use crate::vine::errors::{VineError, VineResult};

/// Default clamp applied to h-function outputs.
pub const DEFAULT_TRANSFORM_FLOOR: f64 = 1e-10;

/// Default minimum number of rows handed to one parallel task.
pub const DEFAULT_MIN_ROWS_PER_TASK: usize = 1024;

/// EvalOptions — validated evaluation settings.
///
/// Fields
/// ------
/// - `transform_floor`: `f64`
///   Lower clamp for h-function outputs (upper clamp is `1 − floor`).
///   `0.0` disables clamping in practice.
/// - `parallel`: `bool`
///   Whether large batches may be split across the rayon pool.
/// - `min_rows_per_task`: `usize`
///   Chunk size for parallel evaluation; batches with fewer than two chunks
///   run sequentially.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalOptions {
    transform_floor: f64,
    parallel: bool,
    min_rows_per_task: usize,
}

impl EvalOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `VineError::InvalidOptions`
    ///   Returned when `transform_floor` is not finite or lies outside
    ///   `[0, 0.5)`, or when `min_rows_per_task` is zero.
    pub fn new(transform_floor: f64, parallel: bool, min_rows_per_task: usize) -> VineResult<Self> {
        if !transform_floor.is_finite() || !(0.0..0.5).contains(&transform_floor) {
            return Err(VineError::InvalidOptions {
                field: "transform_floor",
                value: transform_floor,
                reason: "must be finite and lie in [0, 0.5)",
            });
        }
        if min_rows_per_task == 0 {
            return Err(VineError::InvalidOptions {
                field: "min_rows_per_task",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(EvalOptions { transform_floor, parallel, min_rows_per_task })
    }

    /// Sequential evaluation with the default floor.
    pub fn sequential() -> Self {
        EvalOptions { parallel: false, ..EvalOptions::default() }
    }

    pub fn transform_floor(&self) -> f64 {
        self.transform_floor
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn min_rows_per_task(&self) -> usize {
        self.min_rows_per_task
    }
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            transform_floor: DEFAULT_TRANSFORM_FLOOR,
            parallel: true,
            min_rows_per_task: DEFAULT_MIN_ROWS_PER_TASK,
        }
    }
}
