//! Per-batch statistics
//!
//! Counts of how the tasks of one batch ended, logged when the batch finishes.

use std::fmt;
use std::time::Duration;

/// Summary of one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of tasks dispatched (one per target)
    pub dispatched: usize,

    /// Number of tasks that produced a result
    pub succeeded: usize,

    /// Number of tasks skipped because of an error or a panic
    pub skipped: usize,

    /// Wall-clock time of the batch
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Returns true if every dispatched task reached a terminal state
    pub fn is_complete(&self) -> bool {
        self.succeeded + self.skipped == self.dispatched
    }

    /// Percentage of dispatched tasks that succeeded
    pub fn success_rate(&self) -> f64 {
        if self.dispatched == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.dispatched as f64) * 100.0
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dispatched, {} succeeded, {} skipped ({:.1}%) in {:?}",
            self.dispatched,
            self.succeeded,
            self.skipped,
            self.success_rate(),
            self.elapsed
        )
    }
}
