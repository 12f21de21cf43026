//! Concurrency budget for a batch
//!
//! The budget is the number of tasks allowed to hold fetch and hash resources
//! at the same time. Each batch turns it into a fresh slot pool.

use crate::ConfigError;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Maximum number of simultaneously running tasks, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyBudget(NonZeroUsize);

impl ConcurrencyBudget {
    /// Creates a budget, rejecting zero and negative values
    ///
    /// # Returns
    ///
    /// * `Ok(ConcurrencyBudget)` - Valid budget
    /// * `Err(ConfigError::InvalidBudget)` - `slots` is not a positive count
    pub fn new(slots: i64) -> Result<Self, ConfigError> {
        usize::try_from(slots)
            .ok()
            .filter(|&n| n <= Semaphore::MAX_PERMITS)
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(ConfigError::InvalidBudget(slots))
    }

    /// Returns the number of slots
    pub fn get(&self) -> usize {
        self.0.get()
    }

    /// Creates the slot pool backing one batch run
    pub(crate) fn slot_pool(&self) -> Arc<Semaphore> {
        Arc::new(Semaphore::new(self.get()))
    }
}

impl TryFrom<i64> for ConcurrencyBudget {
    type Error = ConfigError;

    fn try_from(slots: i64) -> Result<Self, Self::Error> {
        Self::new(slots)
    }
}
