//! Batch coordinator - bounded fan-out over a list of targets
//!
//! This module contains the batch loop that:
//! - Spawns one task per target, in input order
//! - Caps the number of running tasks with a per-batch slot pool
//! - Collects successful results through a single owner
//! - Waits for every task before returning

use crate::batch::budget::ConcurrencyBudget;
use crate::batch::processor::TaskProcessor;
use crate::batch::task_state::{TaskState, TaskTracker};
use crate::batch::Fetcher;
use crate::hash::BodyHasher;
use crate::output::{BatchSummary, PageResult, ResultSet};
use crate::ConfigError;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Main batch coordinator structure
///
/// A coordinator can run any number of batches one after another: every call
/// to [`Coordinator::run_batch`] creates its own slot pool and closes it
/// before returning.
#[derive(Clone)]
pub struct Coordinator {
    processor: TaskProcessor,
    budget: ConcurrencyBudget,
}

/// Builder for [`Coordinator`]
///
/// All three parts are required; `build` reports the first one that is
/// missing or invalid.
#[derive(Default)]
pub struct CoordinatorBuilder {
    fetcher: Option<Arc<dyn Fetcher>>,
    hasher: Option<Arc<dyn BodyHasher>>,
    budget: Option<i64>,
}

impl CoordinatorBuilder {
    pub fn fetcher<F: Fetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Uses a fetcher that is also held elsewhere
    pub fn shared_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn hasher<H: BodyHasher + 'static>(mut self, hasher: H) -> Self {
        self.hasher = Some(Arc::new(hasher));
        self
    }

    /// Sets the maximum number of tasks running at once
    pub fn budget(mut self, slots: i64) -> Self {
        self.budget = Some(slots);
        self
    }

    /// Creates the coordinator
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - All dependencies present and valid
    /// * `Err(ConfigError)` - Budget missing or not positive, hasher or fetcher missing
    pub fn build(self) -> Result<Coordinator, ConfigError> {
        let budget = self
            .budget
            .ok_or(ConfigError::MissingDependency("concurrency budget"))
            .and_then(ConcurrencyBudget::new)?;
        let hasher = self
            .hasher
            .ok_or(ConfigError::MissingDependency("hasher"))?;
        let fetcher = self
            .fetcher
            .ok_or(ConfigError::MissingDependency("fetcher"))?;

        Ok(Coordinator {
            processor: TaskProcessor::new(fetcher, hasher),
            budget,
        })
    }
}

impl Coordinator {
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::default()
    }

    /// Returns the configured concurrency budget
    pub fn budget(&self) -> ConcurrencyBudget {
        self.budget
    }

    /// Fetches and hashes every target, returning the successful results
    ///
    /// Blocks until every task has finished. Failed targets are logged and
    /// left out of the result; result order is not input order.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hashfetch::{Coordinator, HashAlgorithm, HttpFetcher};
    /// use hashfetch::config::HttpConfig;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let coordinator = Coordinator::builder()
    ///     .fetcher(HttpFetcher::from_config(&HttpConfig::default())?)
    ///     .hasher(HashAlgorithm::Md5)
    ///     .budget(4)
    ///     .build()?;
    ///
    /// for page in coordinator.run_batch(["example.com", "http://example.org"]).await {
    ///     println!("{} {}", page.url, page.hash);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_batch<I, S>(&self, targets: I) -> ResultSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run_batch_with_summary(targets).await.0
    }

    /// Same as [`Coordinator::run_batch`], also returning per-batch counts
    pub async fn run_batch_with_summary<I, S>(&self, targets: I) -> (ResultSet, BatchSummary)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let started = Instant::now();
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();

        if targets.is_empty() {
            tracing::debug!("Empty batch, nothing to dispatch");
            return (ResultSet::new(), BatchSummary::default());
        }

        let dispatched = targets.len();
        tracing::info!(
            targets = dispatched,
            budget = self.budget.get(),
            "Starting batch"
        );

        let slots = self.budget.slot_pool();
        let mut tasks = JoinSet::new();

        for target in targets {
            let slots = Arc::clone(&slots);
            let processor = self.processor.clone();

            tasks.spawn(async move {
                let mut tracker = TaskTracker::new(&target);

                // Held until the task body returns or unwinds
                let _permit = match slots.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        tracing::warn!(input = %target, "Slot pool closed, skipping");
                        tracker.advance(TaskState::Skipped);
                        return None;
                    }
                };
                tracker.advance(TaskState::Running);

                let page = processor.process(&target).await;
                tracker.advance(if page.is_some() {
                    TaskState::Succeeded
                } else {
                    TaskState::Skipped
                });
                page
            });
        }

        let mut results = ResultSet::with_capacity(dispatched);
        let mut skipped = 0;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(page)) => collect(&mut results, page),
                Ok(None) => skipped += 1,
                Err(e) if e.is_panic() => {
                    tracing::error!(error = %e, "Task panicked, skipping");
                    skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Task cancelled, skipping");
                    skipped += 1;
                }
            }
        }

        slots.close();

        let summary = BatchSummary {
            dispatched,
            succeeded: results.len(),
            skipped,
            elapsed: started.elapsed(),
        };
        tracing::info!("Batch finished: {}", summary);

        (results, summary)
    }
}

fn collect(results: &mut ResultSet, page: PageResult) {
    tracing::debug!(url = %page.url, hash = %page.hash, "Collected result");
    results.push(page);
}
