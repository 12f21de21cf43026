//! Batch module for concurrent fetching and hashing
//!
//! This module contains the core batch logic, including:
//! - The fetcher capability and its HTTP implementation
//! - Per-target processing (normalize, fetch, hash)
//! - The concurrency budget and task states
//! - The coordinator that fans targets out and collects results

mod budget;
mod coordinator;
mod fetcher;
mod processor;
mod task_state;

pub use budget::ConcurrencyBudget;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use processor::TaskProcessor;
pub use task_state::TaskState;

use crate::config::Config;
use crate::output::{BatchSummary, ResultSet};
use crate::HashfetchError;

/// Builds a coordinator from a configuration
///
/// Uses the HTTP transport and the configured digest algorithm.
///
/// # Returns
///
/// * `Ok(Coordinator)` - Ready to run batches
/// * `Err(HashfetchError)` - Invalid budget or the HTTP client could not be built
pub fn coordinator_from_config(config: &Config) -> Result<Coordinator, HashfetchError> {
    let fetcher = HttpFetcher::from_config(&config.http)?;

    let coordinator = Coordinator::builder()
        .fetcher(fetcher)
        .hasher(config.hash.algorithm)
        .budget(config.batch.parallel)
        .build()?;

    Ok(coordinator)
}

/// Runs one batch over `targets` with the given configuration
///
/// This is the main entry point for the command line. It will:
/// 1. Build the HTTP client and the coordinator
/// 2. Fetch and hash every target with at most `batch.parallel` in flight
/// 3. Return the successful results and the batch counts
///
/// # Example
///
/// ```no_run
/// use hashfetch::batch::run;
/// use hashfetch::config::Config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (results, _summary) = run(&Config::default(), vec!["example.com".to_string()]).await?;
/// for page in &results {
///     println!("{}", page);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run(
    config: &Config,
    targets: Vec<String>,
) -> Result<(ResultSet, BatchSummary), HashfetchError> {
    let coordinator = coordinator_from_config(config)?;
    Ok(coordinator.run_batch_with_summary(targets).await)
}
