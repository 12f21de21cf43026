//! Single-target processing: normalize, fetch, hash

use crate::batch::Fetcher;
use crate::hash::BodyHasher;
use crate::output::PageResult;
use crate::url::{normalize_url, NormalizedUrl};
use crate::FetchError;
use std::sync::Arc;

/// Runs one target through normalization, fetching and hashing
///
/// Failures never leave the processor: each one becomes a single log line
/// and the target is skipped.
#[derive(Clone)]
pub struct TaskProcessor {
    fetcher: Arc<dyn Fetcher>,
    hasher: Arc<dyn BodyHasher>,
}

impl TaskProcessor {
    pub fn new(fetcher: Arc<dyn Fetcher>, hasher: Arc<dyn BodyHasher>) -> Self {
        Self { fetcher, hasher }
    }

    /// Processes one raw target
    ///
    /// # Returns
    ///
    /// * `Some(PageResult)` - The target was fetched and hashed
    /// * `None` - The target was skipped; the reason has been logged
    pub async fn process(&self, target: &str) -> Option<PageResult> {
        let url = match normalize_url(target) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(input = %target, error = %e, "Unable to prepare url, skipping");
                return None;
            }
        };

        match self.fetch_and_hash(&url).await {
            Ok(hash) => Some(PageResult::new(url.to_string(), hash)),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Unable to process url, skipping");
                None
            }
        }
    }

    /// Fetches a normalized URL and returns the digest of its body
    pub async fn fetch_and_hash(&self, url: &NormalizedUrl) -> Result<String, FetchError> {
        let body = self.fetcher.fetch(url.as_url()).await?;
        Ok(self.hasher.digest(&body))
    }
}
