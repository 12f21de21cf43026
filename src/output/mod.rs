//! Output module for batch results
//!
//! This module handles:
//! - The record produced by one successful task
//! - The unordered container the batch returns
//! - Rendering results as `<url> <hash>` lines

pub mod stats;

pub use stats::BatchSummary;

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

/// The outcome of one successful task
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageResult {
    /// Normalized URL that was fetched
    pub url: String,

    /// Digest of the response body
    pub hash: String,
}

impl PageResult {
    pub fn new(url: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            hash: hash.into(),
        }
    }
}

impl fmt::Display for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.url, self.hash)
    }
}

/// Results of a batch, in completion order
///
/// Iteration order follows the order tasks finished, which depends on network
/// latency. Compare result sets with [`ResultSet::to_set`] rather than by
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pages: Vec<PageResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pages: Vec::with_capacity(capacity),
        }
    }

    /// Adds a result; only the batch collector calls this
    pub(crate) fn push(&mut self, page: PageResult) {
        self.pages.push(page);
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageResult> {
        self.pages.iter()
    }

    /// Returns true if a result for `url` is present
    pub fn contains_url(&self, url: &str) -> bool {
        self.pages.iter().any(|page| page.url == url)
    }

    /// Returns the results as an order-independent set
    pub fn to_set(&self) -> HashSet<PageResult> {
        self.pages.iter().cloned().collect()
    }
}

impl IntoIterator for ResultSet {
    type Item = PageResult;
    type IntoIter = std::vec::IntoIter<PageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a PageResult;
    type IntoIter = std::slice::Iter<'a, PageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl FromIterator<PageResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = PageResult>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

/// Writes one `<url> <hash>` line per result
///
/// # Arguments
///
/// * `results` - The results to render, in the order the batch returned them
/// * `out` - Destination writer (stdout for the CLI)
pub fn write_results<W: Write>(results: &ResultSet, out: &mut W) -> io::Result<()> {
    for page in results {
        writeln!(out, "{}", page)?;
    }
    out.flush()
}
