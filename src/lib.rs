//! Hashfetch: concurrent page fetcher and content hasher
//!
//! This crate fetches a batch of URLs over HTTP with a bounded number of
//! requests in flight, digests every response body, and reports the
//! `(url, hash)` pairs of the pages that could be fetched.

pub mod batch;
pub mod config;
pub mod hash;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Hashfetch operations
#[derive(Debug, Error)]
pub enum HashfetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// These are fatal: they surface before any batch runs and are never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Concurrency budget must be greater than 0, got {0}")]
    InvalidBudget(i64),

    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),

    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL {url:?}: {source}")]
    Parse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("First path segment in URL {0:?} cannot contain colon")]
    ColonInFirstSegment(String),
}

/// Per-request fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Request {url} failed with status code {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {reason}")]
    Read { url: String, reason: String },
}

/// Result type alias for Hashfetch operations
pub type Result<T> = std::result::Result<T, HashfetchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::batch::{ConcurrencyBudget, Coordinator, Fetcher, HttpFetcher};
pub use crate::config::Config;
pub use crate::hash::{BodyHasher, HashAlgorithm};
pub use crate::output::{PageResult, ResultSet};
pub use crate::url::{normalize_url, NormalizedUrl};
