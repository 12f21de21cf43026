//! URL handling module for Hashfetch
//!
//! This module turns raw target strings into absolute URLs that can be
//! handed to a fetcher.

mod normalize;

pub use normalize::{normalize_url, NormalizedUrl, DEFAULT_SCHEME};
