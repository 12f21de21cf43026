//! Content hashing for fetched response bodies
//!
//! The batch machinery only depends on [`BodyHasher`]; [`HashAlgorithm`] is the
//! set of digests the command line can select.

mod algorithm;

pub use algorithm::HashAlgorithm;

/// Computes a digest string over a response body
///
/// Implementations must be pure and deterministic: the same bytes always
/// produce the same string. There is no failure mode.
pub trait BodyHasher: Send + Sync {
    /// Returns the digest of `body`
    fn digest(&self, body: &[u8]) -> String;
}

impl<F> BodyHasher for F
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    fn digest(&self, body: &[u8]) -> String {
        self(body)
    }
}
