//! Integration tests for Hashfetch
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! HTTP fetcher and full batches end-to-end.

mod batch_tests;
mod fetch_tests;
mod truncated_server;
