//! Configuration module for Hashfetch
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so an empty file is valid.
//!
//! # Example
//!
//! ```no_run
//! use hashfetch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hashfetch.toml")).unwrap();
//! println!("Requests in flight: {}", config.batch.parallel);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BatchConfig, Config, HashConfig, HttpConfig, DEFAULT_PARALLEL};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
