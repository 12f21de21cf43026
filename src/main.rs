//! Hashfetch main entry point
//!
//! This is the command-line interface for the Hashfetch page hasher.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use hashfetch::config::{load_config, Config};
use hashfetch::output::write_results;
use hashfetch::HashAlgorithm;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Hashfetch: fetch pages in parallel and print a hash of each body
///
/// Makes an HTTP GET request to every URL and prints one line per page that
/// could be fetched, in the order the requests finished:
///
///     URL_1 hash_1
///     URL_2 hash_2
///
/// URLs without a scheme are requested over http. Failed URLs are logged to
/// stderr and left out of the output.
#[derive(Parser, Debug)]
#[command(name = "hashfetch")]
#[command(version)]
#[command(about = "Fetch pages in parallel and print a hash of each body")]
#[command(after_help = "Examples:\n  hashfetch http://example.com example.org\n  hashfetch --parallel 5 http://example.com http://example.org")]
struct Cli {
    /// URLs to fetch
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Number of parallel requests, must be greater than 0 [default: 10]
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    parallel: Option<i64>,

    /// Digest algorithm for response bodies (md5, sha256) [default: md5]
    #[arg(short, long, value_name = "NAME")]
    algorithm: Option<HashAlgorithm>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = effective_config(&cli)?;

    if let Err(e) = check_usage(&cli, &config) {
        e.exit();
    }

    tracing::debug!(
        parallel = config.batch.parallel,
        algorithm = %config.hash.algorithm,
        "Configuration resolved"
    );

    let (results, summary) = hashfetch::batch::run(&config, cli.urls).await?;

    if summary.skipped > 0 {
        tracing::info!("{} of {} URLs skipped", summary.skipped, summary.dispatched);
    }

    write_results(&results, &mut io::stdout().lock()).context("Failed to write results")?;

    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides
///
/// The parallel count is not validated here so that a bad `--parallel` can be
/// reported as a usage error.
fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(parallel) = cli.parallel {
        config.batch.parallel = parallel;
    }

    if let Some(algorithm) = cli.algorithm {
        config.hash.algorithm = algorithm;
    }

    Ok(config)
}

/// Rejects a non-positive parallel count and an empty URL list
///
/// The returned error renders the usage text and exits with status 2.
fn check_usage(cli: &Cli, config: &Config) -> Result<(), clap::Error> {
    if config.batch.parallel <= 0 {
        return Err(Cli::command().error(
            ErrorKind::ValueValidation,
            "--parallel must be greater than 0",
        ));
    }

    if cli.urls.is_empty() {
        return Err(Cli::command().error(
            ErrorKind::MissingRequiredArgument,
            "URL list can't be empty",
        ));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout only carries results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hashfetch=warn,error"),
            1 => EnvFilter::new("hashfetch=info,warn"),
            2 => EnvFilter::new("hashfetch=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
