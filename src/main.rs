//! # Prensa Política
//!
//! Aggregates political news articles from Colombian outlets into one
//! consolidated CSV dataset, tagged by outlet and political orientation.
//!
//! ## Usage
//!
//! ```sh
//! HEADER='{"User-Agent": "Mozilla/5.0"}' prensa_politica --limit 300 --workers 6
//! ```
//!
//! ## Architecture
//!
//! 1. **Registry**: static table of outlets, each with a configured
//!    extractor and an orientation label (izquierda/centro/derecha)
//! 2. **Fan-out**: one retry-wrapped extraction job per outlet on a
//!    bounded worker pool
//! 3. **Consolidation**: successful outlets are tagged and concatenated
//!    in registry order
//! 4. **Output**: one CSV file with the consolidated table
//!
//! A run exits 0 even when every outlet failed; the CSV then holds only
//! the header row.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod config;
mod extract;
mod models;
mod outputs;
mod registry;
mod retry;
mod scrapers;
mod utils;

use aggregator::RunOptions;
use cli::Cli;
use config::HttpConfig;
use retry::RetryPolicy;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("prensa_politica starting up");

    let args = Cli::parse();
    debug!(?args.limit, ?args.workers, ?args.output, "Parsed CLI arguments");

    let http_config = HttpConfig::from_header_json(args.header.as_deref())?;
    let client = http_config.build_client()?;

    let sources = registry::sources();
    let opts = RunOptions {
        limit: args.limit,
        workers: args.workers,
    };
    let records = aggregator::get_all_news(&sources, &client, &opts, &RetryPolicy::default()).await;

    if records.is_empty() {
        warn!("Writing an empty consolidated dataset (header row only)");
    }
    outputs::csv::write_consolidated(&records, &args.output).await?;
    info!(path = %args.output, count = records.len(), "Consolidated file generated");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        records = records.len(),
        "Execution complete"
    );

    Ok(())
}
