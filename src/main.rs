//! # Part Grabber
//!
//! A scraping pipeline that reads candidate product URLs from a CSV sheet,
//! fetches each Titan Fittings product page, extracts the product title
//! and primary image URL, and appends the results to a CSV catalog.
//!
//! ## Usage
//!
//! ```sh
//! part_grabber -i BOP.csv -o BOP_output_urls.csv
//! ```
//!
//! ## Architecture
//!
//! The application is a sequential pipeline, one row at a time:
//! 1. **Input**: Read column J of the input sheet and classify each cell
//! 2. **Fetching**: Download the product page with browser-like headers
//! 3. **Extraction**: Apply ordered selector rules for title and image
//! 4. **Output**: Append one row to the catalog store
//!
//! Per-row failures are logged and skipped; only an unreadable input
//! sheet ends the run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod driver;
mod inputs;
mod models;
mod outputs;
mod scrapers;

use cli::Cli;
use driver::BatchConfig;

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
    info!("part_grabber starting up");

    let args = Cli::parse();
    debug!(?args.input, ?args.output, "Parsed CLI arguments");

    let config = BatchConfig {
        input_path: args.input.clone().into(),
        output_path: args.output.clone().into(),
        url_prefix: scrapers::titan::BASE_URL.to_string(),
        url_column: inputs::URL_COLUMN,
    };

    let summary = match driver::run_batch(&config).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(input = %args.input, error = %e, "Failed to read the input sheet");
            return Err(e);
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        scraped = summary.scraped,
        failed = summary.failed,
        skipped_non_matching = summary.skipped_non_matching,
        skipped_empty = summary.skipped_empty,
        output = %args.output,
        ?elapsed,
        "Scraping completed"
    );

    Ok(())
}
