//! Batch driver: walks the input store and runs the scrape pipeline per row.
//!
//! The driver owns the loop; the fetcher, extractor, and sink are plain
//! request/response collaborators with no shared state between rows. Rows
//! are processed strictly in store order, one at a time: a row's fetch,
//! extraction, and append all complete (or fail) before the next row
//! starts. No per-row failure halts the batch; only a failure to read the
//! input store itself is fatal.

use crate::inputs::{self, CellClass};
use crate::outputs::catalog;
use crate::scrapers::titan;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};

/// Everything the driver needs for one run. Paths and the URL prefix are
/// passed in explicitly so tests can substitute their own stores.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Input CSV holding candidate URLs.
    pub input_path: PathBuf,
    /// Output CSV catalog, created on first append.
    pub output_path: PathBuf,
    /// Prefix a cell must start with to be treated as a candidate.
    pub url_prefix: String,
    /// Zero-based column index of the candidate URLs.
    pub url_column: usize,
}

/// Per-run outcome counts, logged at completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows scraped and persisted to the catalog.
    pub scraped: usize,
    /// Candidate rows that failed to fetch, extract, or persist.
    pub failed: usize,
    /// Rows with a value that did not match the URL prefix.
    pub skipped_non_matching: usize,
    /// Rows with an empty or missing cell.
    pub skipped_empty: usize,
}

/// Run one batch over the input store.
///
/// # Errors
///
/// Returns an error only when the input store cannot be opened or read,
/// or the HTTP client cannot be built. Everything past that point is
/// per-row and merely counted.
#[instrument(level = "info", skip_all, fields(input = %config.input_path.display()))]
pub async fn run_batch(config: &BatchConfig) -> Result<BatchSummary, Box<dyn Error>> {
    let cells = inputs::read_url_cells(&config.input_path, config.url_column)?;
    info!(rows = cells.len(), "Loaded input store");

    let client = titan::build_client()?;
    let mut summary = BatchSummary::default();

    for (index, cell) in cells.iter().enumerate() {
        let row = index + 1;
        match inputs::classify_cell(cell.as_deref(), &config.url_prefix) {
            CellClass::Candidate(url) => {
                info!(row, %url, "Processing URL");
                match titan::scrape_product(&client, &url).await {
                    Ok(product) => match catalog::append_record(&product, &config.output_path) {
                        Ok(()) => summary.scraped += 1,
                        Err(e) => {
                            error!(row, %url, error = %e, "Failed to save record; continuing");
                            summary.failed += 1;
                        }
                    },
                    Err(e) => {
                        error!(row, %url, error = %e, "Failed to scrape product information");
                        summary.failed += 1;
                    }
                }
            }
            CellClass::NonMatching(value) => {
                info!(row, value = %value, "Skipping non-matching link");
                summary.skipped_non_matching += 1;
            }
            CellClass::Empty => {
                debug!(row, "Skipping empty cell");
                summary.skipped_empty += 1;
            }
        }
    }

    Ok(summary)
}
