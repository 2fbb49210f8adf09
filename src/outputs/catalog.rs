//! CSV catalog sink for scraped product records.
//!
//! The catalog is append-only from this program's point of view: existing
//! rows are never inspected or rewritten, only carried along. Each append
//! is a self-contained load-modify-save pass, so no store handle survives
//! between rows.
//!
//! # Store format
//!
//! ```text
//! Product Title,Image URL,Product URL,Date Added
//! Titan 2" Camlock Coupler,https://…/coupler.jpg,https://…/p/1,2025-04-04 09:12:45
//! ```
//!
//! An unreadable existing file is treated the same as a missing one: the
//! store is started fresh with the header row.

use crate::models::{CatalogRow, ProductInfo};
use chrono::Local;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append one scraped record to the catalog at `path`.
///
/// Loads the existing store (tolerating any load failure by treating the
/// store as absent), adds a row built from `info` plus a freshly generated
/// local timestamp, and persists the whole store back to the same path.
///
/// # Errors
///
/// Returns an error if the store cannot be written. Callers log the
/// failure and continue; one lost row does not abort a batch.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn append_record(info: &ProductInfo, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut rows = load_rows(path);
    rows.push(CatalogRow {
        title: info.title.clone(),
        image_url: info.image_url.clone(),
        product_url: info.product_url.clone(),
        date_added: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    });

    let mut writer = csv::Writer::from_path(path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(total_rows = rows.len(), "Saved record to catalog");
    Ok(())
}

/// Load all existing catalog rows, or an empty list when the store is
/// missing or unreadable.
fn load_rows(path: &Path) -> Vec<CatalogRow> {
    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            debug!(error = %e, "No existing catalog; starting a new one");
            return Vec::new();
        }
    };

    match reader.deserialize().collect::<Result<Vec<CatalogRow>, _>>() {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Existing catalog is unreadable; starting a new one");
            Vec::new()
        }
    }
}
