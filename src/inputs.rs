//! Input-store reading and candidate classification.
//!
//! The input store is a CSV sheet whose column J (the 10th column) holds
//! candidate product URLs. Every row is read in sheet order, header
//! included; rows are never mutated or re-read. Each cell is classified
//! into one of three buckets the driver acts on: a candidate URL, a
//! non-matching value, or an empty cell.

use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// Zero-based index of column J, where the candidate URLs live.
pub const URL_COLUMN: usize = 9;

/// Classification of one input cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellClass {
    /// A URL under the retailer's base origin; run the scrape pipeline.
    Candidate(String),
    /// Present but not a matching URL; skipped and logged.
    NonMatching(String),
    /// Missing or empty cell (including rows too short to reach the column).
    Empty,
}

/// Classify a cell value against the candidate URL prefix.
pub fn classify_cell(cell: Option<&str>, url_prefix: &str) -> CellClass {
    match cell {
        Some(value) if value.starts_with(url_prefix) => CellClass::Candidate(value.to_string()),
        Some(value) if !value.is_empty() => CellClass::NonMatching(value.to_string()),
        _ => CellClass::Empty,
    }
}

/// Read the URL column from every row of the input store.
///
/// Rows narrower than `column` yield `None`. The reader is flexible about
/// row widths and does not treat the first row specially; like the sheet
/// it models, row 1 is just another row.
///
/// # Errors
///
/// Any failure to open or read the store is fatal for the run and is
/// propagated to the caller.
pub fn read_url_cells(path: &Path, column: usize) -> Result<Vec<Option<String>>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.push(record.get(column).map(str::to_string));
    }
    debug!(rows = cells.len(), path = %path.display(), "Read input store");
    Ok(cells)
}
