//! Product page scrapers.
//!
//! One retailer is supported: Titan Fittings ([`titan`]). The scraper
//! follows a two-phase pattern per page:
//!
//! 1. **Fetching**: Download the raw markup with a browser-like header set
//! 2. **Extraction**: Apply an ordered list of selector rules to pull out
//!    the product title and primary image URL
//!
//! Scrapers use:
//! - A single attempt per URL with a fixed timeout
//! - Graceful error handling (a failed page is logged and skipped by the driver)
//! - Best-effort image resolution (a missing image is recorded, not an error)

use reqwest::StatusCode;
use thiserror::Error;

pub mod titan;

/// Errors surfaced while fetching or extracting a single product page.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The HTTP request itself failed (DNS, connection, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// No title could be resolved by any selector rule.
    #[error("could not find product title on page")]
    MissingTitle,
}
