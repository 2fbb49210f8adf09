//! Data models for scraped products and the persisted catalog.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ProductInfo`]: what the extractor pulls out of one product page
//! - [`CatalogRow`]: one persisted row of the output catalog, header names included
//!
//! The catalog column names are fixed by the store format (`Product Title`,
//! `Image URL`, `Product URL`, `Date Added`), hence the serde renames.

use serde::{Deserialize, Serialize};

/// Placeholder value recorded when a product page has no resolvable image.
///
/// This is a deliberate "intentionally absent" marker, distinct from an
/// extraction error: a page without an image still produces a catalog row.
pub const NO_IMAGE: &str = "N/A";

/// Product details extracted from a single product page.
///
/// Produced by the extractor once per successfully fetched page and handed
/// to the record sink, which appends it to the catalog and drops it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    /// The product title. Mandatory; extraction fails without one.
    pub title: String,
    /// The primary image URL, or [`NO_IMAGE`] when none could be resolved.
    pub image_url: String,
    /// The product page URL this record was scraped from.
    pub product_url: String,
}

/// One row of the persisted catalog store.
///
/// The serde renames pin the CSV header row to the store's fixed column
/// names, so a freshly created store always starts with
/// `Product Title,Image URL,Product URL,Date Added`.
#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogRow {
    /// The product title.
    #[serde(rename = "Product Title")]
    pub title: String,
    /// The primary image URL, or [`NO_IMAGE`].
    #[serde(rename = "Image URL")]
    pub image_url: String,
    /// The product page the row was scraped from.
    #[serde(rename = "Product URL")]
    pub product_url: String,
    /// Local timestamp of the append, formatted `%Y-%m-%d %H:%M:%S`.
    #[serde(rename = "Date Added")]
    pub date_added: String,
}
