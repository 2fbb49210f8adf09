//! Command-line interface definitions for part_grabber.
//!
//! This module defines the CLI arguments using the `clap` crate. Both
//! paths default to the sheet names the batch was originally built
//! around, so running with no arguments works against the fixed files.

use clap::Parser;

/// Command-line arguments for the part_grabber scraper.
///
/// # Examples
///
/// ```sh
/// # Default paths (BOP.csv in, BOP_output_urls.csv out)
/// part_grabber
///
/// # Explicit paths
/// part_grabber -i links.csv -o scraped.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input CSV with candidate URLs in column J (the 10th column)
    #[arg(short, long, default_value = "BOP.csv")]
    pub input: String,

    /// Output CSV catalog to append scraped rows to
    #[arg(short, long, default_value = "BOP_output_urls.csv")]
    pub output: String,
}
