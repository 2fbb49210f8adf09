//! Output sinks for scraped records.
//!
//! One sink is implemented: the CSV catalog ([`catalog`]), an append-only
//! store that is loaded, extended by one row, and written back per record.

pub mod catalog;
