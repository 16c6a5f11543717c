//! Ledger module for persisting accepted records
//!
//! This module owns the on-disk CSV ledger, including:
//! - Resolving the resume point from the last recorded row
//! - Appending batches of records, writing the header on first write only
//! - Reading the full ledger back for statistics

mod csv_ledger;
mod traits;

pub use csv_ledger::CsvLedger;
pub use traits::{Ledger, LedgerError, LedgerResult};
