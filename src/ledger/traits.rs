//! Ledger traits and error types
//!
//! This module defines the trait interface for ledger backends and
//! associated error types.

use crate::record::AchievementRecord;
use thiserror::Error;

/// Errors that can occur during ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger header has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Invalid id value in last row: '{0}'")]
    InvalidId(String),

    #[error("Last row has no value for column {0}")]
    ShortRow(usize),

    #[error("Ledger is not valid UTF-8")]
    Encoding,
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Trait for ledger backend implementations
///
/// A ledger is append-only: rows are never rewritten or reordered, and it
/// performs no deduplication of its own.
pub trait Ledger {
    /// Returns the highest recorded ID, or 0 when there is no prior progress
    ///
    /// Never fails: unreadable or malformed ledgers resolve to 0.
    fn resume_point(&self) -> u64;

    /// Appends records in order
    ///
    /// An empty slice is a no-op and must not touch the backing store.
    ///
    /// # Returns
    ///
    /// The number of records written
    fn append(&mut self, records: &[AchievementRecord]) -> LedgerResult<usize>;
}
