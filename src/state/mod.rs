//! State module for tracking crawl progress
//!
//! This module holds the in-memory state of a single run. Nothing here is
//! persisted; the ledger is the only state carried between runs.
//!
//! # Components
//!
//! - `CrawlPhase`: Running or terminated, with the termination reason
//! - `CrawlCursor`: The ID cursor, consecutive-empty counter, and batch buffer

mod cursor;
mod phase;

// Re-export main types
pub use cursor::{CrawlCursor, Exhaustion};
pub use phase::{CrawlPhase, TerminationReason};
