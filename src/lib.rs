//! HMV Achievements: a resumable achievement ledger crawler
//!
//! This crate walks achievement pages by numeric ID, extracts the earned
//! achievement from each page, and appends accepted records to a CSV ledger
//! that later runs resume from.

pub mod config;
pub mod crawler;
pub mod ledger;
pub mod output;
pub mod record;
pub mod state;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum AchievementError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL template: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, AchievementError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, CrawlSummary};
pub use ledger::{CsvLedger, Ledger};
pub use record::{AchievementRecord, Difficulty};
pub use state::TerminationReason;
