//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so a run without a file uses
//! [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use hmv_achievements::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Retries per ID: {}", config.crawler.max_retry);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    expand_url_template, Config, CrawlerConfig, OutputConfig, UserAgentConfig,
    DEFAULT_LEDGER_PATH, DEFAULT_URL_TEMPLATE, ID_PLACEHOLDER,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
