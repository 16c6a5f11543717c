//! Crawler module for achievement page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageSource` seam
//! - HTML parsing into achievement records
//! - The crawl loop with its retry, exhaustion, and batching policy
//! - Crawl events for observers

mod coordinator;
mod events;
mod fetcher;
mod parser;

pub use coordinator::{resolve_start_id, CrawlSummary, Crawler};
pub use events::{AttemptFailure, CrawlEvent, CrawlObserver, NoopObserver};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageSource};
pub use parser::parse_achievement;

use crate::config::Config;
use crate::ledger::CsvLedger;
use crate::AchievementError;
use tokio::sync::watch;

/// Runs a complete crawl against the configured site and ledger
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Open the CSV ledger (creating its directory if needed)
/// 2. Build the HTTP client
/// 3. Run the crawl loop until it terminates
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_id` - Overrides the ledger's resume point when set
/// * `shutdown` - Becomes `true` when the crawl should stop
/// * `observer` - Receives every crawl event
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The crawl ran to termination
/// * `Err(AchievementError)` - The HTTP client could not be built
pub async fn crawl(
    config: &Config,
    start_id: Option<u64>,
    shutdown: &watch::Receiver<bool>,
    observer: &mut dyn CrawlObserver,
) -> Result<CrawlSummary, AchievementError> {
    let source = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;
    let ledger = CsvLedger::new(&config.output.ledger_path);
    let mut crawler = Crawler::new(config.crawler.clone(), source, ledger);
    Ok(crawler.crawl(start_id, shutdown, observer).await)
}
