//! Per-run crawl counters
//!
//! `CrawlStats` tallies crawl events as they happen; it's printed at the end
//! of a verbose run.

use crate::crawler::{AttemptFailure, CrawlEvent, CrawlObserver};
use crate::state::TerminationReason;

/// Counters for one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Fetch attempts made, successful or not
    pub attempts: u64,

    pub network_errors: u64,
    pub http_errors: u64,

    /// HTTP 200 pages without a valid record
    pub empty_pages: u64,

    pub accepted: u64,

    /// IDs that used up every retry
    pub exhausted_ids: u64,

    pub batches_saved: u64,
    pub records_saved: u64,
    pub batches_failed: u64,

    /// Records lost to failed ledger writes
    pub records_lost: u64,

    pub reason: Option<TerminationReason>,
}

impl CrawlObserver for CrawlStats {
    fn on_event(&mut self, event: &CrawlEvent) {
        match event {
            CrawlEvent::AttemptFailed { failure, .. } => {
                self.attempts += 1;
                match failure {
                    AttemptFailure::Network(_) => self.network_errors += 1,
                    AttemptFailure::Http(_) => self.http_errors += 1,
                    AttemptFailure::NoData => self.empty_pages += 1,
                }
            }
            CrawlEvent::Accepted { .. } => {
                self.attempts += 1;
                self.accepted += 1;
            }
            CrawlEvent::IdExhausted { .. } => self.exhausted_ids += 1,
            CrawlEvent::BatchSaved { count, .. } => {
                self.batches_saved += 1;
                self.records_saved += *count as u64;
            }
            CrawlEvent::BatchSaveFailed { count, .. } => {
                self.batches_failed += 1;
                self.records_lost += *count as u64;
            }
            CrawlEvent::Stopped { reason, .. } => self.reason = Some(*reason),
            CrawlEvent::Started { .. } | CrawlEvent::Finished { .. } => {}
        }
    }
}

impl CrawlStats {
    /// Prints the counters to stdout in a formatted manner
    pub fn print(&self) {
        println!("=== Crawl Statistics ===\n");

        println!("Attempts:");
        println!("  Total fetch attempts: {}", self.attempts);
        println!("  Network errors: {}", self.network_errors);
        println!("  HTTP errors: {}", self.http_errors);
        println!("  Pages without data: {}", self.empty_pages);
        println!();

        println!("Records:");
        println!("  Accepted: {}", self.accepted);
        println!("  Exhausted IDs: {}", self.exhausted_ids);
        println!(
            "  Saved: {} in {} batches",
            self.records_saved, self.batches_saved
        );
        if self.batches_failed > 0 {
            println!(
                "  Lost: {} in {} failed batches",
                self.records_lost, self.batches_failed
            );
        }
        println!();

        if let Some(reason) = self.reason {
            println!("Stopped: {}", reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = CrawlStats::default();
        for failure in [
            AttemptFailure::Network("reset".to_string()),
            AttemptFailure::Http(502),
            AttemptFailure::NoData,
        ] {
            stats.on_event(&CrawlEvent::AttemptFailed {
                id: 1,
                attempt: 1,
                max_retry: 3,
                failure,
            });
        }
        stats.on_event(&CrawlEvent::IdExhausted {
            id: 1,
            max_retry: 3,
            consecutive_empty: 1,
            empty_limit: 10,
        });
        stats.on_event(&CrawlEvent::BatchSaved {
            count: 50,
            final_batch: false,
        });
        stats.on_event(&CrawlEvent::BatchSaveFailed {
            count: 7,
            error: "disk full".to_string(),
        });
        stats.on_event(&CrawlEvent::Stopped {
            reason: TerminationReason::Exhausted,
            id: 2,
        });

        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.network_errors, 1);
        assert_eq!(stats.http_errors, 1);
        assert_eq!(stats.empty_pages, 1);
        assert_eq!(stats.exhausted_ids, 1);
        assert_eq!(stats.records_saved, 50);
        assert_eq!(stats.records_lost, 7);
        assert_eq!(stats.reason, Some(TerminationReason::Exhausted));
    }
}
