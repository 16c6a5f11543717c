//! Output module for crawl observers and ledger reports
//!
//! This module handles:
//! - The timestamped action log
//! - Human-readable progress lines for verbose runs
//! - Per-run counters and ledger statistics

mod action_log;
mod progress;
mod run_stats;
pub mod stats;

pub use action_log::ActionLog;
pub use progress::ProgressReporter;
pub use run_stats::CrawlStats;
pub use stats::{load_statistics, print_statistics, LedgerStatistics};

use crate::crawler::{CrawlEvent, CrawlObserver};

/// Forwards every event to each registered observer, in registration order
#[derive(Default)]
pub struct Observers<'a> {
    observers: Vec<&'a mut dyn CrawlObserver>,
}

impl<'a> Observers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: &'a mut dyn CrawlObserver) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl CrawlObserver for Observers<'_> {
    fn on_event(&mut self, event: &CrawlEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observers_fan_out() {
        let mut first: Vec<CrawlEvent> = Vec::new();
        let mut second: Vec<CrawlEvent> = Vec::new();
        {
            let mut observers = Observers::new();
            observers.push(&mut first);
            observers.push(&mut second);
            assert_eq!(observers.len(), 2);
            observers.on_event(&CrawlEvent::Finished { new_records: 4 });
        }
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
