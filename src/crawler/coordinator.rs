//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop, which:
//! - Resolves the start ID from the ledger (or an explicit override)
//! - Fetches and parses one ID at a time, retrying failed attempts
//! - Buffers accepted records and flushes them to the ledger in batches
//! - Stops on exhaustion, on the ID cap, or when a shutdown is requested,
//!   always flushing the remaining buffer first

use crate::config::CrawlerConfig;
use crate::crawler::events::{AttemptFailure, CrawlEvent, CrawlObserver};
use crate::crawler::fetcher::{FetchResult, PageSource};
use crate::crawler::parser::parse_achievement;
use crate::ledger::Ledger;
use crate::record::AchievementRecord;
use crate::state::{CrawlCursor, TerminationReason};
use tokio::sync::watch;

/// Result of a completed crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// First ID attempted
    pub start_id: u64,

    /// ID the crawl stopped at; the next attempt would use this ID
    pub next_id: u64,

    /// Records accepted during this run
    pub new_records: u64,

    pub reason: TerminationReason,
}

impl CrawlSummary {
    pub fn interrupted(&self) -> bool {
        self.reason == TerminationReason::Interrupted
    }
}

/// The ID a crawl starts at: the override when given, else the ID after the
/// ledger's resume point
pub fn resolve_start_id(start_id: Option<u64>, resume_point: u64) -> u64 {
    start_id.unwrap_or(resume_point + 1)
}

/// Outcome of all attempts for one ID
enum IdOutcome {
    Accepted {
        record: AchievementRecord,
        attempt: u32,
    },
    Exhausted,
    Interrupted,
}

/// Main crawler structure
pub struct Crawler<S, L> {
    config: CrawlerConfig,
    source: S,
    ledger: L,
}

impl<S, L> Crawler<S, L>
where
    S: PageSource,
    L: Ledger,
{
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `config` - Retry, exhaustion, and batching thresholds
    /// * `source` - Where pages are fetched from
    /// * `ledger` - Where accepted records go
    pub fn new(config: CrawlerConfig, source: S, ledger: L) -> Self {
        Self {
            config,
            source,
            ledger,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_ledger(self) -> L {
        self.ledger
    }

    /// Runs the crawl loop until it terminates
    ///
    /// The shutdown flag is checked before every fetch attempt, so an
    /// in-flight request always completes. However the loop ends, buffered
    /// records are flushed before returning.
    ///
    /// # Arguments
    ///
    /// * `start_id` - Overrides the ledger's resume point when set
    /// * `shutdown` - Becomes `true` when the crawl should stop
    /// * `observer` - Receives every crawl event
    pub async fn crawl(
        &mut self,
        start_id: Option<u64>,
        shutdown: &watch::Receiver<bool>,
        observer: &mut dyn CrawlObserver,
    ) -> CrawlSummary {
        let resume_point = self.ledger.resume_point();
        let start_id = resolve_start_id(start_id, resume_point);
        let mut cursor = CrawlCursor::new(start_id, &self.config);

        tracing::info!(start_id, resume_point, "Starting crawl");
        observer.on_event(&CrawlEvent::Started {
            start_id,
            resume_point,
        });

        let reason = loop {
            if let Some(reason) = cursor.phase().reason() {
                break reason;
            }

            let id = cursor.current();
            match self.process_id(id, shutdown, observer).await {
                IdOutcome::Accepted { record, attempt } => {
                    observer.on_event(&CrawlEvent::Accepted {
                        record: record.clone(),
                        attempt,
                    });
                    if let Some(batch) = cursor.accept(record) {
                        self.flush(&batch, false, observer);
                    }
                }
                IdOutcome::Exhausted => {
                    let exhaustion = cursor.exhaust();
                    observer.on_event(&CrawlEvent::IdExhausted {
                        id: exhaustion.id,
                        max_retry: self.config.max_retry,
                        consecutive_empty: exhaustion.consecutive_empty,
                        empty_limit: self.config.empty_limit,
                    });
                }
                IdOutcome::Interrupted => cursor.interrupt(),
            }
        };

        observer.on_event(&CrawlEvent::Stopped {
            reason,
            id: cursor.current(),
        });

        let remaining = cursor.drain();
        self.flush(&remaining, true, observer);

        tracing::info!(
            new_records = cursor.accepted(),
            reason = %reason,
            "Crawl finished"
        );
        observer.on_event(&CrawlEvent::Finished {
            new_records: cursor.accepted(),
        });

        CrawlSummary {
            start_id,
            next_id: cursor.current(),
            new_records: cursor.accepted(),
            reason,
        }
    }

    /// Makes up to `max_retry` attempts at one ID
    ///
    /// Network errors, non-200 responses, and pages without a valid record all
    /// consume an attempt alike.
    async fn process_id(
        &self,
        id: u64,
        shutdown: &watch::Receiver<bool>,
        observer: &mut dyn CrawlObserver,
    ) -> IdOutcome {
        let max_retry = self.config.max_retry;

        for attempt in 1..=max_retry {
            if *shutdown.borrow() {
                return IdOutcome::Interrupted;
            }

            let failure = match self.source.fetch(id).await {
                FetchResult::Success { body, .. } => match parse_achievement(&body, id) {
                    Some(record) => return IdOutcome::Accepted { record, attempt },
                    None => AttemptFailure::NoData,
                },
                FetchResult::HttpError { status_code } => AttemptFailure::Http(status_code),
                FetchResult::NetworkError { error } => AttemptFailure::Network(error),
            };

            tracing::debug!(id, attempt, max_retry, "Attempt failed: {}", failure);
            observer.on_event(&CrawlEvent::AttemptFailed {
                id,
                attempt,
                max_retry,
                failure,
            });
        }

        IdOutcome::Exhausted
    }

    /// Writes a batch to the ledger
    ///
    /// Write errors are reported and the batch is dropped.
    fn flush(
        &mut self,
        batch: &[AchievementRecord],
        final_batch: bool,
        observer: &mut dyn CrawlObserver,
    ) {
        if batch.is_empty() {
            return;
        }

        match self.ledger.append(batch) {
            Ok(count) => observer.on_event(&CrawlEvent::BatchSaved { count, final_batch }),
            Err(e) => {
                tracing::error!("Failed to save {} records: {}", batch.len(), e);
                observer.on_event(&CrawlEvent::BatchSaveFailed {
                    count: batch.len(),
                    error: e.to_string(),
                });
            }
        }
    }
}
