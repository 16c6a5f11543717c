//! Crawl events and the observer interface
//!
//! The crawl loop reports everything it does as a [`CrawlEvent`]. Logging and
//! progress output subscribe through [`CrawlObserver`] and never influence the
//! loop's decisions.

use crate::record::AchievementRecord;
use crate::state::TerminationReason;
use std::fmt;

/// Why a single fetch attempt produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The request never got a response
    Network(String),

    /// A response other than HTTP 200
    Http(u16),

    /// HTTP 200, but the page held no valid record
    NoData,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(error) => write!(f, "network error: {}", error),
            Self::Http(status_code) => write!(f, "HTTP {}", status_code),
            Self::NoData => f.write_str("no data"),
        }
    }
}

/// Something the crawl loop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    Started {
        start_id: u64,
        /// Last ID found in the ledger, 0 when there was none
        resume_point: u64,
    },

    AttemptFailed {
        id: u64,
        attempt: u32,
        max_retry: u32,
        failure: AttemptFailure,
    },

    Accepted {
        record: AchievementRecord,
        attempt: u32,
    },

    /// Every attempt for `id` failed
    IdExhausted {
        id: u64,
        max_retry: u32,
        consecutive_empty: u32,
        empty_limit: u32,
    },

    BatchSaved {
        count: usize,
        final_batch: bool,
    },

    /// The batch is lost; the crawl carries on
    BatchSaveFailed {
        count: usize,
        error: String,
    },

    Stopped {
        reason: TerminationReason,
        /// ID the crawl stopped at
        id: u64,
    },

    Finished {
        new_records: u64,
    },
}

impl fmt::Display for CrawlEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { start_id, .. } => write!(f, "Start crawl from ID {}", start_id),
            Self::AttemptFailed {
                id,
                attempt,
                max_retry,
                failure,
            } => write!(f, "{}: {} (retry {}/{})", id, failure, attempt, max_retry),
            Self::Accepted { record, .. } => write!(
                f,
                "Found ID {} - {} - {}",
                record.id, record.nickname, record.vm_title
            ),
            Self::IdExhausted {
                id,
                max_retry,
                consecutive_empty,
                empty_limit,
            } => write!(
                f,
                "{}: failed after {} retries. ({}/{})",
                id, max_retry, consecutive_empty, empty_limit
            ),
            Self::BatchSaved { count, final_batch } => {
                if *final_batch {
                    write!(f, "Final batch saved {} records to CSV.", count)
                } else {
                    write!(f, "Batch saved {} records to CSV.", count)
                }
            }
            Self::BatchSaveFailed { count, error } => {
                write!(f, "Error saving {} records to CSV: {}", count, error)
            }
            Self::Stopped { reason, id } => match reason {
                TerminationReason::Exhausted => {
                    write!(f, "Reached consecutive empty page limit at ID {}, stopping.", id)
                }
                TerminationReason::IdLimit => write!(f, "Reached ID limit at ID {}, stopping.", id),
                TerminationReason::Interrupted => write!(f, "Interrupted at ID {}, stopping.", id),
            },
            Self::Finished { new_records } => {
                write!(f, "Crawl finished. New records: {}", new_records)
            }
        }
    }
}

/// Receives crawl events as they happen
pub trait CrawlObserver {
    fn on_event(&mut self, event: &CrawlEvent);
}

/// Records every event, in order
impl CrawlObserver for Vec<CrawlEvent> {
    fn on_event(&mut self, event: &CrawlEvent) {
        self.push(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {
    fn on_event(&mut self, _event: &CrawlEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Difficulty;

    #[test]
    fn test_attempt_failed_display() {
        let event = CrawlEvent::AttemptFailed {
            id: 34001,
            attempt: 2,
            max_retry: 3,
            failure: AttemptFailure::Http(503),
        };
        assert_eq!(event.to_string(), "34001: HTTP 503 (retry 2/3)");

        let event = CrawlEvent::AttemptFailed {
            id: 5,
            attempt: 1,
            max_retry: 3,
            failure: AttemptFailure::NoData,
        };
        assert_eq!(event.to_string(), "5: no data (retry 1/3)");
    }

    #[test]
    fn test_accepted_and_exhausted_display() {
        let record = AchievementRecord {
            id: 42,
            nickname: "alice".to_string(),
            date: String::new(),
            vm_title: "Zino".to_string(),
            difficulty: Difficulty::Medium,
            rank: "7".to_string(),
        };
        let event = CrawlEvent::Accepted { record, attempt: 1 };
        assert_eq!(event.to_string(), "Found ID 42 - alice - Zino");

        let event = CrawlEvent::IdExhausted {
            id: 9,
            max_retry: 3,
            consecutive_empty: 4,
            empty_limit: 10,
        };
        assert_eq!(event.to_string(), "9: failed after 3 retries. (4/10)");
    }

    #[test]
    fn test_batch_display() {
        let saved = CrawlEvent::BatchSaved {
            count: 50,
            final_batch: false,
        };
        assert_eq!(saved.to_string(), "Batch saved 50 records to CSV.");

        let last = CrawlEvent::BatchSaved {
            count: 3,
            final_batch: true,
        };
        assert_eq!(last.to_string(), "Final batch saved 3 records to CSV.");
    }

    #[test]
    fn test_vec_observer_records_in_order() {
        let mut events: Vec<CrawlEvent> = Vec::new();
        events.on_event(&CrawlEvent::Finished { new_records: 1 });
        events.on_event(&CrawlEvent::Finished { new_records: 2 });
        assert_eq!(
            events,
            vec![
                CrawlEvent::Finished { new_records: 1 },
                CrawlEvent::Finished { new_records: 2 },
            ]
        );
    }
}
