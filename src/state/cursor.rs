//! Crawl cursor: the decision core of the crawl loop
//!
//! `CrawlCursor` owns the ID cursor, the consecutive-empty counter, and the
//! batch buffer. It decides when to flush and when to stop, but does no I/O.

use crate::config::CrawlerConfig;
use crate::record::AchievementRecord;
use crate::state::phase::{CrawlPhase, TerminationReason};

/// Outcome of an ID that used up its retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhaustion {
    /// The ID that yielded nothing
    pub id: u64,

    /// Consecutive empty IDs, including this one
    pub consecutive_empty: u32,

    /// Whether this ID ended the crawl
    pub terminated: bool,
}

/// In-memory state of one run
#[derive(Debug, Clone)]
pub struct CrawlCursor {
    next_id: u64,
    consecutive_empty: u32,
    attempted: u64,
    accepted: u64,
    batch: Vec<AchievementRecord>,
    phase: CrawlPhase,

    empty_limit: u32,
    batch_size: usize,
    exhaustion_floor: u64,
    max_ids: Option<u64>,
}

impl CrawlCursor {
    pub fn new(start_id: u64, config: &CrawlerConfig) -> Self {
        Self {
            next_id: start_id,
            consecutive_empty: 0,
            attempted: 0,
            accepted: 0,
            batch: Vec::with_capacity(config.batch_size),
            phase: CrawlPhase::Running,
            empty_limit: config.empty_limit,
            batch_size: config.batch_size.max(1),
            exhaustion_floor: config.exhaustion_floor,
            max_ids: config.max_ids,
        }
    }

    /// The next ID to attempt
    pub fn current(&self) -> u64 {
        self.next_id
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn consecutive_empty(&self) -> u32 {
        self.consecutive_empty
    }

    /// IDs finished so far, accepted or exhausted
    pub fn attempted(&self) -> u64 {
        self.attempted
    }

    /// Records accepted so far, whether or not they have been flushed
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Records waiting for the next flush
    pub fn buffered(&self) -> usize {
        self.batch.len()
    }

    /// Accepts the record for the current ID and moves to the next one
    ///
    /// # Returns
    ///
    /// The full batch when it reached `batch_size` and must be flushed now
    pub fn accept(&mut self, record: AchievementRecord) -> Option<Vec<AchievementRecord>> {
        self.consecutive_empty = 0;
        self.accepted += 1;
        self.batch.push(record);
        self.advance();

        if self.batch.len() >= self.batch_size {
            Some(std::mem::replace(
                &mut self.batch,
                Vec::with_capacity(self.batch_size),
            ))
        } else {
            None
        }
    }

    /// Records that the current ID exhausted its retries and moves on
    ///
    /// Terminates once `empty_limit` consecutive IDs came up empty, but never
    /// for an ID below the exhaustion floor.
    pub fn exhaust(&mut self) -> Exhaustion {
        let id = self.next_id;
        self.consecutive_empty += 1;

        let terminated =
            self.consecutive_empty >= self.empty_limit && id >= self.exhaustion_floor;
        if terminated {
            self.terminate(TerminationReason::Exhausted);
        }
        self.advance();

        Exhaustion {
            id,
            consecutive_empty: self.consecutive_empty,
            terminated,
        }
    }

    /// Stops the crawl at the current ID without advancing
    pub fn interrupt(&mut self) {
        self.terminate(TerminationReason::Interrupted);
    }

    /// Takes whatever is left in the buffer
    pub fn drain(&mut self) -> Vec<AchievementRecord> {
        std::mem::take(&mut self.batch)
    }

    fn advance(&mut self) {
        self.next_id += 1;
        self.attempted += 1;

        if let Some(max_ids) = self.max_ids {
            if self.attempted >= max_ids {
                self.terminate(TerminationReason::IdLimit);
            }
        }
    }

    /// The first termination wins
    fn terminate(&mut self, reason: TerminationReason) {
        if !self.phase.is_terminal() {
            self.phase = CrawlPhase::Terminated(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Difficulty;

    fn config(empty_limit: u32, batch_size: usize, exhaustion_floor: u64) -> CrawlerConfig {
        CrawlerConfig {
            empty_limit,
            batch_size,
            exhaustion_floor,
            ..CrawlerConfig::default()
        }
    }

    fn record(id: u64) -> AchievementRecord {
        AchievementRecord {
            id,
            nickname: "alice".to_string(),
            date: String::new(),
            vm_title: "Zino".to_string(),
            difficulty: Difficulty::Unknown,
            rank: String::new(),
        }
    }

    #[test]
    fn test_cursor_advances_on_every_outcome() {
        let mut cursor = CrawlCursor::new(7, &config(10, 50, 0));
        cursor.accept(record(7));
        assert_eq!(cursor.current(), 8);
        cursor.exhaust();
        assert_eq!(cursor.current(), 9);
        assert_eq!(cursor.attempted(), 2);
    }

    #[test]
    fn test_exhaustion_terminates_at_limit() {
        let mut cursor = CrawlCursor::new(100, &config(3, 50, 0));

        assert!(!cursor.exhaust().terminated);
        assert!(!cursor.exhaust().terminated);
        let last = cursor.exhaust();
        assert_eq!(
            last,
            Exhaustion {
                id: 102,
                consecutive_empty: 3,
                terminated: true
            }
        );
        assert_eq!(
            cursor.phase(),
            CrawlPhase::Terminated(TerminationReason::Exhausted)
        );
    }

    #[test]
    fn test_acceptance_resets_empty_counter() {
        let mut cursor = CrawlCursor::new(100, &config(3, 50, 0));
        cursor.exhaust();
        cursor.exhaust();
        cursor.accept(record(102));
        assert_eq!(cursor.consecutive_empty(), 0);

        cursor.exhaust();
        cursor.exhaust();
        assert_eq!(cursor.phase(), CrawlPhase::Running);
        assert!(cursor.exhaust().terminated);
    }

    #[test]
    fn test_exhaustion_suppressed_below_floor() {
        let mut cursor = CrawlCursor::new(33990, &config(3, 50, 34000));

        for _ in 0..10 {
            assert!(!cursor.exhaust().terminated);
        }
        assert_eq!(cursor.current(), 34000);
        assert_eq!(cursor.consecutive_empty(), 10);

        // Counter kept growing below the floor, so the first ID at the floor stops
        let at_floor = cursor.exhaust();
        assert_eq!(at_floor.id, 34000);
        assert!(at_floor.terminated);
    }

    #[test]
    fn test_batch_released_when_full() {
        let mut cursor = CrawlCursor::new(1, &config(10, 3, 0));

        assert!(cursor.accept(record(1)).is_none());
        assert!(cursor.accept(record(2)).is_none());
        let batch = cursor.accept(record(3)).unwrap();
        assert_eq!(batch.iter().map(|r| r.id).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(cursor.buffered(), 0);

        cursor.accept(record(4));
        assert_eq!(cursor.drain(), vec![record(4)]);
        assert_eq!(cursor.accepted(), 4);
    }

    #[test]
    fn test_id_limit_terminates() {
        let mut settings = config(10, 50, 0);
        settings.max_ids = Some(2);
        let mut cursor = CrawlCursor::new(1, &settings);

        cursor.accept(record(1));
        assert_eq!(cursor.phase(), CrawlPhase::Running);
        cursor.exhaust();
        assert_eq!(
            cursor.phase(),
            CrawlPhase::Terminated(TerminationReason::IdLimit)
        );
    }

    #[test]
    fn test_interrupt_keeps_cursor_and_first_reason_wins() {
        let mut cursor = CrawlCursor::new(5, &config(1, 50, 0));
        cursor.interrupt();
        assert_eq!(cursor.current(), 5);

        cursor.exhaust();
        assert_eq!(
            cursor.phase(),
            CrawlPhase::Terminated(TerminationReason::Interrupted)
        );
    }
}
