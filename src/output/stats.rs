//! Statistics generation from the ledger
//!
//! This module provides functionality for extracting and displaying
//! statistics from the whole CSV ledger.

use crate::ledger::{CsvLedger, Ledger};
use crate::record::Difficulty;
use std::collections::{HashMap, HashSet};

/// Ledger statistics summary
#[derive(Debug, Clone, Default)]
pub struct LedgerStatistics {
    /// Number of data rows
    pub total_records: u64,

    /// ID of the last row, where the next run resumes
    pub resume_point: u64,

    pub min_id: Option<u64>,
    pub max_id: Option<u64>,

    /// Count of records by difficulty
    pub by_difficulty: HashMap<Difficulty, u64>,

    /// Number of distinct nicknames
    pub unique_users: u64,

    /// Number of distinct item titles
    pub unique_titles: u64,
}

/// Loads statistics from the ledger
///
/// # Arguments
///
/// * `ledger` - The ledger to read
///
/// # Returns
///
/// * `Ok(LedgerStatistics)` - Successfully loaded statistics
/// * `Err(AchievementError::Ledger)` - A row could not be read
pub fn load_statistics(ledger: &CsvLedger) -> crate::Result<LedgerStatistics> {
    let records = ledger.records()?;

    let mut by_difficulty = HashMap::new();
    let mut users = HashSet::new();
    let mut titles = HashSet::new();

    for record in &records {
        *by_difficulty.entry(record.difficulty).or_insert(0) += 1;
        users.insert(record.nickname.as_str());
        titles.insert(record.vm_title.as_str());
    }

    Ok(LedgerStatistics {
        total_records: records.len() as u64,
        resume_point: ledger.resume_point(),
        min_id: records.iter().map(|r| r.id).min(),
        max_id: records.iter().map(|r| r.id).max(),
        by_difficulty,
        unique_users: users.len() as u64,
        unique_titles: titles.len() as u64,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &LedgerStatistics) {
    println!("=== Ledger Statistics ===\n");

    println!("Overview:");
    println!("  Total records: {}", stats.total_records);
    println!("  Unique users: {}", stats.unique_users);
    println!("  Unique titles: {}", stats.unique_titles);
    if let (Some(min), Some(max)) = (stats.min_id, stats.max_id) {
        println!("  ID range: {} - {}", min, max);
    }
    println!("  Next run starts at ID: {}", stats.resume_point + 1);
    println!();

    println!("Records by Difficulty:");
    for difficulty in [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Unknown,
    ] {
        let count = stats.by_difficulty.get(&difficulty).copied().unwrap_or(0);
        let percentage = if stats.total_records > 0 {
            (count as f64 / stats.total_records as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", difficulty, count, percentage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AchievementRecord;
    use tempfile::tempdir;

    fn record(id: u64, nickname: &str, vm_title: &str, difficulty: Difficulty) -> AchievementRecord {
        AchievementRecord {
            id,
            nickname: nickname.to_string(),
            date: String::new(),
            vm_title: vm_title.to_string(),
            difficulty,
            rank: String::new(),
        }
    }

    #[test]
    fn test_statistics_of_missing_ledger() {
        let dir = tempdir().unwrap();
        let ledger = CsvLedger::new(dir.path().join("achievements.csv"));
        let stats = load_statistics(&ledger).unwrap();

        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.resume_point, 0);
        assert_eq!(stats.min_id, None);
    }

    #[test]
    fn test_unreadable_row_is_a_ledger_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("achievements.csv");
        std::fs::write(
            &path,
            format!("{}\nnot-a-number,a,d,T,easy,\n", AchievementRecord::HEADER.join(",")),
        )
        .unwrap();

        let result = load_statistics(&CsvLedger::open(&path));
        assert!(matches!(result, Err(crate::AchievementError::Ledger(_))));
    }

    #[test]
    fn test_statistics_counts() {
        let dir = tempdir().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("achievements.csv"));
        ledger
            .append(&[
                record(3, "alice", "Zino", Difficulty::Easy),
                record(9, "bob", "Zino", Difficulty::Hard),
                record(5, "alice", "Gift", Difficulty::Easy),
            ])
            .unwrap();

        let stats = load_statistics(&ledger).unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.resume_point, 5);
        assert_eq!(stats.min_id, Some(3));
        assert_eq!(stats.max_id, Some(9));
        assert_eq!(stats.by_difficulty.get(&Difficulty::Easy), Some(&2));
        assert_eq!(stats.by_difficulty.get(&Difficulty::Medium), None);
        assert_eq!(stats.unique_users, 2);
        assert_eq!(stats.unique_titles, 2);
    }
}
