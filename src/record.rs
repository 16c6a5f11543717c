/// Achievement record definitions
///
/// One `AchievementRecord` is produced per successfully parsed page and
/// becomes one row of the ledger.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty class of the achieved item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Unknown,
}

impl Difficulty {
    /// Class names recognised on the item title, in match priority order
    pub const CLASSES: [(&'static str, Difficulty); 3] = [
        ("Easy", Difficulty::Easy),
        ("Medium", Difficulty::Medium),
        ("Hard", Difficulty::Hard),
    ];

    /// Picks the difficulty from an element's class list
    ///
    /// Matching is case-sensitive on the source class names. The first entry of
    /// [`Difficulty::CLASSES`] present in the list wins; no match yields
    /// `Unknown`.
    pub fn from_classes<'a, I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let classes: Vec<&str> = classes.into_iter().collect();
        Self::CLASSES
            .iter()
            .find(|(name, _)| classes.contains(name))
            .map(|(_, difficulty)| *difficulty)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page's extracted facts
///
/// Field order is the ledger column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    /// Crawl identifier, the ID substituted into the page URL
    pub id: u64,

    /// User who earned the achievement
    pub nickname: String,

    /// Earning date as rendered by the page
    pub date: String,

    /// Title of the related item
    pub vm_title: String,

    pub difficulty: Difficulty,

    /// Numeric rank without the leading `#`, empty when absent
    pub rank: String,
}

impl AchievementRecord {
    /// Ledger header, in column order
    pub const HEADER: [&'static str; 6] =
        ["id", "nickname", "date", "vm_title", "difficulty", "rank"];

    /// A record may only be persisted when both required fields are present
    pub fn is_valid(&self) -> bool {
        !self.nickname.is_empty() && !self.vm_title.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nickname: &str, vm_title: &str) -> AchievementRecord {
        AchievementRecord {
            id: 1,
            nickname: nickname.to_string(),
            date: String::new(),
            vm_title: vm_title.to_string(),
            difficulty: Difficulty::Unknown,
            rank: String::new(),
        }
    }

    #[test]
    fn test_difficulty_from_classes() {
        assert_eq!(Difficulty::from_classes(["vm", "Hard"]), Difficulty::Hard);
        assert_eq!(Difficulty::from_classes(["Medium"]), Difficulty::Medium);
        assert_eq!(Difficulty::from_classes(["vm"]), Difficulty::Unknown);
        assert_eq!(Difficulty::from_classes(Vec::<&str>::new()), Difficulty::Unknown);
    }

    #[test]
    fn test_difficulty_class_match_is_case_sensitive() {
        assert_eq!(Difficulty::from_classes(["easy"]), Difficulty::Unknown);
    }

    #[test]
    fn test_difficulty_priority_order() {
        assert_eq!(Difficulty::from_classes(["Hard", "Easy"]), Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_display_is_lowercase() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_record_validity() {
        assert!(record("alice", "Zino").is_valid());
        assert!(!record("", "Zino").is_valid());
        assert!(!record("alice", "").is_valid());
    }
}
