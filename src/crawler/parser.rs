//! HTML parser for achievement pages
//!
//! This module extracts one [`AchievementRecord`] from an achievement page:
//! - nickname from the `h4.user` heading
//! - earning date from `span.date`
//! - item title and difficulty from the second `h3` on the page
//! - rank from `p.ranked`

use crate::record::{AchievementRecord, Difficulty};
use scraper::{ElementRef, Html, Selector};

const USER_SELECTOR: &str = "h4.user";
const DATE_SELECTOR: &str = "span.date";
const TITLE_SELECTOR: &str = "h3";
const RANK_SELECTOR: &str = "p.ranked";

/// Parses an achievement page
///
/// # Arguments
///
/// * `html` - The page body
/// * `id` - The achievement ID the page was fetched for
///
/// # Returns
///
/// * `Some(AchievementRecord)` - The page holds a valid record
/// * `None` - Required elements are missing or the nickname/title are empty
///
/// # Example
///
/// ```
/// use hmv_achievements::crawler::parse_achievement;
///
/// let html = r#"<h3>Achievement</h3><h4 class="user">alice</h4><h3 class="Easy">Zino</h3>"#;
/// let record = parse_achievement(html, 1).unwrap();
/// assert_eq!(record.nickname, "alice");
/// assert_eq!(record.difficulty.as_str(), "easy");
/// ```
pub fn parse_achievement(html: &str, id: u64) -> Option<AchievementRecord> {
    let document = Html::parse_document(html);

    let nickname = first_match(&document, USER_SELECTOR)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let date = first_match(&document, DATE_SELECTOR)
        .map(stripped_text)
        .unwrap_or_default();

    // The first h3 on the page is decorative
    let title_selector = Selector::parse(TITLE_SELECTOR).ok()?;
    let title = document.select(&title_selector).nth(1)?;
    let vm_title = stripped_text(title);
    let difficulty = Difficulty::from_classes(title.value().classes());

    let rank = first_match(&document, RANK_SELECTOR)
        .map(|element| extract_rank(&stripped_text(element)))
        .unwrap_or_default();

    let record = AchievementRecord {
        id,
        nickname,
        date,
        vm_title,
        difficulty,
        rank,
    };

    record.is_valid().then_some(record)
}

/// Returns the first element matching `selector`
fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Joins the element's text nodes, each trimmed, skipping blank ones
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extracts the rank number from text such as `#7 of 100`
///
/// Text without a leading `#` has no rank.
fn extract_rank(text: &str) -> String {
    if !text.starts_with('#') {
        return String::new();
    }

    text.split_whitespace()
        .next()
        .and_then(|token| token.strip_prefix('#'))
        .unwrap_or_default()
        .to_string()
}
