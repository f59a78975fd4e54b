use chrono::{DateTime, Utc};

use crate::entry::Entry;
use crate::review::is_overdue;

pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

/// Case-insensitive substring match on the topic. An empty filter matches everything.
pub fn matches_topic(entry: &Entry, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() {
        return true;
    }
    entry.topic.to_lowercase().contains(&filter.to_lowercase())
}

pub fn filter_by_topic(entries: Vec<Entry>, filter: &str) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| matches_topic(entry, filter))
        .collect()
}

pub fn count_overdue(entries: &[Entry], now: DateTime<Utc>) -> usize {
    entries
        .iter()
        .filter(|entry| is_overdue(entry.review_at, now))
        .count()
}

/// Shortens `text` to `max_chars` characters followed by `...`.
/// Counts characters, not bytes, so multi-byte text is never cut mid-character.
pub fn content_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}
