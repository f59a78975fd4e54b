//! Pure Markdown rendering helpers.
//!
//! Detail view:
//!   # Topic
//!
//!   *Added Mon, 01 Jan 2024 · Due today*
//!
//!   Content…
//!
//! Editor buffer: the same shape [`parse_entry`](crate::parse_input::parse_entry) reads back.

use chrono::{DateTime, Utc};

use crate::entry::{Body, Entry};
use crate::related::RelatedRef;
use crate::review::ReviewStatus;

/// Formats a timestamp according to the user's configuration.
pub fn format_date(date: DateTime<Utc>, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// `*Added Mon, 01 Jan 2024 · Review Sat, 06 Jan 2024 · Due in 5 days*`
pub fn format_meta_line(entry: &Entry, status: ReviewStatus, date_format: &str) -> String {
    let mut parts = vec![format!("Added {}", format_date(entry.created_at, date_format))];
    if let Some(review_at) = entry.review_at {
        parts.push(format!("Review {}", format_date(review_at, date_format)));
    }
    parts.push(status.label());
    format!("*{}*", parts.join(" · "))
}

/// Body as Markdown. Q/A pairs become numbered `**Q:**` / `A:` blocks.
pub fn format_body(body: &Body) -> String {
    match body {
        Body::Text { content } => content.trim_end().to_string(),
        Body::Qa { note, pairs } => {
            let mut out = String::new();
            if let Some(note) = note {
                out.push_str(note.trim_end());
                out.push_str("\n\n");
            }
            for (i, pair) in pairs.iter().enumerate() {
                out.push_str(&format!(
                    "**Q{}:** {}\n\nA: {}\n\n",
                    i + 1,
                    pair.question.trim_end(),
                    pair.answer.trim_end()
                ));
            }
            out.trim_end().to_string()
        }
    }
}

/// Full entry: heading, meta line, body and related links.
pub fn format_entry_block(
    entry: &Entry,
    status: ReviewStatus,
    related: &[RelatedRef],
    date_format: &str,
) -> String {
    let mut md = format!(
        "# {}\n\n{}\n\n",
        entry.topic,
        format_meta_line(entry, status, date_format)
    );
    let body = format_body(&entry.body);
    if !body.is_empty() {
        md.push_str(&body);
        md.push_str("\n\n");
    }
    if !related.is_empty() {
        md.push_str("## Related\n\n");
        for r in related {
            md.push_str(&format!("* {} `{}`\n", r.topic, r.id));
        }
        md.push('\n');
    }
    md
}

/// Text handed to the editor when changing an entry.
pub fn format_editor_buffer(entry: &Entry) -> String {
    let mut out = format!("# {}\n\n", entry.topic);
    match &entry.body {
        Body::Text { content } => {
            out.push_str(content);
            out.push('\n');
        }
        Body::Qa { note, pairs } => {
            if let Some(note) = note {
                out.push_str(note);
                out.push_str("\n\n");
            }
            for pair in pairs {
                out.push_str(&format!("Q: {}\nA: {}\n\n", pair.question, pair.answer));
            }
        }
    }
    out
}
