//! Turns raw user text (an inline argument or an editor buffer) into an [`EntryDraft`].
//!
//! Accepted shapes:
//!
//! ```text
//! Rust lifetimes: Every reference has a lifetime.
//!
//! # Rust lifetimes
//! Optional note before the first question.
//! Q: What does 'static mean?
//! A: The value lives for the whole program.
//! Q: Can lifetimes be elided?
//! A: Yes, in function signatures
//!    following the elision rules.
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entry::{Body, EntryDraft, QaPair};

static QA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([QqAa])\s*:\s?(.*)$").expect("valid Q/A regex"));

/// Parses a complete entry from user text.
///
/// The topic comes from the first line: a `# Heading` line is taken whole,
/// otherwise a `Topic: content` line is split on its first colon followed by
/// whitespace. Without either, the first line is the topic and the rest is the
/// body. The body becomes a Q/A body as soon as one `Q:` line appears.
///
/// Related ids are never parsed from text; callers fill them in.
///
/// # Examples
///
/// ```
/// # use recall_core::parse_input::parse_entry;
/// # use recall_core::entry::Body;
/// let draft = parse_entry("Borrowing: Shared XOR mutable.");
/// assert_eq!(draft.topic, "Borrowing");
/// assert_eq!(draft.body, Body::text("Shared XOR mutable."));
/// ```
pub fn parse_entry(input: &str) -> EntryDraft {
    let input = input.trim();
    let (topic_raw, rest) = split_topic(input);
    EntryDraft {
        topic: normalize_topic(topic_raw),
        body: parse_body(rest),
        related: Vec::new(),
    }
}

/// Parses the part of the input after the topic.
pub fn parse_body(text: &str) -> Body {
    let mut note: Vec<&str> = Vec::new();
    let mut pairs: Vec<QaPair> = Vec::new();
    let mut in_answer = false;

    for line in text.lines() {
        if let Some(caps) = QA_LINE.captures(line) {
            let value = caps[2].trim_end();
            if caps[1].eq_ignore_ascii_case("q") {
                pairs.push(QaPair::new(value, ""));
                in_answer = false;
                continue;
            }
            if let Some(pair) = pairs.last_mut() {
                append_line(&mut pair.answer, value);
                in_answer = true;
                continue;
            }
            // An `A:` before any question is ordinary note text.
        }
        match pairs.last_mut() {
            None => note.push(line),
            Some(pair) if in_answer => append_line(&mut pair.answer, line.trim()),
            Some(pair) => append_line(&mut pair.question, line.trim()),
        }
    }

    let note = note.join("\n").trim().to_string();
    if pairs.is_empty() {
        return Body::Text { content: note };
    }
    for pair in pairs.iter_mut() {
        pair.question = pair.question.trim().to_string();
        pair.answer = pair.answer.trim().to_string();
    }
    Body::Qa {
        note: (!note.is_empty()).then_some(note),
        pairs,
    }
}

fn split_topic(input: &str) -> (&str, &str) {
    let line_end = input.find('\n').unwrap_or(input.len());
    let first_line = &input[..line_end];

    if QA_LINE.is_match(first_line) {
        return ("", input);
    }
    if first_line.trim_start().starts_with('#') {
        return (first_line, &input[line_end..]);
    }
    if let Some(pos) = topic_separator(first_line) {
        return (&first_line[..pos], &input[pos + 1..]);
    }
    (first_line, &input[line_end..])
}

/// Byte offset of the first `:` that is followed by whitespace or ends the line.
fn topic_separator(line: &str) -> Option<usize> {
    line.char_indices()
        .filter(|&(_, c)| c == ':')
        .map(|(i, _)| i)
        .find(|&i| line[i + 1..].chars().next().is_none_or(char::is_whitespace))
}

fn append_line(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(line);
}

/// Strips the heading marker and an optional closing `#` run from the topic.
/// A `#` that ends a word, as in `C#`, is part of the topic.
fn normalize_topic(s: &str) -> String {
    let t = s.trim().trim_start_matches('#').trim_start();
    let without_closing = t.trim_end_matches('#');
    let closed = without_closing.len() < t.len()
        && (without_closing.is_empty() || without_closing.ends_with(char::is_whitespace));
    if closed {
        without_closing.trim_end().to_string()
    } else {
        t.to_string()
    }
}
