//! Entry value types shared by the store, the review scheduler and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::review::{ReviewStatus, classify};

/// Opaque entry identifier. Assigned by the store, never generated by callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Both sides carry some non-whitespace text.
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// What was learned: either free text, or question/answer pairs with an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Text {
        content: String,
    },
    Qa {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        pairs: Vec<QaPair>,
    },
}

impl Body {
    pub fn text(content: impl Into<String>) -> Self {
        Body::Text {
            content: content.into(),
        }
    }

    /// The text shown in list previews: the content, the note, or the first question.
    pub fn summary(&self) -> &str {
        match self {
            Body::Text { content } => content.as_str(),
            Body::Qa { note: Some(note), .. } if !note.trim().is_empty() => note.as_str(),
            Body::Qa { pairs, .. } => pairs.first().map(|p| p.question.as_str()).unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub topic: String,
    pub body: Body,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<EntryId>,
}

impl Entry {
    /// Review status relative to `now`. Derived on every call, never stored.
    pub fn status(&self, now: DateTime<Utc>) -> ReviewStatus {
        classify(self.review_at, now)
    }
}

/// A new or edited entry as typed by the user, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub topic: String,
    pub body: Body,
    pub related: Vec<EntryId>,
}

/// Fields to overwrite on an existing entry. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub topic: Option<String>,
    pub body: Option<Body>,
    pub related: Option<Vec<EntryId>>,
}

impl EntryPatch {
    pub fn apply(self, entry: &mut Entry) {
        if let Some(topic) = self.topic {
            entry.topic = topic;
        }
        if let Some(body) = self.body {
            entry.body = body;
        }
        if let Some(related) = self.related {
            entry.related = related;
        }
    }
}

impl From<EntryDraft> for EntryPatch {
    fn from(draft: EntryDraft) -> Self {
        Self {
            topic: Some(draft.topic),
            body: Some(draft.body),
            related: Some(draft.related),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mk_entry() -> Entry {
        Entry {
            id: EntryId::new("a1"),
            topic: "Ownership".to_string(),
            body: Body::text("Moves transfer ownership."),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            review_at: None,
            related: Vec::new(),
        }
    }

    #[test]
    fn summary_prefers_note_then_first_question() {
        let with_note = Body::Qa {
            note: Some("Chapter 4".to_string()),
            pairs: vec![QaPair::new("What is a borrow?", "A reference.")],
        };
        assert_eq!(with_note.summary(), "Chapter 4");

        let blank_note = Body::Qa {
            note: Some("  ".to_string()),
            pairs: vec![QaPair::new("What is a borrow?", "A reference.")],
        };
        assert_eq!(blank_note.summary(), "What is a borrow?");

        let empty = Body::Qa {
            note: None,
            pairs: Vec::new(),
        };
        assert_eq!(empty.summary(), "");
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut entry = mk_entry();
        EntryPatch {
            topic: Some("Borrowing".to_string()),
            ..Default::default()
        }
        .apply(&mut entry);
        assert_eq!(entry.topic, "Borrowing");
        assert_eq!(entry.body, Body::text("Moves transfer ownership."));
        assert!(entry.related.is_empty());
    }

    #[test]
    fn serialized_entry_omits_absent_review_and_related() {
        let json = serde_json::to_string(&mk_entry()).unwrap();
        assert!(!json.contains("review_at"));
        assert!(!json.contains("related"));
        assert!(json.contains(r#""kind":"text""#));
        assert!(json.contains("2024-01-01T09:00:00Z"));
    }

    #[test]
    fn qa_pair_completeness_ignores_whitespace() {
        assert!(QaPair::new("q", "a").is_complete());
        assert!(!QaPair::new("q", "  ").is_complete());
        assert!(!QaPair::new("", "a").is_complete());
    }
}
