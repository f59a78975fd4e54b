//! Stepping through an entry one card at a time, answers hidden until revealed.

use crate::entry::{Body, Entry};

/// One prompt and the answer behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub prompt: String,
    pub answer: String,
}

/// Q/A bodies give one card per pair. A text body is a single card asking
/// for the topic's content.
#[derive(Debug, Clone)]
pub struct StudySession {
    note: Option<String>,
    cards: Vec<Card>,
    index: usize,
    revealed: bool,
}

impl StudySession {
    pub fn new(entry: &Entry) -> Self {
        let (note, cards) = match &entry.body {
            Body::Text { content } => (
                None,
                vec![Card {
                    prompt: entry.topic.clone(),
                    answer: content.clone(),
                }],
            ),
            Body::Qa { note, pairs } => (
                note.clone(),
                pairs
                    .iter()
                    .map(|pair| Card {
                        prompt: pair.question.clone(),
                        answer: pair.answer.clone(),
                    })
                    .collect(),
            ),
        };
        Self {
            note,
            cards,
            index: 0,
            revealed: false,
        }
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// 1-based position of the current card.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// The current card, or `None` once every card has been passed.
    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.index)
    }

    /// The current answer, only after [`reveal`](Self::reveal).
    pub fn answer(&self) -> Option<&str> {
        if self.revealed {
            self.current().map(|card| card.answer.as_str())
        } else {
            None
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        if self.current().is_some() {
            self.revealed = true;
        }
    }

    /// Moves to the next card and hides its answer.
    pub fn advance(&mut self) {
        if self.index < self.cards.len() {
            self.index += 1;
        }
        self.revealed = false;
    }

    /// Moves to the previous card. Returns `false` on the first card.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.revealed = false;
        true
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryId, QaPair};
    use chrono::{TimeZone, Utc};

    fn mk_entry(body: Body) -> Entry {
        Entry {
            id: EntryId::new("id-1"),
            topic: "Ownership".to_string(),
            body,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            review_at: None,
            related: Vec::new(),
        }
    }

    fn qa_session() -> StudySession {
        StudySession::new(&mk_entry(Body::Qa {
            note: Some("Chapter 4".to_string()),
            pairs: vec![
                QaPair::new("What moves?", "Non-Copy values."),
                QaPair::new("What borrows?", "References."),
            ],
        }))
    }

    #[test]
    fn answers_stay_hidden_until_revealed() {
        let mut s = qa_session();
        assert_eq!(s.note(), Some("Chapter 4"));
        assert_eq!(s.len(), 2);
        assert_eq!(s.position(), 1);
        assert_eq!(s.current().unwrap().prompt, "What moves?");
        assert_eq!(s.answer(), None);

        s.reveal();
        assert_eq!(s.answer(), Some("Non-Copy values."));

        s.advance();
        assert_eq!(s.position(), 2);
        assert!(!s.is_revealed());
        assert_eq!(s.answer(), None);
        assert_eq!(s.current().unwrap().prompt, "What borrows?");
    }

    #[test]
    fn back_returns_to_previous_card_hidden() {
        let mut s = qa_session();
        assert!(!s.back());
        s.advance();
        s.reveal();
        assert!(s.back());
        assert_eq!(s.position(), 1);
        assert!(!s.is_revealed());
    }

    #[test]
    fn session_finishes_after_last_card() {
        let mut s = qa_session();
        s.advance();
        s.advance();
        assert!(s.is_finished());
        assert!(s.current().is_none());
        s.reveal();
        assert_eq!(s.answer(), None);
        s.advance();
        assert!(s.back());
        assert_eq!(s.position(), 2);
    }

    #[test]
    fn text_body_is_one_card_on_the_topic() {
        let mut s = StudySession::new(&mk_entry(Body::text("Each value has one owner.")));
        assert_eq!(s.note(), None);
        assert_eq!(s.len(), 1);
        assert_eq!(s.current().unwrap().prompt, "Ownership");
        s.reveal();
        assert_eq!(s.answer(), Some("Each value has one owner."));
    }
}
