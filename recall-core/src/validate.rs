//! Rules a draft must pass before it reaches the store.

use thiserror::Error;

use crate::entry::{Body, EntryDraft, EntryId, QaPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a topic is required")]
    MissingTopic,
    #[error("content is required")]
    MissingContent,
    #[error("at least one question with an answer is required")]
    MissingQaPair,
}

/// Checks and normalizes a draft.
///
/// - the topic is trimmed and must not be empty;
/// - text content is trimmed and must not be empty;
/// - Q/A bodies keep only complete pairs (trimmed, in order) and need at least one;
/// - related ids are cleaned with [`clean_related`].
///
/// `self_id` is the id of the entry being edited, if any.
pub fn validate_draft(
    draft: EntryDraft,
    self_id: Option<&EntryId>,
) -> Result<EntryDraft, ValidationError> {
    let topic = draft.topic.trim().to_string();
    if topic.is_empty() {
        return Err(ValidationError::MissingTopic);
    }
    let body = validate_body(draft.body)?;
    let related = clean_related(draft.related, self_id);
    Ok(EntryDraft {
        topic,
        body,
        related,
    })
}

fn validate_body(body: Body) -> Result<Body, ValidationError> {
    match body {
        Body::Text { content } => {
            let content = content.trim().to_string();
            if content.is_empty() {
                return Err(ValidationError::MissingContent);
            }
            Ok(Body::Text { content })
        }
        Body::Qa { note, pairs } => {
            let pairs: Vec<QaPair> = pairs
                .into_iter()
                .filter(QaPair::is_complete)
                .map(|p| QaPair::new(p.question.trim(), p.answer.trim()))
                .collect();
            if pairs.is_empty() {
                return Err(ValidationError::MissingQaPair);
            }
            let note = note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty());
            Ok(Body::Qa { note, pairs })
        }
    }
}

/// Trims ids, drops empty ones and duplicates (first occurrence wins), and
/// removes `self_id` so an entry never links to itself.
pub fn clean_related(ids: Vec<EntryId>, self_id: Option<&EntryId>) -> Vec<EntryId> {
    let mut cleaned: Vec<EntryId> = Vec::with_capacity(ids.len());
    for id in ids {
        let id = EntryId::new(id.as_str().trim());
        if id.as_str().is_empty() || Some(&id) == self_id || cleaned.contains(&id) {
            continue;
        }
        cleaned.push(id);
    }
    cleaned
}
