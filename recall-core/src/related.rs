//! Links between entries.

use std::collections::HashMap;
use tracing::warn;

use crate::entry::{Entry, EntryId};

/// The id and topic of a linked entry, enough to list and navigate to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedRef {
    pub id: EntryId,
    pub topic: String,
}

impl From<&Entry> for RelatedRef {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            topic: entry.topic.clone(),
        }
    }
}

/// Every entry that `self_id` could link to, in store order.
pub fn candidates(entries: &[Entry], self_id: Option<&EntryId>) -> Vec<RelatedRef> {
    entries
        .iter()
        .filter(|entry| Some(&entry.id) != self_id)
        .map(RelatedRef::from)
        .collect()
}

/// Resolves `entry.related` against `entries`, in the order the links were made.
/// Links to entries that no longer exist are skipped.
pub fn resolve(entry: &Entry, entries: &[Entry]) -> Vec<RelatedRef> {
    let by_id: HashMap<&EntryId, &Entry> = entries.iter().map(|e| (&e.id, e)).collect();
    entry
        .related
        .iter()
        .filter_map(|id| match by_id.get(id) {
            Some(&found) => Some(RelatedRef::from(found)),
            None => {
                warn!(entry = %entry.id, missing = %id, "skipping dangling related entry");
                None
            }
        })
        .collect()
}

/// Keeps only ids that name an existing entry.
pub fn retain_existing(ids: Vec<EntryId>, entries: &[Entry]) -> Vec<EntryId> {
    ids.into_iter()
        .filter(|id| {
            let known = entries.iter().any(|e| &e.id == id);
            if !known {
                warn!(missing = %id, "dropping link to unknown entry");
            }
            known
        })
        .collect()
}
