use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::entry::{Entry, EntryDraft, EntryId, EntryPatch};
use crate::filter::{count_overdue, filter_by_topic};
use crate::related::{self, RelatedRef};
use crate::review::{ReviewInterval, ReviewStatus, compute_review_date, rank};
use crate::store::{EntryStore, FileStore, StoreError};
use crate::study::StudySession;
use crate::validate::{clean_related, validate_draft};

/// An entry together with its status at the time the list was built.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub entry: Entry,
    pub status: ReviewStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    /// Overdue entries first, then the rest, each group in store order.
    pub items: Vec<ListItem>,
    /// Overdue entries across the whole collection, ignoring the topic filter.
    pub overdue_count: usize,
    /// Entries in the whole collection.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub entry: Entry,
    pub status: ReviewStatus,
    pub related: Vec<RelatedRef>,
}

/// Entry point for every operation on the learning collection.
pub struct Recall {
    pub config: Config,
    store: Box<dyn EntryStore>,
}

impl Recall {
    /// Loads the user config and opens the store it points at.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.store_path)?;
        Ok(Self::with_store(config, Box::new(store)))
    }

    pub fn with_store(config: Config, store: Box<dyn EntryStore>) -> Self {
        Self { config, store }
    }

    pub fn list(&self, topic_filter: Option<&str>, now: DateTime<Utc>) -> Result<ListView> {
        let all = self.store.list()?;
        let total = all.len();
        let overdue_count = count_overdue(&all, now);

        let shown = match topic_filter {
            Some(filter) => filter_by_topic(all, filter),
            None => all,
        };
        let items: Vec<ListItem> = rank(shown, now)
            .into_iter()
            .map(|entry| ListItem {
                status: entry.status(now),
                entry,
            })
            .collect();
        debug!(total, shown = items.len(), overdue_count, "built list view");

        Ok(ListView {
            items,
            overdue_count,
            total,
        })
    }

    pub fn show(&self, id: &EntryId, now: DateTime<Utc>) -> Result<Option<DetailView>> {
        let Some(entry) = self.store.get(id)? else {
            return Ok(None);
        };
        let related = if entry.related.is_empty() {
            Vec::new()
        } else {
            related::resolve(&entry, &self.store.list()?)
        };
        Ok(Some(DetailView {
            status: entry.status(now),
            entry,
            related,
        }))
    }

    /// Validates `draft` and stores it as a new entry created at `now`.
    pub fn create(&mut self, draft: EntryDraft, now: DateTime<Utc>) -> Result<Entry> {
        let mut draft = validate_draft(draft, None)?;
        if !draft.related.is_empty() {
            draft.related = related::retain_existing(draft.related, &self.store.list()?);
        }
        self.store.add(draft, now)
    }

    /// Replaces topic, body and links of an existing entry.
    pub fn edit(&mut self, id: &EntryId, draft: EntryDraft) -> Result<Entry> {
        let mut draft = validate_draft(draft, Some(id))?;
        if !draft.related.is_empty() {
            draft.related = related::retain_existing(draft.related, &self.store.list()?);
        }
        let entry = self.store.update(id, EntryPatch::from(draft))?;
        info!(%id, "edited entry");
        Ok(entry)
    }

    /// Sets the review timestamp from `interval`, or clears it for `unlimited`.
    pub fn schedule_review(
        &mut self,
        id: &EntryId,
        interval: ReviewInterval,
        now: DateTime<Utc>,
    ) -> Result<Entry> {
        let review_at = compute_review_date(interval, now);
        let entry = self.store.set_review(id, review_at)?;
        info!(%id, %interval, review_at = ?entry.review_at, "scheduled review");
        Ok(entry)
    }

    pub fn delete(&mut self, id: &EntryId) -> Result<()> {
        self.store.delete(id)
    }

    /// Adds and removes links on an existing entry, keeping the order of the
    /// links that stay. Links to itself or to unknown entries are dropped.
    pub fn update_links(
        &mut self,
        id: &EntryId,
        link: &[EntryId],
        unlink: &[EntryId],
    ) -> Result<Entry> {
        let entry = self.get_existing(id)?;
        let mut related: Vec<EntryId> = entry
            .related
            .into_iter()
            .filter(|r| !unlink.contains(r))
            .collect();
        related.extend(link.iter().filter(|l| !unlink.contains(l)).cloned());
        let related = clean_related(related, Some(id));
        let related = related::retain_existing(related, &self.store.list()?);

        let entry = self.store.update(
            id,
            EntryPatch {
                related: Some(related),
                ..Default::default()
            },
        )?;
        info!(%id, links = entry.related.len(), "updated links");
        Ok(entry)
    }

    /// A study session over the entry's cards, answers hidden.
    pub fn study(&self, id: &EntryId) -> Result<StudySession> {
        Ok(StudySession::new(&self.get_existing(id)?))
    }

    fn get_existing(&self, id: &EntryId) -> Result<Entry> {
        self.store
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.clone()).into())
    }

    /// Entries that `id` may link to.
    pub fn related_candidates(&self, id: Option<&EntryId>) -> Result<Vec<RelatedRef>> {
        if let Some(id) = id {
            if self.store.get(id)?.is_none() {
                return Err(StoreError::NotFound(id.clone()).into());
            }
        }
        Ok(related::candidates(&self.store.list()?, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use crate::entry::{Body, QaPair};
    use crate::store::MemoryStore;
    use crate::validate::ValidationError;
    use chrono::{Duration, TimeZone};
    use std::path::PathBuf;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn recall() -> Recall {
        Recall::with_store(
            mk_config(PathBuf::from("unused.jsonl")),
            Box::new(MemoryStore::new()),
        )
    }

    fn draft(topic: &str) -> EntryDraft {
        EntryDraft {
            topic: topic.to_string(),
            body: Body::text(format!("notes on {topic}")),
            related: Vec::new(),
        }
    }

    fn topics(view: &ListView) -> Vec<&str> {
        view.items.iter().map(|i| i.entry.topic.as_str()).collect()
    }

    #[test]
    fn create_validates_before_storing() {
        let mut r = recall();
        let err = r.create(draft("   "), now()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingTopic)
        );
        assert_eq!(r.list(None, now()).unwrap().total, 0);

        let e = r.create(draft("  Traits "), now()).unwrap();
        assert_eq!(e.topic, "Traits");
        assert_eq!(e.created_at, now());
        assert_eq!(e.review_at, None);
    }

    #[test]
    fn create_drops_links_to_unknown_entries() {
        let mut r = recall();
        let a = r.create(draft("a"), now()).unwrap();
        let mut d = draft("b");
        d.related = vec![EntryId::new("ghost"), a.id.clone()];
        let b = r.create(d, now()).unwrap();
        assert_eq!(b.related, vec![a.id]);
    }

    #[test]
    fn list_ranks_overdue_first_and_counts_unfiltered() {
        let mut r = recall();
        let t = now();
        let old = r.create(draft("rust old"), t - Duration::days(3)).unwrap();
        r.create(draft("rust new"), t - Duration::days(1)).unwrap();
        let other = r.create(draft("go"), t - Duration::days(2)).unwrap();

        r.schedule_review(&old.id, ReviewInterval::OneDay, t - Duration::days(3))
            .unwrap();
        r.schedule_review(&other.id, ReviewInterval::Immediate, t - Duration::days(2))
            .unwrap();

        let view = r.list(None, t).unwrap();
        assert_eq!(topics(&view), ["go", "rust old", "rust new"]);
        assert_eq!(view.overdue_count, 2);
        assert_eq!(view.total, 3);
        assert_eq!(view.items[0].status, ReviewStatus::Overdue(2));
        assert_eq!(view.items[2].status, ReviewStatus::NoReview);

        let filtered = r.list(Some("RUST"), t).unwrap();
        assert_eq!(topics(&filtered), ["rust old", "rust new"]);
        assert_eq!(filtered.overdue_count, 2);
    }

    #[test]
    fn schedule_review_sets_and_clears() {
        let mut r = recall();
        let e = r.create(draft("x"), now()).unwrap();

        let scheduled = r
            .schedule_review(&e.id, ReviewInterval::FiveDays, now())
            .unwrap();
        assert_eq!(scheduled.review_at, Some(now() + Duration::days(5)));

        let cleared = r
            .schedule_review(&e.id, ReviewInterval::Unlimited, now())
            .unwrap();
        assert_eq!(cleared.review_at, None);

        let missing = r.schedule_review(&EntryId::new("nope"), ReviewInterval::OneDay, now());
        assert!(missing.is_err());
    }

    #[test]
    fn show_resolves_related_and_status() {
        let mut r = recall();
        let a = r.create(draft("a"), now()).unwrap();
        let mut d = draft("b");
        d.related = vec![a.id.clone()];
        let b = r.create(d, now()).unwrap();
        r.schedule_review(&b.id, ReviewInterval::OneDay, now()).unwrap();

        let view = r.show(&b.id, now()).unwrap().unwrap();
        assert_eq!(view.status, ReviewStatus::DueSoon(1));
        assert_eq!(view.related.len(), 1);
        assert_eq!(view.related[0].topic, "a");

        r.delete(&a.id).unwrap();
        let view = r.show(&b.id, now()).unwrap().unwrap();
        assert!(view.related.is_empty());

        assert!(r.show(&EntryId::new("nope"), now()).unwrap().is_none());
    }

    #[test]
    fn edit_replaces_content_and_keeps_schedule() {
        let mut r = recall();
        let e = r.create(draft("old"), now()).unwrap();
        r.schedule_review(&e.id, ReviewInterval::TwentyDays, now())
            .unwrap();

        let mut d = draft("new");
        d.body = Body::Qa {
            note: None,
            pairs: vec![QaPair::new("Why?", "Because.")],
        };
        d.related = vec![e.id.clone()];
        let edited = r.edit(&e.id, d).unwrap();

        assert_eq!(edited.topic, "new");
        assert!(matches!(edited.body, Body::Qa { .. }));
        assert!(edited.related.is_empty());
        assert_eq!(edited.review_at, Some(now() + Duration::days(20)));
        assert_eq!(edited.created_at, now());
    }

    #[test]
    fn update_links_adds_and_removes() {
        let mut r = recall();
        let a = r.create(draft("a"), now()).unwrap();
        let b = r.create(draft("b"), now()).unwrap();
        let c = r.create(draft("c"), now()).unwrap();

        let linked = r
            .update_links(&a.id, &[b.id.clone(), c.id.clone(), a.id.clone()], &[])
            .unwrap();
        assert_eq!(linked.related, vec![b.id.clone(), c.id.clone()]);

        let changed = r
            .update_links(&a.id, &[EntryId::new("ghost"), b.id.clone()], &[c.id.clone()])
            .unwrap();
        assert_eq!(changed.related, vec![b.id.clone()]);
        assert_eq!(r.show(&a.id, now()).unwrap().unwrap().related[0].topic, "b");

        assert!(r.update_links(&EntryId::new("nope"), &[], &[]).is_err());
    }

    #[test]
    fn study_starts_hidden_on_first_card() {
        let mut r = recall();
        let mut d = draft("Lifetimes");
        d.body = Body::Qa {
            note: None,
            pairs: vec![QaPair::new("'static?", "Whole program."), QaPair::new("Elided?", "Often.")],
        };
        let e = r.create(d, now()).unwrap();

        let session = r.study(&e.id).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.current().unwrap().prompt, "'static?");
        assert_eq!(session.answer(), None);
        assert!(r.study(&EntryId::new("nope")).is_err());
    }

    #[test]
    fn related_candidates_exclude_self() {
        let mut r = recall();
        let a = r.create(draft("a"), now()).unwrap();
        r.create(draft("b"), now() + Duration::seconds(1)).unwrap();

        let c = r.related_candidates(Some(&a.id)).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].topic, "b");
        assert_eq!(r.related_candidates(None).unwrap().len(), 2);
        assert!(r.related_candidates(Some(&EntryId::new("nope"))).is_err());
    }
}
