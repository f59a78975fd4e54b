use anyhow::Result;
use chrono::Utc;
use recall_core::{EntryId, Keywords, Recall};

use crate::render::Renderer;

pub fn review_mode(recall: &mut Recall, renderer: &Renderer, id: &str, interval: &str) -> Result<()> {
    let interval = Keywords::parse(interval)?;
    let now = Utc::now();
    let entry = recall.schedule_review(&EntryId::from(id), interval, now)?;

    let message = match entry.review_at {
        Some(_) => format!("Review scheduled ({})", interval.label()),
        None => "Review cleared".to_string(),
    };
    renderer.print_info(&message);
    renderer.print_entry_line(&entry, entry.status(now));
    Ok(())
}
