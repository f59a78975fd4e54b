use anyhow::Result;
use chrono::Utc;
use recall_core::{EntryId, Recall, StoreError};

use crate::render::Renderer;

pub fn list_mode(
    recall: &Recall,
    renderer: &Renderer,
    topic: Option<&str>,
    overdue_only: bool,
) -> Result<()> {
    let mut view = recall.list(topic, Utc::now())?;
    if overdue_only {
        view.items.retain(|item| item.status.is_overdue());
    }
    renderer.print_list(&view);
    Ok(())
}

pub fn show_mode(recall: &Recall, renderer: &Renderer, id: &str) -> Result<()> {
    let id = EntryId::from(id);
    match recall.show(&id, Utc::now())? {
        Some(view) => {
            renderer.print_detail(&view);
            Ok(())
        }
        None => Err(StoreError::NotFound(id).into()),
    }
}
