use anyhow::Result;
use chrono::Utc;
use recall_core::{EntryId, Recall, StoreError, parse_input::parse_entry, render::format_editor_buffer};

use super::editor_utils::{create_editor_buffer, resolve_editor};
use crate::render::Renderer;

pub fn edit_mode(recall: &mut Recall, renderer: &Renderer, id: &str) -> Result<()> {
    let id = EntryId::from(id);
    let Some(view) = recall.show(&id, Utc::now())? else {
        return Err(StoreError::NotFound(id).into());
    };

    let before = format_editor_buffer(&view.entry);
    let editor = resolve_editor(recall.config.editor.as_deref());
    let after = create_editor_buffer(&editor, &before)?;
    if after.trim() == before.trim() {
        renderer.print_info("No changes made.");
        return Ok(());
    }

    let mut draft = parse_entry(&after);
    draft.related = view.entry.related;
    let entry = recall.edit(&id, draft)?;

    renderer.print_info(&format!("Edited entry {}", entry.id));
    renderer.print_entry_line(&entry, entry.status(Utc::now()));
    Ok(())
}
