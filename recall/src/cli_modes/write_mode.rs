use anyhow::Result;
use chrono::Utc;
use recall_core::{EntryId, Recall, parse_input::parse_entry};

use super::editor_utils::{create_editor_buffer, resolve_editor};
use crate::render::Renderer;

const EDITOR_TEMPLATE: &str = "# \n\n";

pub fn write_mode(
    recall: &mut Recall,
    renderer: &Renderer,
    text: &[String],
    related: &[String],
) -> Result<()> {
    let input = if !text.is_empty() {
        text.join(" ")
    } else {
        let editor = resolve_editor(recall.config.editor.as_deref());
        create_editor_buffer(&editor, EDITOR_TEMPLATE)?
    };
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == EDITOR_TEMPLATE.trim() {
        renderer.print_info("No entry to save, because no text was received.");
        return Ok(());
    }

    let mut draft = parse_entry(trimmed);
    draft.related = related.iter().map(|id| EntryId::from(id.as_str())).collect();
    let entry = recall.create(draft, Utc::now())?;

    renderer.print_info(&format!("Added new entry {}", entry.id));
    renderer.print_entry_line(&entry, entry.status(Utc::now()));
    Ok(())
}
