use anyhow::Result;
use recall_core::{EntryId, Recall};

use crate::render::Renderer;

pub fn link_mode(
    recall: &mut Recall,
    renderer: &Renderer,
    id: &str,
    add: &[String],
    remove: &[String],
) -> Result<()> {
    let id = EntryId::from(id);

    if add.is_empty() && remove.is_empty() {
        let linked = recall
            .show(&id, chrono::Utc::now())?
            .map(|view| view.entry.related)
            .unwrap_or_default();
        let candidates = recall.related_candidates(Some(&id))?;
        if candidates.is_empty() {
            renderer.print_info("No other entries to link to.");
            return Ok(());
        }
        renderer.print_info(&format!("{} entries can be linked.", candidates.len()));
        for candidate in candidates {
            let mark = if linked.contains(&candidate.id) { "x" } else { " " };
            renderer.print_md(&format!("* [{mark}] {} `{}`\n", candidate.topic, candidate.id));
        }
        return Ok(());
    }

    let to_ids = |ids: &[String]| -> Vec<EntryId> { ids.iter().map(|s| EntryId::from(s.as_str())).collect() };
    let entry = recall.update_links(&id, &to_ids(add), &to_ids(remove))?;
    renderer.print_info(&format!(
        "{} now links to {} {}",
        entry.topic,
        entry.related.len(),
        if entry.related.len() == 1 { "entry" } else { "entries" }
    ));
    Ok(())
}
