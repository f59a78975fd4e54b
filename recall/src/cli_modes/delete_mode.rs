use anyhow::Result;
use recall_core::{EntryId, Recall};

use crate::render::Renderer;

pub fn delete_mode(recall: &mut Recall, renderer: &Renderer, id: &str) -> Result<()> {
    recall.delete(&EntryId::from(id))?;
    renderer.print_info(&format!("Deleted entry {id}"));
    Ok(())
}
