use crate::commands::{CmdMessage, CmdResult, ScriptUpdate};
use crate::error::Result;
use crate::index::ScriptSelector;
use crate::store::CatalogStore;
use chrono::Utc;
use uuid::Uuid;

use super::helpers::resolve_selectors;

pub fn run<S: CatalogStore>(store: &mut S, updates: &[ScriptUpdate]) -> Result<CmdResult> {
    if updates.is_empty() {
        return Ok(CmdResult::default());
    }

    let selectors: Vec<ScriptSelector> = updates
        .iter()
        .map(|u| ScriptSelector::Index(u.index))
        .collect();
    let resolved = resolve_selectors(store, &selectors)?;
    let mut result = CmdResult::default();

    for ((display_index, id), update) in resolved.into_iter().zip(updates.iter()) {
        let mut script = store.get_script(&id)?;
        script.metadata.title = update.title.clone();
        script.metadata.updated_at = Utc::now();
        script.content = update.content.clone();
        store.save_script(&script)?;

        result.add_message(CmdMessage::success(format!(
            "Script updated ({}): {}",
            display_index, script.metadata.title
        )));
        result.affected_scripts.push(script);
    }

    Ok(result)
}

/// Reclassifies scripts without touching their text: moves them to a
/// category (or out of any, for `None`) and/or replaces their tag set.
pub fn classify<S: CatalogStore>(
    store: &mut S,
    selectors: &[ScriptSelector],
    category_id: Option<Option<Uuid>>,
    tags: Option<Vec<String>>,
) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let mut script = store.get_script(&id)?;
        if let Some(new_category) = category_id {
            script.metadata.category_id = new_category;
        }
        if let Some(new_tags) = &tags {
            script.metadata.tags = new_tags.clone();
        }
        script.metadata.updated_at = Utc::now();
        store.save_script(&script)?;

        result.add_message(CmdMessage::success(format!(
            "Script reclassified ({}): {}",
            display_index, script.metadata.title
        )));
        result.affected_scripts.push(script);
    }

    Ok(result)
}
