use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::ScriptSelector;
use crate::store::CatalogStore;

use super::helpers::resolve_selectors;

/// Deletes are permanent; the catalogue has no trash bucket.
pub fn run<S: CatalogStore>(store: &mut S, selectors: &[ScriptSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let script = store.get_script(&id)?;
        store.delete_script(&id)?;
        result.add_message(CmdMessage::success(format!(
            "Script deleted ({}): {}",
            display_index, script.metadata.title
        )));
        result.affected_scripts.push(script);
    }

    Ok(result)
}
