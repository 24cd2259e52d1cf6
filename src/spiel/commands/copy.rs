use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::ScriptSelector;
use crate::store::CatalogStore;
use uuid::Uuid;

use super::helpers::scripts_by_selectors;

/// Resolves the scripts to copy. The clipboard write itself happens in the
/// CLI shell; this layer only hands back the content.
pub fn run<S: CatalogStore>(store: &S, selectors: &[ScriptSelector]) -> Result<CmdResult> {
    let scripts = scripts_by_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_scripts(scripts))
}

/// Bumps the copy counter after a successful clipboard write. Best-effort:
/// a failing counter update degrades to a warning, the copy itself already
/// succeeded and must not be reported as a failure.
pub fn record<S: CatalogStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.increment_copy_count(id) {
        Ok(count) => {
            result.add_message(CmdMessage::info(format!("Copied {} time(s)", count)));
        }
        Err(e) => {
            result.add_message(CmdMessage::warning(format!(
                "Copied, but the copy count was not recorded: {}",
                e
            )));
        }
    }
    Ok(result)
}
