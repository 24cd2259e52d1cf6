use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::ScriptSelector;
use crate::store::CatalogStore;

use super::helpers::resolve_selectors;

pub fn run<S: CatalogStore>(store: &S, selectors: &[ScriptSelector]) -> Result<CmdResult> {
    let resolved = resolve_selectors(store, selectors)?;
    let mut paths = Vec::with_capacity(resolved.len());

    for (_, id) in resolved {
        paths.push(store.get_script_path(&id)?);
    }

    Ok(CmdResult::default().with_script_paths(paths))
}
