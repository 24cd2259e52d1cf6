use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::ScriptSelector;
use crate::store::CatalogStore;

use super::helpers::scripts_by_selectors;

pub fn run<S: CatalogStore>(store: &S, selectors: &[ScriptSelector]) -> Result<CmdResult> {
    let scripts = scripts_by_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_scripts(scripts))
}
