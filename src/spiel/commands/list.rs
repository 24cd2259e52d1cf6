use crate::commands::CmdResult;
use crate::error::Result;
use crate::filter::ScriptQuery;
use crate::store::CatalogStore;

use super::helpers::indexed_scripts;

/// Canonical listing: every script gets its stable ordinal first, then the
/// query drops the rows it hides. Ordinals survive filtering, so `copy 3`
/// targets the same script in any view.
pub fn run<S: CatalogStore>(store: &S, query: &ScriptQuery) -> Result<CmdResult> {
    let mut listed = indexed_scripts(store)?;
    listed.retain(|ds| query.matches(&ds.script));
    Ok(CmdResult::default().with_listed_scripts(listed))
}
