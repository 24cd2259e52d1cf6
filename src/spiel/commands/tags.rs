use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::collect_tags;
use crate::store::CatalogStore;

pub fn run<S: CatalogStore>(store: &S) -> Result<CmdResult> {
    let metas: Vec<_> = store
        .list_scripts(None)?
        .into_iter()
        .map(|s| s.metadata)
        .collect();
    let usage = collect_tags(&metas);

    let mut result = CmdResult::default().with_tag_usage(usage);
    if result.tag_usage.is_empty() {
        result.add_message(CmdMessage::info("No tags in use."));
    }
    Ok(result)
}
