use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Script;
use crate::store::CatalogStore;
use uuid::Uuid;

pub fn run<S: CatalogStore>(
    store: &mut S,
    title: String,
    content: String,
    category_id: Option<Uuid>,
    tags: Vec<String>,
) -> Result<CmdResult> {
    let mut script = Script::new(title, content, category_id);
    script.metadata.tags = tags;
    store.save_script(&script)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Script created: {}",
        script.metadata.title
    )));
    result.affected_scripts.push(script);
    Ok(result)
}
