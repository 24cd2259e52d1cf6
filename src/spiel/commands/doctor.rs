use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CatalogStore;
use std::collections::HashSet;
use uuid::Uuid;

/// Audits the catalogue. Dangling references are reported, never repaired:
/// readers already degrade gracefully (a category with a missing parent
/// renders as a root, a script with a missing category renders unfiled),
/// so fixing them is a refiling decision for the user. With `fix`, the
/// store-level repairs run too (restore missing content files, adopt
/// orphaned ones).
pub fn run<S: CatalogStore>(store: &mut S, fix: bool) -> Result<CmdResult> {
    let categories = store.list_categories()?;
    let scripts = store.list_scripts(None)?;
    let known: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();

    let mut result = CmdResult::default();
    let mut findings = 0;

    for category in &categories {
        if let Some(parent) = category.parent_id {
            if parent == category.id || !known.contains(&parent) {
                findings += 1;
                result.add_message(CmdMessage::warning(format!(
                    "Category \"{}\" has a dangling parent, it renders as a root",
                    category.name
                )));
            }
        }
    }

    for script in &scripts {
        if let Some(category_id) = script.metadata.category_id {
            if !known.contains(&category_id) {
                findings += 1;
                result.add_message(CmdMessage::warning(format!(
                    "Script \"{}\" references a missing category, it renders unfiled",
                    script.metadata.title
                )));
            }
        }
    }

    if fix {
        let report = store.doctor()?;
        if report.restored_content_files > 0 {
            findings += report.restored_content_files;
            result.add_message(CmdMessage::success(format!(
                "Restored {} missing content file(s)",
                report.restored_content_files
            )));
        }
        if report.adopted_files > 0 {
            findings += report.adopted_files;
            result.add_message(CmdMessage::success(format!(
                "Adopted {} orphaned content file(s)",
                report.adopted_files
            )));
        }
    }

    if findings == 0 {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    }
    Ok(result)
}
