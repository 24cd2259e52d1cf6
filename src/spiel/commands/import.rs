use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SpielError};
use crate::model::Script;
use crate::store::CatalogStore;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Bulk-seeds the catalogue from text files. Directories are walked one
/// level deep, filtered by the configured import extensions; explicit file
/// paths are imported regardless of extension. The first line is the
/// title, leading blank lines of the remainder are dropped.
pub fn run<S: CatalogStore>(
    store: &mut S,
    paths: Vec<PathBuf>,
    import_exts: &[String],
    category_id: Option<Uuid>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut imported = 0;

    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(&path).map_err(SpielError::Io)?;
            for entry in entries {
                let entry = entry.map_err(SpielError::Io)?;
                let sub_path = entry.path();
                if !sub_path.is_file() {
                    continue;
                }
                let ext = match sub_path.extension() {
                    Some(e) => format!(".{}", e.to_string_lossy()),
                    None => continue,
                };
                if !import_exts.contains(&ext) {
                    continue;
                }
                import_file(store, &sub_path, category_id)?;
                imported += 1;
                result.add_message(CmdMessage::info(format!(
                    "Imported: {}",
                    sub_path.display()
                )));
            }
        } else if path.is_file() {
            match import_file(store, &path, category_id) {
                Ok(()) => {
                    imported += 1;
                    result.add_message(CmdMessage::info(format!("Imported: {}", path.display())));
                }
                Err(e) => {
                    result.add_message(CmdMessage::warning(format!(
                        "Failed to import {}: {}",
                        path.display(),
                        e
                    )));
                }
            }
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Path not found: {}",
                path.display()
            )));
        }
    }

    result.add_message(CmdMessage::success(format!("Total imported: {}", imported)));
    Ok(result)
}

fn import_file<S: CatalogStore>(
    store: &mut S,
    path: &Path,
    category_id: Option<Uuid>,
) -> Result<()> {
    let raw = fs::read_to_string(path).map_err(SpielError::Io)?;

    let mut lines = raw.lines();
    let title = lines
        .next()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .unwrap_or("Untitled")
        .to_string();

    let mut content_lines: Vec<&str> = lines.collect();
    while content_lines
        .first()
        .is_some_and(|line| line.trim().is_empty())
    {
        content_lines.remove(0);
    }

    let script = Script::new(title, content_lines.join("\n"), category_id);
    store.save_script(&script)
}
