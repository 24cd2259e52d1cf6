use crate::commands::{CmdMessage, CmdResult};
use crate::config::SpielConfig;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Creates the catalogue directory and writes a default config if none
/// exists yet. Running it twice is harmless.
pub fn run(catalog_dir: &Path) -> Result<CmdResult> {
    fs::create_dir_all(catalog_dir)?;

    let mut result = CmdResult::default();
    if !catalog_dir.join("config.json").exists() {
        SpielConfig::default().save(catalog_dir)?;
    }
    result.add_message(CmdMessage::success(format!(
        "Initialized spiel catalogue at {}",
        catalog_dir.display()
    )));
    Ok(result)
}
