use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SpielError};
use crate::index::{DisplayScript, ScriptSelector};
use crate::store::CatalogStore;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;

use super::helpers::{indexed_scripts, scripts_by_selectors};

/// Writes the selected scripts (or the whole catalogue) into a `.tar.gz`
/// of text files in the current directory.
pub fn run<S: CatalogStore>(store: &S, selectors: &[ScriptSelector]) -> Result<CmdResult> {
    let scripts = resolve_scripts(store, selectors)?;

    if scripts.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No scripts to export."));
        return Ok(res);
    }

    let now = Utc::now();
    let filename = format!("spiel-{}.tar.gz", now.format("%Y-%m-%d_%H:%M:%S"));
    let file = File::create(&filename).map_err(SpielError::Io)?;
    write_archive(file, &scripts)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} script(s) to {}",
        scripts.len(),
        filename
    )));
    Ok(result)
}

fn resolve_scripts<S: CatalogStore>(
    store: &S,
    selectors: &[ScriptSelector],
) -> Result<Vec<DisplayScript>> {
    if selectors.is_empty() {
        indexed_scripts(store)
    } else {
        scripts_by_selectors(store, selectors)
    }
}

fn write_archive<W: Write>(writer: W, scripts: &[DisplayScript]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for ds in scripts {
        let title = &ds.script.metadata.title;
        let safe_title = sanitize_filename(title);
        let entry_name = format!(
            "spiel/{}-{}.txt",
            safe_title,
            &ds.script.metadata.id.to_string()[..8]
        );

        let content = format!("{}\n\n{}", title, ds.script.content);

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(SpielError::Io)?;
    }

    tar.finish().map_err(SpielError::Io)?;
    Ok(())
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn empty_selection_exports_the_whole_catalogue() {
        let fixture = StoreFixture::default().with_scripts(3);
        let scripts = resolve_scripts(&fixture.store, &[]).unwrap();
        assert_eq!(scripts.len(), 3);
    }

    #[test]
    fn archive_starts_with_gzip_magic() {
        let fixture = StoreFixture::default().with_script("Test", "Content");
        let scripts = resolve_scripts(&fixture.store, &[]).unwrap();

        let mut buf = Vec::new();
        write_archive(&mut buf, &scripts).unwrap();

        assert!(!buf.is_empty());
        assert_eq!(buf[0], 0x1f);
        assert_eq!(buf[1], 0x8b);
    }

    #[test]
    fn filenames_sanitize_path_separators() {
        assert_eq!(sanitize_filename("Hello World"), "Hello World");
        assert_eq!(sanitize_filename("foo/bar"), "foo_bar");
        assert_eq!(sanitize_filename("baz\\qux"), "baz_qux");
    }
}
