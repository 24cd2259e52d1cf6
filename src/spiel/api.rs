//! # API Facade
//!
//! A thin facade over the command layer, the single entry point for every
//! spiel operation regardless of the client driving it.
//!
//! The facade dispatches to `commands::*`, normalizes selector inputs
//! (ordinals, ranges, title terms), and returns structured `CmdResult`
//! values. It holds no business logic, performs no I/O of its own, and
//! never touches stdout or stderr.
//!
//! `SpielApi<S: CatalogStore>` is generic over the storage backend:
//! `FileStore` in production, `InMemoryStore` in tests.

use crate::commands;
use crate::error::Result;
use crate::filter::ScriptQuery;
use crate::index::{parse_index_or_range, ScriptSelector};
use crate::store::CatalogStore;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct SpielApi<S: CatalogStore> {
    store: S,
    catalog_dir: PathBuf,
}

impl<S: CatalogStore> SpielApi<S> {
    pub fn new(store: S, catalog_dir: PathBuf) -> Self {
        Self { store, catalog_dir }
    }

    pub fn catalog_dir(&self) -> &Path {
        &self.catalog_dir
    }

    pub fn create_script(
        &mut self,
        title: String,
        content: String,
        category_id: Option<Uuid>,
        tags: Vec<String>,
    ) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, title, content, category_id, tags)
    }

    pub fn list_scripts(&self, query: &ScriptQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    pub fn search_scripts(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn view_scripts<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn copy_scripts<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::copy::run(&self.store, &selectors)
    }

    pub fn record_copy(&mut self, id: &Uuid) -> Result<commands::CmdResult> {
        commands::copy::record(&mut self.store, id)
    }

    pub fn update_scripts(
        &mut self,
        updates: &[commands::ScriptUpdate],
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, updates)
    }

    pub fn classify_scripts<I: AsRef<str>>(
        &mut self,
        inputs: &[I],
        category_id: Option<Option<Uuid>>,
        tags: Option<Vec<String>>,
    ) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::update::classify(&mut self.store, &selectors, category_id, tags)
    }

    pub fn delete_scripts<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn list_categories(&self) -> Result<commands::CmdResult> {
        commands::categories::list(&self.store)
    }

    pub fn create_category(
        &mut self,
        name: String,
        parent: Option<&str>,
        sort_order: i64,
    ) -> Result<commands::CmdResult> {
        commands::categories::create(&mut self.store, name, parent, sort_order)
    }

    pub fn rename_category(&mut self, reference: &str, name: String) -> Result<commands::CmdResult> {
        commands::categories::rename(&mut self.store, reference, name)
    }

    pub fn move_category(
        &mut self,
        reference: &str,
        parent: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::categories::move_category(&mut self.store, reference, parent)
    }

    pub fn delete_category(&mut self, reference: &str) -> Result<commands::CmdResult> {
        commands::categories::delete(&mut self.store, reference)
    }

    pub fn resolve_category(&self, reference: &str) -> Result<crate::model::Category> {
        commands::helpers::resolve_category(&self.store, reference)
    }

    pub fn tags(&self) -> Result<commands::CmdResult> {
        commands::tags::run(&self.store)
    }

    pub fn import_scripts(
        &mut self,
        paths: Vec<PathBuf>,
        import_exts: &[String],
        category_id: Option<Uuid>,
    ) -> Result<commands::CmdResult> {
        commands::import::run(&mut self.store, paths, import_exts, category_id)
    }

    pub fn export_scripts<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::export::run(&self.store, &selectors)
    }

    pub fn script_paths<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::paths::run(&self.store, &selectors)
    }

    pub fn doctor(&mut self, fix: bool) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store, fix)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.catalog_dir, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.catalog_dir)
    }
}

/// Turns raw inputs into selectors. If every input parses as an ordinal or
/// a range ("3", "2-5"), they address by number; otherwise the whole input
/// is one title search term.
fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ScriptSelector>> {
    let all_indexes: std::result::Result<Vec<Vec<_>>, _> = inputs
        .iter()
        .map(|s| parse_index_or_range(s.as_ref()))
        .collect();

    if let Ok(indexes) = all_indexes {
        return Ok(indexes
            .into_iter()
            .flatten()
            .map(ScriptSelector::Index)
            .collect());
    }

    let term = inputs
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    Ok(vec![ScriptSelector::Title(term)])
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, ScriptUpdate};
