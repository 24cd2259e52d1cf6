use super::{CatalogStore, DoctorReport};
use crate::error::{Result, SpielError};
use crate::model::{Category, Script, ScriptMeta};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// On-disk index: everything except script content.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Catalog {
    #[serde(default)]
    categories: HashMap<Uuid, Category>,
    #[serde(default)]
    scripts: HashMap<Uuid, ScriptMeta>,
}

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: ".txt".to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn script_filename(&self, id: &Uuid) -> String {
        format!("script-{}{}", id, self.file_ext)
    }

    /// Find the content file for a given ID, checking both the configured
    /// extension and the .txt fallback
    fn find_script_file(&self, id: &Uuid) -> Option<PathBuf> {
        let path = self.root.join(self.script_filename(id));
        if path.exists() {
            return Some(path);
        }

        if self.file_ext != ".txt" {
            let txt_path = self.root.join(format!("script-{}.txt", id));
            if txt_path.exists() {
                return Some(txt_path);
            }
        }

        None
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SpielError::Io)?;
        }
        Ok(())
    }

    fn load_catalog(&self) -> Result<Catalog> {
        let catalog_file = self.root.join("catalog.json");
        if !catalog_file.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(catalog_file).map_err(SpielError::Io)?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(SpielError::Serialization)?;
        Ok(catalog)
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        let catalog_file = self.root.join("catalog.json");
        let content = serde_json::to_string_pretty(catalog).map_err(SpielError::Serialization)?;
        fs::write(catalog_file, content).map_err(SpielError::Io)?;
        Ok(())
    }

    fn read_content(&self, id: &Uuid) -> Result<String> {
        if let Some(path) = self.find_script_file(id) {
            fs::read_to_string(path).map_err(SpielError::Io)
        } else {
            Ok(String::new())
        }
    }

    /// IDs of content files present in the root, regardless of index state.
    fn content_files_on_disk(&self) -> Result<Vec<(Uuid, PathBuf)>> {
        let mut found = Vec::new();
        if !self.root.exists() {
            return Ok(found);
        }
        for entry in fs::read_dir(&self.root).map_err(SpielError::Io)? {
            let entry = entry.map_err(SpielError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(s) => s,
                None => continue,
            };
            let raw_id = match stem.strip_prefix("script-") {
                Some(r) => r,
                None => continue,
            };
            if let Ok(id) = Uuid::parse_str(raw_id) {
                found.push((id, path));
            }
        }
        Ok(found)
    }
}

impl CatalogStore for FileStore {
    fn save_script(&mut self, script: &Script) -> Result<()> {
        self.ensure_dir()?;

        // 1. Update the index
        let mut catalog = self.load_catalog()?;
        catalog
            .scripts
            .insert(script.metadata.id, script.metadata.clone());
        self.save_catalog(&catalog)?;

        // 2. Write content file with configured extension
        let path = self.root.join(self.script_filename(&script.metadata.id));
        fs::write(path, &script.content).map_err(SpielError::Io)?;

        Ok(())
    }

    fn get_script(&self, id: &Uuid) -> Result<Script> {
        let catalog = self.load_catalog()?;
        let metadata = catalog
            .scripts
            .get(id)
            .ok_or(SpielError::ScriptNotFound(*id))?
            .clone();
        let content = self.read_content(id)?;
        Ok(Script { metadata, content })
    }

    fn list_scripts(&self, category: Option<&Uuid>) -> Result<Vec<Script>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let catalog = self.load_catalog()?;
        let mut scripts = Vec::new();
        for (id, metadata) in catalog.scripts {
            if let Some(wanted) = category {
                if metadata.category_id.as_ref() != Some(wanted) {
                    continue;
                }
            }
            let content = self.read_content(&id)?;
            scripts.push(Script { metadata, content });
        }
        Ok(scripts)
    }

    fn delete_script(&mut self, id: &Uuid) -> Result<()> {
        let mut catalog = self.load_catalog()?;
        if catalog.scripts.remove(id).is_none() {
            return Err(SpielError::ScriptNotFound(*id));
        }
        self.save_catalog(&catalog)?;

        if let Some(path) = self.find_script_file(id) {
            fs::remove_file(path).map_err(SpielError::Io)?;
        }

        Ok(())
    }

    fn increment_copy_count(&mut self, id: &Uuid) -> Result<u64> {
        let mut catalog = self.load_catalog()?;
        let meta = catalog
            .scripts
            .get_mut(id)
            .ok_or(SpielError::ScriptNotFound(*id))?;
        meta.copy_count += 1;
        let count = meta.copy_count;
        self.save_catalog(&catalog)?;
        Ok(count)
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        self.ensure_dir()?;
        let mut catalog = self.load_catalog()?;
        catalog.categories.insert(category.id, category.clone());
        self.save_catalog(&catalog)
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let catalog = self.load_catalog()?;
        Ok(catalog.categories.into_values().collect())
    }

    fn delete_category(&mut self, id: &Uuid) -> Result<()> {
        let mut catalog = self.load_catalog()?;
        if catalog.categories.remove(id).is_none() {
            return Err(SpielError::CategoryNotFound(id.to_string()));
        }
        self.save_catalog(&catalog)
    }

    fn get_script_path(&self, id: &Uuid) -> Result<PathBuf> {
        if let Some(path) = self.find_script_file(id) {
            Ok(path)
        } else {
            Ok(self.root.join(self.script_filename(id)))
        }
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let mut report = DoctorReport::default();
        let mut catalog = self.load_catalog()?;
        let mut dirty = false;

        // Indexed scripts whose content file vanished get an empty file
        // back, keeping their metadata (tags, counters) intact.
        let indexed: Vec<Uuid> = catalog.scripts.keys().copied().collect();
        for id in indexed {
            if self.find_script_file(&id).is_none() {
                self.ensure_dir()?;
                let path = self.root.join(self.script_filename(&id));
                fs::write(path, "").map_err(SpielError::Io)?;
                report.restored_content_files += 1;
            }
        }

        // Content files with no index entry are adopted under their
        // on-disk id, titled from the first line.
        for (id, path) in self.content_files_on_disk()? {
            if catalog.scripts.contains_key(&id) {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(SpielError::Io)?;
            let title = content
                .lines()
                .next()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .unwrap_or("Untitled")
                .to_string();
            let mut meta = ScriptMeta::new(title, None);
            meta.id = id;
            catalog.scripts.insert(id, meta);
            report.adopted_files += 1;
            dirty = true;
        }

        if dirty {
            self.save_catalog(&catalog)?;
        }

        Ok(report)
    }
}
