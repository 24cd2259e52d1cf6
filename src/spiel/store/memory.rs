use super::{CatalogStore, DoctorReport};
use crate::error::{Result, SpielError};
use crate::model::{Category, Script};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    scripts: HashMap<Uuid, Script>,
    categories: HashMap<Uuid, Category>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for InMemoryStore {
    fn save_script(&mut self, script: &Script) -> Result<()> {
        self.scripts.insert(script.metadata.id, script.clone());
        Ok(())
    }

    fn get_script(&self, id: &Uuid) -> Result<Script> {
        self.scripts
            .get(id)
            .cloned()
            .ok_or(SpielError::ScriptNotFound(*id))
    }

    fn list_scripts(&self, category: Option<&Uuid>) -> Result<Vec<Script>> {
        Ok(self
            .scripts
            .values()
            .filter(|s| match category {
                Some(wanted) => s.metadata.category_id.as_ref() == Some(wanted),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn delete_script(&mut self, id: &Uuid) -> Result<()> {
        if self.scripts.remove(id).is_none() {
            return Err(SpielError::ScriptNotFound(*id));
        }
        Ok(())
    }

    fn increment_copy_count(&mut self, id: &Uuid) -> Result<u64> {
        let script = self
            .scripts
            .get_mut(id)
            .ok_or(SpielError::ScriptNotFound(*id))?;
        script.metadata.copy_count += 1;
        Ok(script.metadata.copy_count)
    }

    fn save_category(&mut self, category: &Category) -> Result<()> {
        self.categories.insert(category.id, category.clone());
        Ok(())
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.values().cloned().collect())
    }

    fn delete_category(&mut self, id: &Uuid) -> Result<()> {
        if self.categories.remove(id).is_none() {
            return Err(SpielError::CategoryNotFound(id.to_string()));
        }
        Ok(())
    }

    fn get_script_path(&self, _id: &Uuid) -> Result<PathBuf> {
        Err(SpielError::Store(
            "In-memory store has no content files".to_string(),
        ))
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        Ok(DoctorReport::default())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Category;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_scripts(mut self, count: usize) -> Self {
            for i in 0..count {
                let title = format!("Test Script {}", i + 1);
                let content = format!("Content for script {}", i + 1);
                let script = Script::new(title, content, None);
                self.store.save_script(&script).unwrap();
            }
            self
        }

        pub fn with_script(mut self, title: &str, content: &str) -> Self {
            let script = Script::new(title.to_string(), content.to_string(), None);
            self.store.save_script(&script).unwrap();
            self
        }

        pub fn with_tagged_script(mut self, title: &str, tags: &[&str]) -> Self {
            let mut script = Script::new(title.to_string(), "Some content".to_string(), None);
            script.metadata.tags = tags.iter().map(|t| t.to_string()).collect();
            self.store.save_script(&script).unwrap();
            self
        }

        pub fn with_category(mut self, name: &str) -> Self {
            let category = Category::new(name.to_string(), None, 0);
            self.store.save_category(&category).unwrap();
            self
        }

        pub fn with_child_category(mut self, name: &str, parent_name: &str) -> Self {
            let parent_id = self.category_id(parent_name);
            let category = Category::new(name.to_string(), Some(parent_id), 0);
            self.store.save_category(&category).unwrap();
            self
        }

        pub fn with_script_in(mut self, title: &str, category_name: &str) -> Self {
            let category_id = self.category_id(category_name);
            let script = Script::new(
                title.to_string(),
                "Some content".to_string(),
                Some(category_id),
            );
            self.store.save_script(&script).unwrap();
            self
        }

        pub fn category_id(&self, name: &str) -> Uuid {
            self.store
                .list_categories()
                .unwrap()
                .into_iter()
                .find(|c| c.name == name)
                .map(|c| c.id)
                .unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::error::SpielError;

    #[test]
    fn delete_missing_script_reports_id() {
        let mut store = InMemoryStore::new();
        let id = Uuid::new_v4();
        match store.delete_script(&id) {
            Err(SpielError::ScriptNotFound(err_id)) => assert_eq!(err_id, id),
            _ => panic!("Expected ScriptNotFound"),
        }
    }

    #[test]
    fn increment_bumps_and_returns_count() {
        let mut store = InMemoryStore::new();
        let script = Script::new("Opener".into(), "Hi there".into(), None);
        store.save_script(&script).unwrap();

        assert_eq!(store.increment_copy_count(&script.metadata.id).unwrap(), 1);
        assert_eq!(store.increment_copy_count(&script.metadata.id).unwrap(), 2);

        let loaded = store.get_script(&script.metadata.id).unwrap();
        assert_eq!(loaded.metadata.copy_count, 2);
    }

    #[test]
    fn category_listing_scopes_scripts() {
        let fixture = StoreFixture::default()
            .with_category("sales")
            .with_script_in("Pitch", "sales")
            .with_script("Unfiled", "");
        let sales = fixture.category_id("sales");

        let scoped = fixture.store.list_scripts(Some(&sales)).unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].metadata.title, "Pitch");

        let all = fixture.store.list_scripts(None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn doctor_is_a_noop() {
        let mut store = InMemoryStore::new();
        let report = store.doctor().unwrap();
        assert_eq!(report.restored_content_files, 0);
        assert_eq!(report.adopted_files, 0);
    }

    #[test]
    fn fixtures_cover_builders() {
        let fixture = StoreFixture::default()
            .with_scripts(2)
            .with_tagged_script("Tagged", &["pricing"])
            .with_category("intro")
            .with_child_category("cold", "intro")
            .with_script_in("Filed", "cold");

        let scripts = fixture.store.list_scripts(None).unwrap();
        assert_eq!(scripts.len(), 4);

        let tagged = scripts
            .iter()
            .find(|s| s.metadata.title == "Tagged")
            .unwrap();
        assert_eq!(tagged.metadata.tags, vec!["pricing"]);

        let categories = fixture.store.list_categories().unwrap();
        assert_eq!(categories.len(), 2);
        let cold = categories.iter().find(|c| c.name == "cold").unwrap();
        assert_eq!(cold.parent_id, Some(fixture.category_id("intro")));
    }
}
