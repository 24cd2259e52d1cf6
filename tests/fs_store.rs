use spiel::model::{Category, Script};
use spiel::store::fs::FileStore;
use spiel::store::CatalogStore;
use std::fs;
use tempfile::TempDir;
use uuid::Uuid;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());
    (dir, store)
}

#[test]
fn script_roundtrip_preserves_metadata_and_content() {
    let (_dir, mut store) = setup();

    let mut script = Script::new("Opener".into(), "Hi there\nSecond line".into(), None);
    script.metadata.tags = vec!["intro".into(), "warm".into()];
    store.save_script(&script).unwrap();

    let loaded = store.get_script(&script.metadata.id).unwrap();
    assert_eq!(loaded.metadata.title, "Opener");
    assert_eq!(loaded.metadata.tags, vec!["intro", "warm"]);
    assert_eq!(loaded.content, "Hi there\nSecond line");
}

#[test]
fn content_lands_in_a_script_file_next_to_the_index() {
    let (dir, mut store) = setup();

    let script = Script::new("Opener".into(), "Hi".into(), None);
    store.save_script(&script).unwrap();

    let content_file = dir
        .path()
        .join(format!("script-{}.txt", script.metadata.id));
    assert!(content_file.exists());
    assert_eq!(fs::read_to_string(&content_file).unwrap(), "Hi");
    assert!(dir.path().join("catalog.json").exists());
}

#[test]
fn configured_extension_with_txt_fallback() {
    let (dir, _) = setup();

    // Written as .txt, later the extension changes to .md: reads fall back.
    let mut store = FileStore::new(dir.path().to_path_buf());
    let script = Script::new("Opener".into(), "Hi".into(), None);
    store.save_script(&script).unwrap();

    let md_store = FileStore::new(dir.path().to_path_buf()).with_file_ext(".md");
    let loaded = md_store.get_script(&script.metadata.id).unwrap();
    assert_eq!(loaded.content, "Hi");
}

#[test]
fn delete_removes_index_entry_and_content_file() {
    let (dir, mut store) = setup();

    let script = Script::new("Opener".into(), "Hi".into(), None);
    store.save_script(&script).unwrap();
    store.delete_script(&script.metadata.id).unwrap();

    assert!(store.get_script(&script.metadata.id).is_err());
    assert!(!dir
        .path()
        .join(format!("script-{}.txt", script.metadata.id))
        .exists());
}

#[test]
fn copy_count_persists_across_store_instances() {
    let (dir, mut store) = setup();

    let script = Script::new("Opener".into(), "Hi".into(), None);
    store.save_script(&script).unwrap();
    assert_eq!(store.increment_copy_count(&script.metadata.id).unwrap(), 1);
    assert_eq!(store.increment_copy_count(&script.metadata.id).unwrap(), 2);

    let reopened = FileStore::new(dir.path().to_path_buf());
    let loaded = reopened.get_script(&script.metadata.id).unwrap();
    assert_eq!(loaded.metadata.copy_count, 2);
}

#[test]
fn category_roundtrip_and_scoped_listing() {
    let (_dir, mut store) = setup();

    let sales = Category::new("sales".into(), None, 0);
    let outbound = Category::new("outbound".into(), Some(sales.id), 1);
    store.save_category(&sales).unwrap();
    store.save_category(&outbound).unwrap();

    let filed = Script::new("Pitch".into(), "".into(), Some(sales.id));
    let unfiled = Script::new("Loose".into(), "".into(), None);
    store.save_script(&filed).unwrap();
    store.save_script(&unfiled).unwrap();

    let categories = store.list_categories().unwrap();
    assert_eq!(categories.len(), 2);

    let scoped = store.list_scripts(Some(&sales.id)).unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].metadata.title, "Pitch");
}

#[test]
fn missing_store_directory_lists_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("never-created"));

    assert!(store.list_scripts(None).unwrap().is_empty());
    assert!(store.list_categories().unwrap().is_empty());
}

#[test]
fn doctor_restores_missing_content_files() {
    let (dir, mut store) = setup();

    let script = Script::new("Opener".into(), "Hi".into(), None);
    store.save_script(&script).unwrap();
    fs::remove_file(dir.path().join(format!("script-{}.txt", script.metadata.id))).unwrap();

    let report = store.doctor().unwrap();
    assert_eq!(report.restored_content_files, 1);

    // Metadata survived, content is gone.
    let loaded = store.get_script(&script.metadata.id).unwrap();
    assert_eq!(loaded.metadata.title, "Opener");
    assert_eq!(loaded.content, "");
}

#[test]
fn doctor_adopts_orphaned_content_files() {
    let (dir, mut store) = setup();

    // A content file dropped into the directory by hand.
    let orphan_id = Uuid::new_v4();
    fs::write(
        dir.path().join(format!("script-{}.txt", orphan_id)),
        "Recovered title\n\nbody",
    )
    .unwrap();

    let report = store.doctor().unwrap();
    assert_eq!(report.adopted_files, 1);

    let adopted = store.get_script(&orphan_id).unwrap();
    assert_eq!(adopted.metadata.title, "Recovered title");
}
