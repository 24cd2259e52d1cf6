use assert_cmd::Command;
use predicates::prelude::*;

fn spiel(catalog: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("spiel").unwrap();
    cmd.env("SPIEL_CATALOG", catalog);
    cmd
}

#[test]
fn create_and_list_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["create", "--no-editor", "Warm intro", "Hi, great to meet you!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Script created: Warm intro"));

    spiel(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Warm intro"));
}

#[test]
fn list_filters_by_search_and_tag() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args([
            "create",
            "--no-editor",
            "--tag",
            "pricing",
            "--tag",
            "approved",
            "Discount reply",
            "We can offer 10%",
        ])
        .assert()
        .success();
    spiel(dir.path())
        .args(["create", "--no-editor", "--tag", "pricing", "List price", "Standard terms"])
        .assert()
        .success();

    // Search is case-insensitive over title and content.
    spiel(dir.path())
        .args(["list", "--search", "discount"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discount reply"))
        .stdout(predicate::str::contains("List price").not());

    // Default tag policy requires every selected tag.
    spiel(dir.path())
        .args(["list", "--tag", "pricing", "--tag", "approved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discount reply"))
        .stdout(predicate::str::contains("List price").not());

    // --any-tag keeps partial matches.
    spiel(dir.path())
        .args(["list", "--tag", "pricing", "--tag", "approved", "--any-tag"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Discount reply"))
        .stdout(predicate::str::contains("List price"));
}

#[test]
fn category_tree_and_scoped_listing() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["category", "create", "sales"])
        .assert()
        .success();
    spiel(dir.path())
        .args(["category", "create", "outbound", "--parent", "sales"])
        .assert()
        .success();
    spiel(dir.path())
        .args([
            "create",
            "--no-editor",
            "--category",
            "outbound",
            "Voicemail",
            "Leave a short message",
        ])
        .assert()
        .success();

    spiel(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sales (1)"))
        .stdout(predicate::str::contains("  outbound (1)"));

    spiel(dir.path())
        .args(["list", "--category", "outbound"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Voicemail"));

    spiel(dir.path())
        .args(["list", "--category", "sales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No scripts found."));
}

#[test]
fn category_delete_reports_dangles_and_doctor_flags_them() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["category", "create", "sales"])
        .assert()
        .success();
    spiel(dir.path())
        .args(["category", "create", "outbound", "--parent", "sales"])
        .assert()
        .success();
    spiel(dir.path())
        .args([
            "create",
            "--no-editor",
            "--category",
            "sales",
            "Pitch",
            "Our product is great",
        ])
        .assert()
        .success();

    spiel(dir.path())
        .args(["category", "delete", "sales"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category deleted: sales"))
        .stdout(predicate::str::contains("subcategorie"))
        .stdout(predicate::str::contains("uncategorized"));

    // The script still exists and the orphaned child renders as a root.
    spiel(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pitch"));
    spiel(dir.path())
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outbound (0)"));

    spiel(dir.path())
        .args(["doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dangling parent"))
        .stdout(predicate::str::contains("missing category"));
}

#[test]
fn view_by_title_term() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["create", "--no-editor", "Renewal nudge", "Time to renew."])
        .assert()
        .success();

    spiel(dir.path())
        .args(["view", "renewal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renewal nudge"))
        .stdout(predicate::str::contains("Time to renew."));
}

#[test]
fn delete_by_ordinal() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["create", "--no-editor", "Only one", "body"])
        .assert()
        .success();
    spiel(dir.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Script deleted (1): Only one"));

    spiel(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No scripts found."));
}

#[test]
fn import_seeds_scripts_and_tags_lists_usage() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("seed");
    std::fs::create_dir_all(&source).unwrap();
    std::fs::write(source.join("a.txt"), "Opener\n\nHi there").unwrap();
    std::fs::write(source.join("b.md"), "Closer\n\nBye now").unwrap();

    spiel(dir.path())
        .args(["import", source.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total imported: 2"));

    spiel(dir.path())
        .args(["create", "--no-editor", "--tag", "pricing", "Tagged", "x"])
        .assert()
        .success();

    spiel(dir.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("#pricing (1)"));
}

#[test]
fn search_ranks_title_matches_first() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["create", "--no-editor", "Other", "mentions pricing inside"])
        .assert()
        .success();
    spiel(dir.path())
        .args(["create", "--no-editor", "Pricing", "body"])
        .assert()
        .success();

    let output = spiel(dir.path())
        .args(["search", "pricing"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let pricing_pos = stdout.find("Pricing").unwrap();
    let other_pos = stdout.find("Other").unwrap();
    assert!(pricing_pos < other_pos);
}

#[test]
fn config_roundtrip_through_the_binary() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["config", "tag-match", "any"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tag-match set to any"));

    spiel(dir.path())
        .args(["config", "tag-match"])
        .assert()
        .success()
        .stdout(predicate::str::contains("any"));
}

#[test]
fn path_prints_the_content_file() {
    let dir = tempfile::tempdir().unwrap();

    spiel(dir.path())
        .args(["create", "--no-editor", "Opener", "Hi"])
        .assert()
        .success();

    spiel(dir.path())
        .args(["path", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("script-"));
}

#[test]
fn init_creates_the_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("fresh");

    spiel(&catalog)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized spiel catalogue"));
    assert!(catalog.join("config.json").exists());
}
