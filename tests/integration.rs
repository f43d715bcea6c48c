use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// John Doe ↔ Jane Smith with parents on both sides and two children;
// both spouses are eligible subjects, so rotation has two candidates.
const FAMILY_GED: &str = "\
0 HEAD
1 SOUR gedcom-rotor integration tests
0 @I001@ INDI
1 NAME John /Doe/
1 BIRT
2 DATE 1 JAN 1850
1 DEAT
2 DATE 12 DEC 1920
1 FAMS @F001@
1 FAMC @F002@
0 @I002@ INDI
1 NAME Jane /Smith/
1 BIRT
2 DATE 1855
1 FAMS @F001@
1 FAMC @F003@
0 @I003@ INDI
1 NAME William /Doe/
1 FAMS @F002@
0 @I004@ INDI
1 NAME Mary /Jones/
1 FAMS @F002@
0 @I005@ INDI
1 NAME Robert /Smith/
1 FAMS @F003@
0 @I006@ INDI
1 NAME Elizabeth /Brown/
1 FAMS @F003@
0 @I007@ INDI
1 NAME James /Doe/
1 FAMC @F001@
1 FAMS @F004@
0 @I008@ INDI
1 NAME Sarah /Doe/
1 FAMC @F001@
0 @I009@ INDI
1 NAME Alice /Green/
1 FAMS @F004@
0 @F001@ FAM
1 HUSB @I001@
1 WIFE @I002@
1 CHIL @I007@
1 CHIL @I008@
0 @F002@ FAM
1 HUSB @I003@
1 WIFE @I004@
1 CHIL @I001@
0 @F003@ FAM
1 HUSB @I005@
1 WIFE @I006@
1 CHIL @I002@
0 @F004@ FAM
1 HUSB @I007@
1 WIFE @I009@
0 TRLR
";

// Individuals exist but nobody qualifies: no children anywhere.
const INELIGIBLE_GED: &str = "\
0 @I001@ INDI
1 NAME Adam /Alone/
1 FAMS @F001@
0 @I002@ INDI
1 NAME Eve /Alone/
1 FAMS @F001@
0 @F001@ FAM
1 HUSB @I001@
1 WIFE @I002@
0 TRLR
";

fn gedr_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("gedr");
    path
}

fn setup_test_env(gedcom: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(root.join("family.ged"), gedcom).unwrap();

    let config_content = "\
[source]
path = \"family.ged\"

[output]
dir = \"out\"
";
    let config_path = root.join("gedr.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_gedr(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = gedr_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run gedr binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_run_creates_cache_and_output() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);

    let (stdout, stderr, success) = run_gedr(&config_path, &["run"]);
    assert!(success, "run failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Parsing GEDCOM file"));

    let cache = read_json(&tmp.path().join("out").join("families.json"));
    assert!(cache["source_hash"].as_str().unwrap().len() == 64);
    let families = cache["families"].as_array().unwrap();
    assert_eq!(families.len(), 2);
    for family in families {
        assert!(family.get("id").is_some());
        assert!(family["subject_parents"].is_object());
        assert!(family["spouse_parents"].is_object());
    }

    let current = read_json(&tmp.path().join("out").join("current.json"));
    assert!(current.get("id").is_none());
    let last_id = current["last_family_id"].as_str().unwrap();
    assert!(last_id == "@I001@" || last_id == "@I002@");
    assert!(current["subject"]["first_name"].is_string());
}

#[test]
fn test_output_matches_display_contract() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);
    run_gedr(&config_path, &["run"]);

    let current = read_json(&tmp.path().join("out").join("current.json"));

    // Both perspectives carry the same two children.
    let children = current["children"].as_array().unwrap();
    assert_eq!(children.len(), 2);

    let james = &children[0];
    assert_eq!(james["first"]["first_name"], "James");
    assert_eq!(james["first"]["child"], true);
    assert_eq!(james["second"]["first_name"], "Alice");

    let sarah = &children[1];
    assert_eq!(sarah["first"]["first_name"], "Sarah");
    assert_eq!(sarah["first"]["child"], true);
    assert!(sarah.get("second").is_none());

    // Years reduced to 4 digits, no child flag outside children lists.
    assert!(current["subject"].get("child").is_none());
    let birth = current["subject"]["birth"].as_str().unwrap();
    assert_eq!(birth.len(), 4);
}

#[test]
fn test_second_run_reuses_cache() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);

    run_gedr(&config_path, &["run"]);
    let cache_path = tmp.path().join("out").join("families.json");
    let first_bytes = fs::read(&cache_path).unwrap();

    let (stdout, _, success) = run_gedr(&config_path, &["run"]);
    assert!(success);
    assert!(stdout.contains("Using cached data"), "got: {}", stdout);

    let second_bytes = fs::read(&cache_path).unwrap();
    assert_eq!(first_bytes, second_bytes, "cache must be byte-identical");
}

#[test]
fn test_source_change_invalidates_cache() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);

    run_gedr(&config_path, &["run"]);
    let cache_path = tmp.path().join("out").join("families.json");
    let first_hash = read_json(&cache_path)["source_hash"]
        .as_str()
        .unwrap()
        .to_string();

    // A single appended byte must force a rebuild.
    let ged_path = tmp.path().join("family.ged");
    let mut content = fs::read_to_string(&ged_path).unwrap();
    content.push('\n');
    fs::write(&ged_path, content).unwrap();

    let (stdout, _, success) = run_gedr(&config_path, &["run"]);
    assert!(success);
    assert!(stdout.contains("Parsing GEDCOM file"), "got: {}", stdout);

    let second_hash = read_json(&cache_path)["source_hash"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first_hash, second_hash);
}

#[test]
fn test_rotation_avoids_previous_selection() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);
    let current_path = tmp.path().join("out").join("current.json");

    run_gedr(&config_path, &["run"]);
    let mut previous = read_json(&current_path)["last_family_id"]
        .as_str()
        .unwrap()
        .to_string();

    // With exactly two candidates, every run must flip to the other.
    for _ in 0..10 {
        let (_, _, success) = run_gedr(&config_path, &["run"]);
        assert!(success);
        let next = read_json(&current_path)["last_family_id"]
            .as_str()
            .unwrap()
            .to_string();
        assert_ne!(next, previous, "selection repeated immediately");
        previous = next;
    }
}

#[test]
fn test_no_eligible_families_fails_without_output() {
    let (tmp, config_path) = setup_test_env(INELIGIBLE_GED);

    let (_, stderr, success) = run_gedr(&config_path, &["run"]);
    assert!(!success, "run should fail with no eligible families");
    assert!(
        stderr.contains("No eligible families"),
        "got stderr: {}",
        stderr
    );
    assert!(!tmp.path().join("out").join("current.json").exists());
}

#[test]
fn test_rebuild_flag_forces_reparse() {
    let (_tmp, config_path) = setup_test_env(FAMILY_GED);

    run_gedr(&config_path, &["run"]);
    let (stdout, _, success) = run_gedr(&config_path, &["run", "--rebuild"]);
    assert!(success);
    assert!(stdout.contains("Parsing GEDCOM file"), "got: {}", stdout);
}

#[test]
fn test_dry_run_writes_nothing() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);

    let (stdout, _, success) = run_gedr(&config_path, &["run", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("eligible families: 2"), "got: {}", stdout);
    assert!(!tmp.path().join("out").join("families.json").exists());
    assert!(!tmp.path().join("out").join("current.json").exists());
}

#[test]
fn test_corrupt_cache_triggers_rebuild() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);

    run_gedr(&config_path, &["run"]);
    let cache_path = tmp.path().join("out").join("families.json");
    fs::write(&cache_path, "{ not json at all").unwrap();

    let (stdout, stderr, success) = run_gedr(&config_path, &["run"]);
    assert!(success, "corrupt cache must not be fatal: {}", stderr);
    assert!(stdout.contains("Parsing GEDCOM file"));

    let cache = read_json(&cache_path);
    assert_eq!(cache["families"].as_array().unwrap().len(), 2);
}

#[test]
fn test_corrupt_previous_output_is_not_fatal() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);

    run_gedr(&config_path, &["run"]);
    let current_path = tmp.path().join("out").join("current.json");
    fs::write(&current_path, "garbage").unwrap();

    let (_, stderr, success) = run_gedr(&config_path, &["run"]);
    assert!(success, "corrupt previous output must not be fatal: {}", stderr);
    assert!(read_json(&current_path)["last_family_id"].is_string());
}

#[test]
fn test_eligible_lists_both_spouses() {
    let (_tmp, config_path) = setup_test_env(FAMILY_GED);

    let (stdout, _, success) = run_gedr(&config_path, &["eligible"]);
    assert!(success);
    assert!(stdout.contains("@I001@"));
    assert!(stdout.contains("@I002@"));
    assert!(stdout.contains("2 eligible of 9 individuals"), "got: {}", stdout);
}

#[test]
fn test_show_prints_family_unit() {
    let (_tmp, config_path) = setup_test_env(FAMILY_GED);

    let (stdout, _, success) = run_gedr(&config_path, &["show", "@I001@"]);
    assert!(success);
    let unit: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(unit["id"], "@I001@");
    assert_eq!(unit["subject"]["first_name"], "John");
    assert_eq!(unit["spouse"]["first_name"], "Jane");
}

#[test]
fn test_show_unknown_id_fails() {
    let (_tmp, config_path) = setup_test_env(FAMILY_GED);

    let (_, stderr, success) = run_gedr(&config_path, &["show", "@I999@"]);
    assert!(!success);
    assert!(stderr.contains("not found"), "got stderr: {}", stderr);
}

#[test]
fn test_missing_source_file_fails() {
    let (tmp, config_path) = setup_test_env(FAMILY_GED);
    fs::remove_file(tmp.path().join("family.ged")).unwrap();

    let (_, stderr, success) = run_gedr(&config_path, &["run"]);
    assert!(!success);
    assert!(stderr.contains("family.ged"), "got stderr: {}", stderr);
}
