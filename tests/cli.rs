//! End-to-end tests for the colcomplete command line.
//!
//! Every run gets its own config file so the user's app data directory is
//! never read.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Temp dir holding a config.json with the given contents
fn config_dir(config: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    fs::write(&path, config).expect("Failed to write config");
    (dir, path)
}

/// Run colcomplete with given args, returning (stdout, stderr, success)
fn run(args: &[&str], config: &Path) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_colcomplete"))
        .args(args)
        .arg("--config")
        .arg(config)
        .arg("--color=never")
        .output()
        .expect("Failed to run colcomplete");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Run against the places.csv fixture with an empty config
fn run_places(args: &[&str]) -> (String, String, bool) {
    let (_dir, config) = config_dir("{}");
    let data = fixture("places.csv");
    let mut full: Vec<&str> = args.to_vec();
    full.extend(["--data", data.to_str().expect("utf-8 path")]);
    run(&full, &config)
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

#[test]
fn test_suggest_skips_to_token_starts() {
    let (stdout, stderr, ok) = run_places(&["suggest", "Name", "AC"]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(lines(&stdout), vec!["Name", "ACE", "Alphabet City"]);
}

#[test]
fn test_suggest_respects_case() {
    let (stdout, _, ok) = run_places(&["suggest", "Name", "Ac"]);
    assert!(ok);
    assert_eq!(lines(&stdout), vec!["Name"]);

    let (stdout, _, ok) = run_places(&["suggest", "Name", "ac", "-i"]);
    assert!(ok);
    assert_eq!(lines(&stdout), vec!["Name", "ACE", "Alphabet City"]);
}

#[test]
fn test_suggest_limit() {
    let (stdout, _, ok) = run_places(&["suggest", "Name", "ac", "-i", "-n", "1"]);
    assert!(ok);
    assert_eq!(lines(&stdout), vec!["Name", "ACE"]);
}

#[test]
fn test_suggest_uses_trimmed_values() {
    let (stdout, _, ok) = run_places(&["suggest", "Name", "PS"]);
    assert!(ok);
    assert_eq!(lines(&stdout), vec!["Name", "Park Slope"]);
}

#[test]
fn test_suggest_short_query_is_empty() {
    let (stdout, _, ok) = run_places(&["suggest", "Borough", "B"]);
    assert!(ok);
    assert_eq!(lines(&stdout), vec!["Borough"]);
}

#[test]
fn test_suggest_unknown_field_fails() {
    let (_, stderr, ok) = run_places(&["suggest", "Zip", "10"]);
    assert!(!ok);
    assert!(stderr.contains("Unknown field"), "stderr: {stderr}");
    assert!(stderr.contains("Name, Borough, Notes"), "stderr: {stderr}");
}

#[test]
fn test_filter_rows() {
    let (stdout, stderr, ok) = run_places(&["filter", "Borough=Brooklyn", "Notes=brown"]);
    assert!(ok, "stderr: {stderr}");
    assert_eq!(
        lines(&stdout),
        vec![
            "Name\tBorough\tNotes",
            "Bedford-Stuyvesant\tBrooklyn\tbrownstones",
            "  Park Slope  \tBrooklyn\tbrownstones",
            "-- page 1/1 (2 rows)",
        ]
    );
}

#[test]
fn test_filter_pages() {
    let (_dir, config) = config_dir(r#"{ "page_size": 3 }"#);
    let data = fixture("places.csv");
    let data = data.to_str().expect("utf-8 path");

    let (stdout, _, ok) = run(&["filter", "--page", "2", "--data", data], &config);
    assert!(ok);
    let out = lines(&stdout);
    assert_eq!(out.len(), 5);
    assert_eq!(out[1], "Bay Ridge\tBrooklyn\t");
    assert_eq!(out[4], "-- page 2/3 (8 rows)");

    // Past the end shows the last page
    let (stdout, _, ok) = run(&["filter", "--page", "9", "--data", data], &config);
    assert!(ok);
    assert!(stdout.ends_with("-- page 3/3 (8 rows)\n"));
}

#[test]
fn test_filter_bad_argument() {
    let (_, stderr, ok) = run_places(&["filter", "Borough"]);
    assert!(!ok);
    assert!(stderr.contains("FIELD=PREFIX"), "stderr: {stderr}");
}

#[test]
fn test_excluded_field_gets_no_suggestions() {
    let (_dir, config) = config_dir(r#"{ "no_filter_fields": ["Notes"] }"#);
    let data = fixture("places.csv");
    let data = data.to_str().expect("utf-8 path");

    let (stdout, stderr, ok) = run(&["suggest", "Notes", "br", "--data", data], &config);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("Unknown field \"Notes\" (available: Name, Borough)"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_excluded_field_cannot_filter() {
    let (_dir, config) = config_dir(r#"{ "no_filter_fields": ["Notes"] }"#);
    let data = fixture("places.csv");
    let data = data.to_str().expect("utf-8 path");

    let (_, stderr, ok) = run(&["filter", "Notes=brown", "--data", data], &config);
    assert!(!ok);
    assert!(stderr.contains("Unknown field \"Notes\""), "stderr: {stderr}");

    let (_, _, ok) = run(&["filter", "Borough=Brooklyn", "--data", data], &config);
    assert!(ok);
}

#[test]
fn test_fields_honours_config() {
    let (_dir, config) = config_dir(r#"{ "no_filter_fields": ["Notes"] }"#);
    let data = fixture("places.csv");
    let (stdout, stderr, ok) = run(
        &["fields", "--data", data.to_str().expect("utf-8 path")],
        &config,
    );
    assert!(ok, "stderr: {stderr}");

    let out = lines(&stdout);
    assert_eq!(out.len(), 3);
    assert!(out[1].starts_with("Name"));
    assert!(out[2].starts_with("Borough"));
    assert!(!stdout.contains("Notes"));
}

#[test]
fn test_json_dataset() {
    let (_dir, config) = config_dir("{}");
    let data = fixture("places.json");
    let (stdout, stderr, ok) = run(
        &["suggest", "Name", "AC", "--data", data.to_str().expect("utf-8 path")],
        &config,
    );
    assert!(ok, "stderr: {stderr}");
    assert_eq!(lines(&stdout), vec!["Name", "ACE", "Alphabet City"]);
}

#[test]
fn test_dataset_from_config() {
    let data = fixture("places.csv");
    let config = serde_json::json!({ "data": data }).to_string();
    let (_dir, config) = config_dir(&config);

    let (stdout, _, ok) = run(&["suggest", "Borough", "Br"], &config);
    assert!(ok);
    assert_eq!(lines(&stdout), vec!["Borough", "Brooklyn"]);
}

#[test]
fn test_missing_dataset() {
    let (_dir, config) = config_dir("{}");
    let (_, stderr, ok) = run(&["suggest", "Name", "AC"], &config);
    assert!(!ok);
    assert!(stderr.contains("No dataset given"), "stderr: {stderr}");
}

#[test]
fn test_config_init() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let (stdout, stderr, ok) = run(&["config", "--init"], &path);
    assert!(ok, "stderr: {stderr}");
    assert!(stdout.starts_with("Wrote default config"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("config written"))
            .expect("valid json");
    assert_eq!(written["max_suggestions"], 10);

    // Refuses to overwrite
    let (_, stderr, ok) = run(&["config", "--init"], &path);
    assert!(!ok);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");

    // Shows the effective config
    let (stdout, _, ok) = run(&["config"], &path);
    assert!(ok);
    assert!(stdout.contains("\"page_size\": 20"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.json");
    let (_, stderr, ok) = run(&["fields"], &missing);
    assert!(!ok);
    assert!(stderr.contains("Failed to read config file"), "stderr: {stderr}");
}
