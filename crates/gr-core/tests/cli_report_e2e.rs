//! End-to-end tests for the greatify binary.
//!
//! These tests run the real binary against snapshot and config files written
//! to a temp dir and check stdout, written files and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LIBRARY: &str = r#"{
  "schema_version": "1.0.0",
  "items": [
    { "id": 1, "item_type": "book", "title": "Dune",
      "fields": { "date": "1965" },
      "creators": [
        { "creatorType": "author", "firstName": "Frank", "lastName": "Herbert" }
      ] },
    { "id": 2, "item_type": "attachment", "title": "cover.jpg", "parent": 1,
      "attachment": { "content_type": "image/jpeg", "data": "/9j/4A==" } },
    { "id": 3, "item_type": "note", "parent": 1, "note": "<p>Reread in winter</p>" },
    { "id": 4, "item_type": "book", "title": "Emma",
      "creators": [
        { "role": "author", "lastName": "Austen" },
        { "role": "editor", "firstName": "Fiona", "lastName": "Stafford" }
      ] },
    { "id": 5, "item_type": "attachment", "title": "cover.jpg", "parent": 4,
      "attachment": { "path": "files/missing.jpg" } }
  ]
}"#;

/// Get a Command for the greatify binary with a clean environment.
fn greatify() -> Command {
    let mut cmd = Command::cargo_bin("greatify").expect("greatify binary should exist");
    cmd.env_remove("GREATIFY_CONFIG")
        .env_remove("GREATIFY_CONFIG_DIR")
        .env_remove("GREATIFY_LOG")
        .env_remove("GREATIFY_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent-greatify-test");
    cmd
}

fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, LIBRARY).unwrap();
    (dir, path)
}

fn write_config(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

// ============================================================================
// report
// ============================================================================

mod report {
    use super::*;

    #[test]
    fn report_selected_item_to_stdout() {
        let (_dir, library) = fixture();
        greatify()
            .args(["report", "--library"])
            .arg(&library)
            .arg("1")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
            .stdout(predicate::str::contains("<h1>Report (1 item)</h1>"))
            .stdout(predicate::str::contains("Author: Frank Herbert"))
            .stdout(predicate::str::contains("<p>Reread in winter</p>"))
            .stdout(predicate::str::contains("data:image/jpeg;base64,/9j/4A=="));
    }

    #[test]
    fn child_ids_are_dropped() {
        let (_dir, library) = fixture();
        greatify()
            .args(["report", "--library"])
            .arg(&library)
            .args(["2", "3", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("<h1>Report (1 item)</h1>"));
    }

    #[test]
    fn missing_cover_fails_with_cover_exit_code() {
        let (_dir, library) = fixture();
        greatify()
            .args(["report", "--all", "--library"])
            .arg(&library)
            .assert()
            .code(13)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("attachment 5"));
    }

    #[test]
    fn placeholder_policy_from_config_file() {
        let (dir, library) = fixture();
        let config = write_config(
            dir.path(),
            "report.toml",
            "title = \"Reading list\"\ncover_errors = \"placeholder\"\n",
        );
        greatify()
            .arg("--config")
            .arg(&config)
            .args(["report", "--all", "--library"])
            .arg(&library)
            .assert()
            .success()
            .stdout(predicate::str::contains("<title>Reading list</title>"))
            .stdout(predicate::str::contains("<h1>Report (2 items)</h1>"))
            .stdout(predicate::str::contains("Editor: Fiona Stafford"))
            .stdout(predicate::str::contains("cover-placeholder"));
    }

    #[test]
    fn output_file_and_title_override() {
        let (dir, library) = fixture();
        let out = dir.path().join("out/report.html");
        greatify()
            .args(["report", "--title", "Shelf", "-o"])
            .arg(&out)
            .arg("--library")
            .arg(&library)
            .arg("1")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<title>Shelf</title>"));
        assert!(html.contains(r#"onclick="window.print()""#));
    }

    #[test]
    fn data_url_output() {
        let (_dir, library) = fixture();
        greatify()
            .args(["report", "--data-url", "--library"])
            .arg(&library)
            .arg("1")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("data:text/html;base64,"));
    }

    #[test]
    fn no_selection_is_args_error() {
        let (_dir, library) = fixture();
        greatify()
            .args(["report", "--library"])
            .arg(&library)
            .assert()
            .code(10)
            .stderr(predicate::str::contains("no items selected"));
    }

    #[test]
    fn unknown_item_is_store_error() {
        let (_dir, library) = fixture();
        greatify()
            .args(["report", "--library"])
            .arg(&library)
            .arg("99")
            .assert()
            .code(12)
            .stderr(predicate::str::contains("item 99 not found"));
    }

    #[test]
    fn missing_library_is_store_error() {
        greatify()
            .args(["report", "--all", "--library", "/nonexistent/library.json"])
            .assert()
            .code(12);
    }

    #[test]
    fn jsonl_logs_go_to_stderr() {
        let (_dir, library) = fixture();
        greatify()
            .args(["-v", "--log-format", "jsonl", "report", "--library"])
            .arg(&library)
            .arg("1")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
            .stderr(predicate::str::contains("\"report.finished\""));
    }
}

// ============================================================================
// check / schema / version
// ============================================================================

mod other_commands {
    use super::*;

    #[test]
    fn check_defaults_ok() {
        greatify()
            .args(["check", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"status\": \"ok\""))
            .stdout(predicate::str::contains("builtin default"));
    }

    #[test]
    fn check_invalid_config_fails() {
        let dir = TempDir::new().unwrap();
        let config = write_config(
            dir.path(),
            "report.json",
            r#"{ "extra_field_keys": [
                { "key": "a", "label": "A", "display_index": 1 },
                { "key": "b", "label": "B", "display_index": 1 } ] }"#,
        );
        greatify()
            .arg("--config")
            .arg(&config)
            .arg("check")
            .assert()
            .code(11)
            .stdout(predicate::str::contains("duplicate display_index"));
    }

    #[test]
    fn check_library() {
        let (_dir, library) = fixture();
        greatify()
            .args(["check", "--format", "json", "--library"])
            .arg(&library)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"top_level_items\": 2"));
    }

    #[test]
    fn schema_list_and_single() {
        greatify()
            .args(["schema", "--list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("LibrarySnapshot"))
            .stdout(predicate::str::contains("ReportConfig"));

        greatify()
            .args(["schema", "ReportConfig", "--compact"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cover_filename_rule"));
    }

    #[test]
    fn schema_unknown_type_fails() {
        greatify()
            .args(["schema", "Nope"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown schema type"));
    }

    #[test]
    fn version_json() {
        greatify()
            .args(["version", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"snapshot_schema_version\": \"1.0.0\""));
    }

    #[test]
    fn unknown_command_fails() {
        greatify()
            .arg("nonexistent-command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }
}
