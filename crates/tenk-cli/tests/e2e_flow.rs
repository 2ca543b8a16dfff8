//! End-to-end integration tests for the `tenk` binary.
//!
//! Each test runs the binary against its own temporary home directory and
//! database, exercising the full load → mutate → save cycle per command.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn tenk_binary() -> String {
    env!("CARGO_BIN_EXE_tenk").to_string()
}

fn db_path(temp: &Path) -> PathBuf {
    temp.join("data").join("tenk.db")
}

/// Run `tenk` with an isolated home and database.
fn tenk(temp: &Path, args: &[&str]) -> Output {
    Command::new(tenk_binary())
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env("TENK_DATABASE_PATH", db_path(temp))
        .args(args)
        .output()
        .expect("failed to run tenk")
}

/// Run `tenk` and assert success, returning stdout.
fn tenk_ok(temp: &Path, args: &[&str]) -> String {
    let output = tenk(temp, args);
    assert!(
        output.status.success(),
        "tenk {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_fresh_status_creates_database() {
    let temp = TempDir::new().unwrap();
    let stdout = tenk_ok(temp.path(), &["status"]);

    assert!(stdout.contains("Category: General"));
    assert!(stdout.contains("Total:    00:00:00"));
    assert!(stdout.contains("Session:  idle"));
    assert!(db_path(temp.path()).exists());
}

#[test]
fn test_quick_add_to_new_category() {
    let temp = TempDir::new().unwrap();
    tenk_ok(temp.path(), &["category", "add", "Go"]);
    tenk_ok(temp.path(), &["add", "5"]);
    tenk_ok(temp.path(), &["add", "-1"]);

    let stdout = tenk_ok(temp.path(), &["status"]);
    assert!(stdout.contains("Category: Go"));
    assert!(stdout.contains("Total:    00:05:00"));
    assert!(stdout.contains("* Go: 00:05:00"));
    assert!(stdout.contains("- General: 00:00:00"));
}

#[test]
fn test_session_survives_between_invocations() {
    let temp = TempDir::new().unwrap();
    tenk_ok(temp.path(), &["category", "add", "Rust"]);

    let stdout = tenk_ok(temp.path(), &["start"]);
    assert_eq!(stdout, "Started session for Rust\n");

    // Switching the displayed category must not rebind the running session
    tenk_ok(temp.path(), &["category", "select", "General"]);
    let stdout = tenk_ok(temp.path(), &["status"]);
    assert!(stdout.contains("(running for Rust)"));

    let stdout = tenk_ok(temp.path(), &["stop"]);
    assert!(stdout.starts_with("Stopped: +"));
    assert!(stdout.contains(" to Rust "));

    let stdout = tenk_ok(temp.path(), &["stop"]);
    assert_eq!(stdout, "No session running\n");
}

#[test]
fn test_export_reset_import_roundtrip() {
    let temp = TempDir::new().unwrap();
    let export_path = temp.path().join("backup.json");
    let export_arg = export_path.to_str().unwrap();

    tenk_ok(temp.path(), &["category", "add", "Rust"]);
    tenk_ok(temp.path(), &["add", "90"]);
    tenk_ok(temp.path(), &["export", "--output", export_arg]);

    let exported: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&export_path).unwrap()).unwrap();
    assert_eq!(exported["techTotals"]["Rust"], 5400);
    assert_eq!(exported["totalSeconds"], 5400);
    assert!(exported["exportedAt"].is_string());

    tenk_ok(temp.path(), &["reset", "--yes"]);
    let stdout = tenk_ok(temp.path(), &["category", "list"]);
    assert!(!stdout.contains("Rust"));

    tenk_ok(temp.path(), &["import", export_arg]);
    let stdout = tenk_ok(temp.path(), &["status"]);
    assert!(stdout.contains("Category: Rust"));
    assert!(stdout.contains("Total:    01:30:00"));
}

#[test]
fn test_malformed_import_keeps_state() {
    let temp = TempDir::new().unwrap();
    let bad = temp.path().join("bad.json");
    std::fs::write(&bad, "this is not json").unwrap();

    tenk_ok(temp.path(), &["add", "2"]);
    let before = tenk_ok(temp.path(), &["status"]);

    let output = tenk(temp.path(), &["import", bad.to_str().unwrap()]);
    assert!(!output.status.success(), "malformed import should fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains("import failed"));

    let after = tenk_ok(temp.path(), &["status"]);
    assert_eq!(before, after);
}

#[test]
fn test_legacy_import_migrates_to_general() {
    let temp = TempDir::new().unwrap();
    let legacy = temp.path().join("legacy.json");
    std::fs::write(&legacy, r#"{"totalSeconds": 7200}"#).unwrap();

    tenk_ok(temp.path(), &["import", legacy.to_str().unwrap()]);
    let stdout = tenk_ok(temp.path(), &["status"]);
    assert!(stdout.contains("Category: General"));
    assert!(stdout.contains("Total:    02:00:00"));
}

#[test]
fn test_import_keeps_category_order() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ordered.json");
    std::fs::write(
        &file,
        r#"{"techTotals": {"Zig": 60, "Elm": 120}, "running": null, "overlayAlpha": "0.5"}"#,
    )
    .unwrap();

    tenk_ok(temp.path(), &["import", file.to_str().unwrap()]);
    let stdout = tenk_ok(temp.path(), &["category", "list"]);
    let names: Vec<_> = stdout
        .lines()
        .filter_map(|line| line.get(2..).and_then(|rest| rest.split_whitespace().next()))
        .collect();
    assert_eq!(names, ["Zig", "Elm"]);
    assert!(stdout.starts_with("* Zig"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    tenk_ok(temp.path(), &["add", "1"]);

    let output = tenk(temp.path(), &["reset"]);
    assert!(!output.status.success());

    let stdout = tenk_ok(temp.path(), &["status"]);
    assert!(stdout.contains("Total:    00:01:00"));
}

#[test]
fn test_invalid_category_operations_fail() {
    let temp = TempDir::new().unwrap();

    let output = tenk(temp.path(), &["category", "select", "Cobol"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown category: Cobol"));

    let output = tenk(temp.path(), &["category", "add", "General"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("category already exists"));
}

#[test]
fn test_watch_with_ticks_exits() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(tenk_binary())
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env("TENK_DATABASE_PATH", db_path(temp.path()))
        .env("TENK_REFRESH_INTERVAL_MS", "5")
        .args(["watch", "--ticks", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("Category: General").count(), 2);
}

#[test]
fn test_background_and_effects_preferences() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("stars.jpg");
    std::fs::write(&image, [0xff, 0xd8, 0xff]).unwrap();

    tenk_ok(temp.path(), &["background", "set", image.to_str().unwrap()]);
    tenk_ok(temp.path(), &["background", "fit", "contain"]);
    tenk_ok(temp.path(), &["background", "overlay", "0.5"]);
    tenk_ok(temp.path(), &["effects", "on"]);
    tenk_ok(temp.path(), &["effects", "pause"]);

    let stdout = tenk_ok(temp.path(), &["status"]);
    assert!(stdout.contains("Background: image (contain, fixed, overlay 0.50)"));
    assert!(stdout.contains("Effects:    on (paused)"));

    let output = tenk(temp.path(), &["background", "fit", "tile"]);
    assert!(!output.status.success());
}
