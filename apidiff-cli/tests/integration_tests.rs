//! Integration tests for the apidiff CLI
//!
//! Tests end-to-end command behavior using the CLI binary.
//! Uses tempfile for isolated test directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Get the path to the apidiff binary (built by cargo)
fn apidiff_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_apidiff"))
}

/// Run apidiff with the given args in the specified directory
fn run_apidiff(dir: &Path, args: &[&str]) -> Output {
    apidiff_binary()
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute apidiff command")
}

/// Get stdout as string
fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as string
fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const OLD_DUMP: &str = r#"{
    "units": [
        {
            "name": "MyLib",
            "declarations": [
                { "kind": "struct", "name": "A", "modifiers": ["public"] },
                {
                    "kind": "struct",
                    "name": "Client",
                    "modifiers": ["public"],
                    "members": [
                        { "kind": "function", "name": "fetch", "modifiers": ["public"], "return_type": "String" }
                    ]
                }
            ]
        },
        {
            "name": "Legacy",
            "declarations": [
                { "kind": "struct", "name": "Old", "modifiers": ["public"] }
            ]
        }
    ]
}"#;

const NEW_DUMP: &str = r#"{
    "units": [
        {
            "name": "MyLib",
            "declarations": [
                {
                    "kind": "struct",
                    "name": "Client",
                    "modifiers": ["public"],
                    "members": [
                        { "kind": "function", "name": "fetch", "modifiers": ["public"], "return_type": "String?" }
                    ]
                },
                { "kind": "struct", "name": "C", "modifiers": ["public"] }
            ]
        },
        {
            "name": "UI",
            "declarations": [
                { "kind": "struct", "name": "View", "modifiers": ["public"] }
            ]
        }
    ]
}"#;

/// Write the old and new dumps into the temp directory
fn setup_dumps(dir: &Path) {
    fs::write(dir.join("old.json"), OLD_DUMP).expect("Failed to write old dump");
    fs::write(dir.join("new.json"), NEW_DUMP).expect("Failed to write new dump");
}

fn parse_json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(output)).expect("stdout is not valid JSON")
}

// ============================================================================
// Basic CLI
// ============================================================================

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run_apidiff(dir.path(), &["--help"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Semantic diffing of public API surfaces"));
}

#[test]
fn test_no_command_prints_help() {
    let dir = TempDir::new().unwrap();
    let output = run_apidiff(dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}

#[test]
fn test_version_verbose() {
    let dir = TempDir::new().unwrap();
    let output = run_apidiff(dir.path(), &["--version-verbose"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("apidiff-core:"));
}

// ============================================================================
// Diff Command
// ============================================================================

#[test]
fn test_diff_table() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(dir.path(), &["diff", "old.json", "new.json"]);
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("DIFF: old.json -> new.json"));
    assert!(out.contains("Found 5 changes in 3 units"));
    assert!(out.contains("+ public struct C (MyLib)"));
    assert!(out.contains("~ public func fetch() -> String (MyLib.Client)"));
    assert!(out.contains("- public struct A (MyLib)"));
    assert!(out.contains("unit `Legacy` only exists in the old version"));
}

#[test]
fn test_diff_json() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(dir.path(), &["diff", "old.json", "new.json", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    assert_eq!(json["summary"]["additions"], 2);
    assert_eq!(json["summary"]["removals"], 2);
    assert_eq!(json["summary"]["modifications"], 1);
    assert_eq!(json["summary_text"], "2 added, 1 modified, 2 removed");

    let changes = json["units"]["MyLib"]["changes"].as_array().unwrap();
    assert_eq!(changes.len(), 3);
    let modification = changes
        .iter()
        .find(|c| c["type"] == "modification")
        .expect("no modification in MyLib");
    assert_eq!(modification["parent_path"], "MyLib.Client");
    assert_eq!(modification["old_description"], "public func fetch() -> String");
    assert_eq!(modification["new_description"], "public func fetch() -> String?");
    assert_eq!(
        modification["field_diffs"][0],
        "return type changed from `String` to `String?`"
    );

    assert_eq!(
        json["units"]["UI"]["warnings"][0],
        "unit `UI` only exists in the new version"
    );
}

#[test]
fn test_diff_markdown_with_title() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(
        dir.path(),
        &[
            "diff",
            "old.json",
            "new.json",
            "--format",
            "markdown",
            "--title",
            "Release 2.0",
        ],
    );
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.starts_with("# Release 2.0"));
    assert!(out.contains("## MyLib"));
    assert!(out.contains("### `MyLib.Client`"));
    assert!(out.contains("#### Modified"));
    assert!(out.contains("> unit `Legacy` only exists in the old version"));
}

#[test]
fn test_diff_single_unit() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(
        dir.path(),
        &["diff", "old.json", "new.json", "--unit", "UI", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    let units = json["units"].as_object().unwrap();
    assert_eq!(units.keys().collect::<Vec<_>>(), vec!["UI"]);
}

#[test]
fn test_diff_unknown_unit_fails() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(dir.path(), &["diff", "old.json", "new.json", "--unit", "Nope"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Nope"));
}

#[test]
fn test_diff_identical_dumps() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(
        dir.path(),
        &["diff", "old.json", "old.json", "--fail-on-changes", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    assert_eq!(json["summary_text"], "No changes");
}

#[test]
fn test_diff_fail_on_changes() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(
        dir.path(),
        &["diff", "old.json", "new.json", "--fail-on-changes"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("DIFF:"));
}

#[test]
fn test_diff_output_file() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(
        dir.path(),
        &[
            "diff",
            "old.json",
            "new.json",
            "--format",
            "markdown",
            "--output",
            "CHANGES.md",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let written = fs::read_to_string(dir.path().join("CHANGES.md")).unwrap();
    assert!(written.starts_with("# API Changes"));
    assert!(!written.contains('\u{1b}'));
}

#[test]
fn test_diff_missing_file() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(dir.path(), &["diff", "old.json", "missing.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read declaration dump missing.json"));
}

#[test]
fn test_diff_invalid_dump() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let output = run_apidiff(dir.path(), &["diff", "old.json", "broken.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid declaration dump broken.json"));
}

#[test]
fn test_diff_duplicate_unit_fails() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());
    fs::write(
        dir.path().join("twice.json"),
        r#"{ "units": [ { "name": "MyLib" }, { "name": "MyLib" } ] }"#,
    )
    .unwrap();

    let output = run_apidiff(dir.path(), &["diff", "twice.json", "new.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("unit `MyLib` appears more than once"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_format_and_ignore_units() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());
    fs::write(
        dir.path().join(".apidiffrc.toml"),
        r#"
[output]
format = "json"

[diff]
ignore_units = ["Legacy"]
"#,
    )
    .unwrap();

    let output = run_apidiff(dir.path(), &["diff", "old.json", "new.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    assert!(json["units"].get("Legacy").is_none());
    assert!(json["units"].get("MyLib").is_some());
}

#[test]
fn test_cli_format_overrides_config() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());
    fs::write(
        dir.path().join(".apidiffrc.toml"),
        "[output]\nformat = \"json\"\n\n[report]\ntitle = \"From Config\"\n",
    )
    .unwrap();

    let output = run_apidiff(
        dir.path(),
        &["diff", "old.json", "new.json", "--format", "markdown"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("# From Config"));
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());
    fs::write(dir.path().join(".apidiffrc.toml"), "[output\nformat =").unwrap();

    let output = run_apidiff(dir.path(), &["diff", "old.json", "new.json"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("DIFF:"));
    assert!(stderr(&output).contains("Failed to parse .apidiffrc.toml"));
}

// ============================================================================
// Describe Command
// ============================================================================

#[test]
fn test_describe() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(dir.path(), &["describe", "old.json"]);
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("module MyLib {"));
    assert!(out.contains("public struct Client {"));
    assert!(out.contains("module Legacy {"));
}

#[test]
fn test_describe_single_unit_json() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(
        dir.path(),
        &["describe", "new.json", "--unit", "UI", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json = parse_json(&output);
    let units = json["units"].as_array().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0]["name"], "UI");
    assert_eq!(units[0]["declarations"], 1);
}

#[test]
fn test_describe_unknown_unit() {
    let dir = TempDir::new().unwrap();
    setup_dumps(dir.path());

    let output = run_apidiff(dir.path(), &["describe", "new.json", "--unit", "Nope"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unit not found: Nope"));
}
