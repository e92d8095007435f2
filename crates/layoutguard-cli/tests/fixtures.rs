//! End-to-end CLI integration tests using test fixtures.
//!
//! Each `ntp_*` fixture in `tests/fixtures/` contains a `modules/ntp/test/layout` (except
//! `ntp_missing_layout`), YAML data files, and optionally an `expected.report.json` whose
//! timestamps and tool version use placeholders.

use assert_cmd::Command;
use layoutguard_test_util::normalize_nondeterministic;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get a Command for the layoutguard binary.
/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn layoutguard_cmd() -> Command {
    Command::cargo_bin("layoutguard").expect("layoutguard binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("layoutguard-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}

/// Run `check --module ntp` against a fixture and return the exit code and normalized report.
fn run_check_on_fixture(fixture_name: &str, extra: &[&str]) -> (i32, Value) {
    let fixture_path = fixtures_dir().join(fixture_name);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = layoutguard_cmd()
        .arg("--root")
        .arg(&fixture_path)
        .args(["check", "--module", "ntp"])
        .args(extra)
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("Failed to run command");

    let exit_code = output.status.code().unwrap_or(-1);
    (exit_code, normalize_nondeterministic(read_json(&report_path)))
}

fn assert_matches_golden(fixture_name: &str, expected_exit: i32) {
    let (exit_code, actual) = run_check_on_fixture(fixture_name, &[]);
    let expected = read_json(&fixtures_dir().join(fixture_name).join("expected.report.json"));
    assert_eq!(exit_code, expected_exit, "exit code for {fixture_name}");
    assert_eq!(
        actual,
        expected,
        "report for {fixture_name}:\n{}",
        serde_json::to_string_pretty(&actual).unwrap_or_default()
    );
}

#[test]
fn clean_fixture_passes() {
    assert_matches_golden("ntp_clean", 0);
}

#[test]
fn mismatch_fixture_fails_with_exit_2() {
    assert_matches_golden("ntp_mismatch", 2);
}

#[test]
fn empty_data_fixture_is_skipped_with_exit_0() {
    assert_matches_golden("ntp_empty_data", 0);
}

#[test]
fn missing_layout_is_a_runtime_error() {
    let (exit_code, report) = run_check_on_fixture("ntp_missing_layout", &[]);
    assert_eq!(exit_code, 1);
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["files"], Value::Array(Vec::new()));
    assert_eq!(report["data"]["error"]["code"], "layout_unavailable");
    let message = report["data"]["error"]["message"].as_str().expect("message");
    assert!(message.starts_with("Module: ntp needs ntp/test/layout with right perms"));
}

#[test]
fn missing_layout_is_reported_on_stderr() {
    let temp_dir = TempDir::new().expect("temp dir");
    layoutguard_cmd()
        .arg("--root")
        .arg(fixtures_dir().join("ntp_missing_layout"))
        .args(["check", "--module", "ntp", "--report-out"])
        .arg(temp_dir.path().join("report.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Module: ntp needs ntp/test/layout with right perms",
        ));
}

#[test]
fn module_comes_from_config_file() {
    let temp_dir = TempDir::new().expect("temp dir");
    // ntp_clean ships a layoutguard.toml naming the module.
    layoutguard_cmd()
        .arg("--root")
        .arg(fixtures_dir().join("ntp_clean"))
        .args(["check", "--report-out"])
        .arg(temp_dir.path().join("report.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("layoutguard: pass (2 passed, 0 failed, 1 skipped)"));
}

#[test]
fn missing_module_is_a_runtime_error() {
    let temp_dir = TempDir::new().expect("temp dir");
    let report_path = temp_dir.path().join("report.json");
    layoutguard_cmd()
        .arg("--root")
        .arg(fixtures_dir().join("ntp_mismatch"))
        .args(["check", "--report-out"])
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no module given"));
    assert_eq!(read_json(&report_path)["data"]["error"]["code"], "runtime_error");
}

#[test]
fn failing_files_are_printed() {
    let temp_dir = TempDir::new().expect("temp dir");
    layoutguard_cmd()
        .arg("--root")
        .arg(fixtures_dir().join("ntp_mismatch"))
        .args(["check", "--module", "ntp", "--report-out"])
        .arg(temp_dir.path().join("report.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "FAIL data/bad.yaml: Data for module: ntp is not inline with the defined layout: modules/ntp/test/layout (at ntp.options)",
        ));
}

#[test]
fn excluding_the_bad_file_passes() {
    let (exit_code, report) = run_check_on_fixture("ntp_mismatch", &["--exclude", "bad.yaml"]);
    assert_eq!(exit_code, 0);
    assert_eq!(report["data"]["files_scanned"], 1);
}

#[test]
fn by_name_pairing_is_recorded() {
    let (exit_code, report) = run_check_on_fixture("ntp_clean", &["--pairing", "by-name"]);
    assert_eq!(exit_code, 0);
    assert_eq!(report["data"]["pairing"], "by-name");
}

#[test]
fn md_and_annotations_render_a_written_report() {
    let temp_dir = TempDir::new().expect("temp dir");
    let report_path = temp_dir.path().join("report.json");
    let markdown_path = temp_dir.path().join("comment.md");

    layoutguard_cmd()
        .arg("--root")
        .arg(fixtures_dir().join("ntp_mismatch"))
        .args(["check", "--module", "ntp", "--write-markdown", "--report-out"])
        .arg(&report_path)
        .arg("--markdown-out")
        .arg(&markdown_path)
        .assert()
        .code(2);

    let markdown = std::fs::read_to_string(&markdown_path).expect("read markdown");
    assert!(markdown.contains("# Layoutguard report"));
    assert!(markdown.contains("Verdict: **FAIL**"));

    layoutguard_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Failures"));

    layoutguard_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "::error file=data/bad.yaml::[layout.shape:shape_mismatch]",
        ));
}

#[test]
fn schema_subcommand_prints_json() {
    let output = layoutguard_cmd()
        .args(["schema", "config"])
        .output()
        .expect("run schema");
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("schema json");
    assert!(value["properties"]["module"].is_object());
}
