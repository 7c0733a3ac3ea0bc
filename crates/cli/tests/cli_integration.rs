//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `gridcalc` binary and verify exit codes,
//! stdout content, and stderr content. Every test runs in its own temporary
//! directory so a stray `gridcalc.toml` cannot leak in.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: a `gridcalc` command rooted at `dir`.
fn gridcalc(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("gridcalc");
    cmd.current_dir(dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Helper: write `content` to `name` inside `dir`.
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spreadsheet formula evaluator"));
}

#[test]
fn version_exits_0() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gridcalc"));
}

// ──────────────────────────────────────────────
// 2. eval
// ──────────────────────────────────────────────

#[test]
fn eval_arithmetic() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["eval", "5 + 3"])
        .assert()
        .success()
        .stdout("8\n");
    gridcalc(&dir)
        .args(["eval", "=10 + 5 * 2"])
        .assert()
        .success()
        .stdout("20\n");
    gridcalc(&dir)
        .args(["eval", "7 / 2"])
        .assert()
        .success()
        .stdout("3.5\n");
}

#[test]
fn eval_comparison_and_functions() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["eval", "5 = 5"])
        .assert()
        .success()
        .stdout("true\n");
    gridcalc(&dir)
        .args(["eval", "mmax(3, 11, 4)"])
        .assert()
        .success()
        .stdout("11\n");
}

#[test]
fn eval_division_by_zero_fails() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["eval", "10 / 0"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("division by zero (position 3)"));
}

#[test]
fn eval_json_output() {
    let dir = TempDir::new().unwrap();
    let output = gridcalc(&dir)
        .args(["--output", "json", "eval", "5 = 5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["value"]["type"], "boolean");
    assert_eq!(json["value"]["value"], true);
    assert!(json.get("error_message").is_none());
}

#[test]
fn eval_json_failure_reports_category() {
    let dir = TempDir::new().unwrap();
    let output = gridcalc(&dir)
        .args(["eval", "--output", "json", "max(1)"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error_category"], "syntactic");
    assert_eq!(
        json["error_message"],
        "function max expects exactly 2 arguments, got 1"
    );
}

#[test]
fn eval_with_cells_file() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "cells.json", r#"{"A1": "10", "B1": "=A1 * 2"}"#);
    gridcalc(&dir)
        .args(["eval", "=B1 + A1", "--cells"])
        .arg(&cells)
        .assert()
        .success()
        .stdout("30\n");
}

#[test]
fn eval_reference_without_cells_fails() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["eval", "A1 + 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no spreadsheet context to resolve cell reference A1",
        ));
}

#[test]
fn eval_detects_cycles_through_origin() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "cells.json", r#"{"A1": "=B1", "B1": "=A1"}"#);
    gridcalc(&dir)
        .args(["eval", "=B1", "--cell", "A1", "--cells"])
        .arg(&cells)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic reference: A1 → B1 → A1"));
}

#[test]
fn quiet_suppresses_errors() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["--quiet", "eval", "1 +"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("");
}

#[test]
fn bad_cells_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "cells.json", r#"["A1"]"#);
    gridcalc(&dir)
        .args(["eval", "1", "--cells"])
        .arg(&cells)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error parsing cells"));

    gridcalc(&dir)
        .args(["eval", "1", "--cells", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file 'missing.json'"));
}

// ──────────────────────────────────────────────
// 3. Configuration and depth
// ──────────────────────────────────────────────

const DEEP_CHAIN: &str = r#"{"A1": "=A2", "A2": "=A3", "A3": "=A4", "A4": "=A5", "A5": "=A6", "A6": "1"}"#;

#[test]
fn max_depth_from_default_config_file() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "cells.json", DEEP_CHAIN);
    write_file(&dir, "gridcalc.toml", "[eval]\nmax_depth = 2\n");
    gridcalc(&dir)
        .args(["eval", "A1", "--cells"])
        .arg(&cells)
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 2"));
}

#[test]
fn max_depth_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "cells.json", DEEP_CHAIN);
    write_file(&dir, "gridcalc.toml", "[eval]\nmax_depth = 2\n");
    gridcalc(&dir)
        .args(["eval", "A1", "--max-depth", "10", "--cells"])
        .arg(&cells)
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "cells.json", DEEP_CHAIN);
    let config = write_file(&dir, "strict.toml", "[eval]\nmax_depth = 3\n");
    gridcalc(&dir)
        .arg("--config")
        .arg(&config)
        .args(["eval", "A1", "--cells"])
        .arg(&cells)
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 3"));
}

#[test]
fn missing_config_path_fails() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["--config", "nope.toml", "eval", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read 'nope.toml'"));
}

// ──────────────────────────────────────────────
// 4. check and tokens
// ──────────────────────────────────────────────

#[test]
fn check_accepts_and_rejects() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["check", "=1 + 2"])
        .assert()
        .success()
        .stdout("syntax ok\n");
    gridcalc(&dir)
        .args(["check", "="])
        .assert()
        .success()
        .stdout("empty formula\n");
    // Semantics are not checked.
    gridcalc(&dir)
        .args(["check", "1 / 0 + Z9"])
        .assert()
        .success();
    gridcalc(&dir)
        .args(["check", "(1 + 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected RightParen, found End at position 6",
        ));
}

#[test]
fn tokens_text() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["tokens", "max(1, B2)"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Function: max at 0\nLeftParen: ( at 3\n"))
        .stdout(predicate::str::contains("CellReference: B2 at 7"));
}

#[test]
fn tokens_json() {
    let dir = TempDir::new().unwrap();
    let output = gridcalc(&dir)
        .args(["--output", "json", "tokens", "=5 + 3"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = json.as_array().unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0]["kind"], "Number");
    assert_eq!(tokens[0]["position"], 1);
    assert_eq!(tokens[3]["kind"], "End");
}

#[test]
fn tokens_lexical_error() {
    let dir = TempDir::new().unwrap();
    gridcalc(&dir)
        .args(["tokens", "1 # 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character '#' at position 2"));
}

// ──────────────────────────────────────────────
// 5. recalc
// ──────────────────────────────────────────────

#[test]
fn recalc_prints_every_cell() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(
        &dir,
        "sheet.json",
        r#"{"A1": 4, "B1": "=A1 * 5", "A2": "=max(A1, B1)"}"#,
    );
    gridcalc(&dir)
        .arg("recalc")
        .arg(&cells)
        .assert()
        .success()
        .stdout("A1 = 4\nB1 = 20\nA2 = 20\n");
}

#[test]
fn recalc_fails_when_any_cell_fails() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(
        &dir,
        "sheet.json",
        r#"{"A1": "=B1", "B1": "=A1", "C1": "=2 + 2"}"#,
    );
    gridcalc(&dir)
        .arg("recalc")
        .arg(&cells)
        .assert()
        .failure()
        .stdout(predicate::str::contains("A1 ! cyclic reference: A1 → B1 → A1"))
        .stdout(predicate::str::contains("C1 = 4"));
}

#[test]
fn recalc_json() {
    let dir = TempDir::new().unwrap();
    let cells = write_file(&dir, "sheet.json", r#"{"B2": "=1 / 0", "A1": "x"}"#);
    let output = gridcalc(&dir)
        .args(["--output", "json", "recalc"])
        .arg(&cells)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rows"], 2);
    assert_eq!(json["columns"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["cells"][0]["reference"], "A1");
    assert_eq!(json["cells"][0]["value"]["value"], "x");
    assert_eq!(json["cells"][1]["error"], "division by zero");
}
