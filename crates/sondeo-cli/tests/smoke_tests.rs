//! Smoke tests for the sondeo CLI
//!
//! These tests run the real binary against snapshot files on disk.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command for the sondeo binary
fn sondeo() -> Command {
    let mut cmd = Command::cargo_bin("sondeo").expect("sondeo binary should exist");
    cmd.env_remove("SONDEO_CONFIG").env_remove("RUST_LOG");
    cmd
}

const LOCATORS_JSON: &str = r##"[
  {"locatorType": "role", "expression": "button", "usedInTests": ["a", "b", "c", "d", "e"]},
  {"locatorType": "css", "expression": "#login-button", "usedInTests": ["login", "checkout"]},
  {"locatorType": "css", "expression": "#login-buttons", "usedInTests": ["login"]},
  {"locatorType": "xpath", "expression": "//div[3]/span[2]/a", "usedInTests": ["a"]}
]"##;

const RUNS_YAML: &str = r##"
- testName: Login
  status: passed
  startedAt: 2026-05-01T01:00:00Z
- testName: Checkout
  status: passed
  startedAt: 2026-05-01T01:30:00Z
- testName: Login
  status: passed
  startedAt: 2026-05-01T02:00:00Z
- testName: Checkout
  status: passed
  startedAt: 2026-05-01T02:30:00Z
- testName: Login
  status: failed
  startedAt: 2026-05-01T03:00:00Z
  assertionFailures:
    - assertionType: Timeout waiting for selector
      target: "#login-button"
- testName: Checkout
  status: passed
  startedAt: 2026-05-01T03:30:00Z
- testName: Login
  status: failed
  startedAt: 2026-05-01T04:00:00Z
  assertionFailures:
    - assertionType: Timeout waiting for selector
- testName: Checkout
  status: passed
  startedAt: 2026-05-01T04:30:00Z
"##;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(dir.path().join("locators.json"), LOCATORS_JSON).expect("write locators");
        fs::write(dir.path().join("runs.yaml"), RUNS_YAML).expect("write runs");
        Self { dir }
    }

    fn locators(&self) -> String {
        self.path("locators.json").to_str().unwrap().to_string()
    }

    fn runs(&self) -> String {
        self.path("runs.yaml").to_str().unwrap().to_string()
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    sondeo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    sondeo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("duplicates"))
        .stdout(predicate::str::contains("flaky"));
}

#[test]
fn test_no_args_shows_help() {
    sondeo().assert().failure(); // Requires a subcommand
}

// ============================================================================
// Locator Commands
// ============================================================================

#[test]
fn test_health_text() {
    let fx = Fixture::new();
    sondeo()
        .args(["health", &fx.locators()])
        .assert()
        .success()
        .stdout(predicate::str::contains("LOCATOR HEALTH"))
        .stdout(predicate::str::contains("role:button"))
        .stdout(predicate::str::contains("Locators: 4"));
}

#[test]
fn test_health_json() {
    let fx = Fixture::new();
    let output = sondeo()
        .args(["health", &fx.locators(), "--format", "json"])
        .output()
        .expect("run sondeo");
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["summary"]["locatorCount"], 4);
    assert_eq!(parsed["locators"].as_array().unwrap().len(), 4);
    assert_eq!(parsed["locators"][0]["health"]["status"], "excellent");
}

#[test]
fn test_health_min_fails_below_threshold() {
    let fx = Fixture::new();
    sondeo()
        .args(["health", &fx.locators(), "--min", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scored below 100"));
}

#[test]
fn test_health_min_passes() {
    let fx = Fixture::new();
    sondeo()
        .args(["health", &fx.locators(), "--min", "0"])
        .assert()
        .success();
}

#[test]
fn test_duplicates_text() {
    let fx = Fixture::new();
    sondeo()
        .args(["duplicates", &fx.locators()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep:    css:#login-button"))
        .stdout(predicate::str::contains("Replace: css:#login-buttons"));
}

#[test]
fn test_duplicates_strict_threshold_finds_nothing() {
    let fx = Fixture::new();
    sondeo()
        .args(["duplicates", &fx.locators(), "--threshold", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicate locators found"));
}

// ============================================================================
// Run History Commands
// ============================================================================

#[test]
fn test_failures_text() {
    let fx = Fixture::new();
    sondeo()
        .args(["failures", &fx.runs()])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout"));
}

#[test]
fn test_flaky_json() {
    let fx = Fixture::new();
    let output = sondeo()
        .args(["flaky", &fx.runs(), "--format", "json"])
        .output()
        .expect("run sondeo");
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = parsed.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["testName"], "Login");
    assert_eq!(reports[0]["flakinessScore"], 100);
}

#[test]
fn test_trend_worsening() {
    let fx = Fixture::new();
    sondeo()
        .args(["trend", &fx.runs()])
        .assert()
        .success()
        .stdout(predicate::str::contains("worsening"));
}

#[test]
fn test_trend_short_history_note_needs_verbose() {
    let fx = Fixture::new();
    let short = fx.path("short.json");
    fs::write(
        &short,
        r#"[{"testName": "Login", "status": "failed", "startedAt": "2026-05-01T01:00:00Z"}]"#,
    )
    .expect("write runs");

    sondeo()
        .args(["-v", "trend", short.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("stable"))
        .stderr(predicate::str::contains("at least 4 are needed"));

    sondeo()
        .args(["trend", short.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("at least 4 are needed").not());
}

#[test]
fn test_report_to_file() {
    let fx = Fixture::new();
    let out = fx.path("report.json");
    sondeo()
        .args([
            "report",
            "--locators",
            &fx.locators(),
            "--runs",
            &fx.runs(),
            "--format",
            "json",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed["trend"]["trend"], "worsening");
    assert_eq!(parsed["duplicates"].as_array().unwrap().len(), 1);
}

// ============================================================================
// Configuration and Errors
// ============================================================================

#[test]
fn test_config_file_applies() {
    let fx = Fixture::new();
    let config = fx.path("sondeo.yaml");
    fs::write(&config, "similarityThreshold: 99\n").expect("write config");

    sondeo()
        .args(["--config", config.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("similarityThreshold: 99"));
}

#[test]
fn test_invalid_config_file() {
    let fx = Fixture::new();
    let config = fx.path("sondeo.yaml");
    fs::write(&config, "crossTypePenalty: 3\n").expect("write config");

    sondeo()
        .args(["--config", config.to_str().unwrap(), "health", &fx.locators()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cross_type_penalty"));
}

#[test]
fn test_malformed_snapshot() {
    let fx = Fixture::new();
    let broken = fx.path("broken.json");
    fs::write(&broken, "{ not json").expect("write");

    sondeo()
        .args(["health", broken.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_missing_snapshot() {
    sondeo()
        .args(["flaky", "/nonexistent/runs.json"])
        .assert()
        .failure();
}
