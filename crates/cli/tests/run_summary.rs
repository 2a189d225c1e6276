// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for a full plant run
//!
//! These tests run the juicer binary with short durations and fast stage
//! timings, and check the report printed on stdout.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Config with millisecond stage timings so runs finish quickly
fn fast_config(extra: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create config file");
    writeln!(
        file,
        r#"queue_capacity = 4
{extra}

[timings]
fetched = "1ms"
peeled = "1ms"
squeezed = "1ms"
bottled = "1ms"
processed = "1ms"
"#
    )
    .expect("Failed to write config file");
    file
}

fn juicer() -> Command {
    Command::cargo_bin("juicer").unwrap()
}

#[test]
fn prints_banner_report() {
    let config = fast_config("");

    juicer()
        .arg("--config")
        .arg(config.path())
        .args(["--duration", "300ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "======= Juice Plant Processing Summary =======",
        ))
        .stdout(predicate::str::contains("Total Oranges Provided: "))
        .stdout(predicate::str::contains("Total Oranges Fetched: "))
        .stdout(predicate::str::contains("Total Oranges Processed: "))
        .stdout(predicate::str::contains("Total Bottles Created: "))
        .stdout(predicate::str::contains("Total Oranges Wasted: "));
}

#[test]
fn limited_run_reports_exact_totals() {
    let config = fast_config("admission_limit = 5\nplants = 1");

    juicer()
        .arg("--config")
        .arg(config.path())
        .args(["--duration", "2s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Oranges Provided: 5"))
        .stdout(predicate::str::contains("Total Oranges Processed: 5"))
        .stdout(predicate::str::contains("Total Bottles Created: 1"))
        .stdout(predicate::str::contains("Total Oranges Wasted: 2"));
}

#[test]
fn json_summary_is_parseable() {
    let config = fast_config("");

    let output = juicer()
        .args(["--json", "--plants", "2", "--topology", "split", "--limit", "6"])
        .arg("--config")
        .arg(config.path())
        .args(["--duration", "1s"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["topology"], "split");
    assert_eq!(summary["plants"].as_array().unwrap().len(), 2);
    assert_eq!(summary["totals"]["provided"], 6);
    assert_eq!(summary["totals"]["processed"], 6);
    assert_eq!(summary["totals"]["bottles"], 2);
}

#[test]
fn invalid_config_fails_with_message() {
    let config = fast_config("plants = 0");

    juicer()
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("plants must be at least 1"));
}

#[test]
fn missing_config_file_fails() {
    juicer()
        .args(["--config", "/nonexistent/juicer.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("juicer.toml"));
}

#[test]
fn help_describes_flags() {
    juicer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--topology"));
}
