use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("tabeval_cli_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv fixture");
    path
}

fn tabeval() -> Command {
    Command::cargo_bin("tabeval").expect("tabeval binary")
}

#[test]
fn wrong_argument_count_prints_usage() {
    tabeval()
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Usage: tabeval <ai_table_path> <ground_truth_path>",
        ));

    tabeval()
        .args(["a.csv", "b.csv", "c.csv"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn prints_report_for_matching_tables() {
    let dir = temp_dir("report");
    let ai = write_csv(&dir, "ai.csv", "col\nx\ny\nx\n");
    let truth = write_csv(&dir, "truth.csv", "col\nx\nx\nx\n");

    let expected = [
        "",
        "Column-wise Metrics:",
        "--------------------------------------------------",
        "",
        "Column: col",
        "Precision: 1.0000",
        "Recall: 0.6667",
        "F1-score: 0.8000",
        "",
        "Overall Performance:",
        "--------------------------------------------------",
        "Precision: 1.0000",
        "Recall: 0.6667",
        "F1-score: 0.8000",
        "",
    ]
    .join("\n");

    tabeval()
        .arg(&ai)
        .arg(&truth)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn schema_mismatch_prints_error() {
    let dir = temp_dir("schema");
    let ai = write_csv(&dir, "ai.csv", "a,b\n1,2\n");
    let truth = write_csv(&dir, "truth.csv", "a,c\n1,2\n");

    tabeval()
        .arg(&ai)
        .arg(&truth)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Error: tables must have the same columns"))
        .stdout(predicate::str::contains("Column-wise").not());
}

#[test]
fn missing_file_prints_error() {
    let dir = temp_dir("missing");
    let truth = write_csv(&dir, "truth.csv", "a\n1\n");

    tabeval()
        .arg(dir.join("absent.csv"))
        .arg(&truth)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Error: failed to load"));
}

#[test]
fn config_and_flags_shape_the_run() {
    let dir = temp_dir("config");
    let ai = write_csv(&dir, "ai.csv", "label,id\nPER,1\n-,2\n");
    let truth = write_csv(&dir, "truth.csv", "label,id\nPER,1\n,2\n");
    let config = dir.join("tabeval.toml");
    fs::write(&config, "decimals = 2\nnull_tokens = [\"\", \"-\"]\n").expect("write config");
    let metrics_out = dir.join("metrics.json");
    let log_file = dir.join("logs").join("run.jsonl");

    tabeval()
        .arg("--config")
        .arg(&config)
        .arg("--metrics-out")
        .arg(&metrics_out)
        .arg("--log-file")
        .arg(&log_file)
        .arg("--log-level")
        .arg("debug")
        .arg(&ai)
        .arg(&truth)
        .assert()
        .success()
        .stdout(predicate::str::contains("F1-score: 1.00\n"));

    let metrics: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metrics_out).expect("read metrics"))
            .expect("parse metrics");
    assert_eq!(metrics["overall_metrics"]["f1_score"], 1.0);

    let logs = fs::read_to_string(&log_file).expect("read logs");
    assert!(logs.contains("run_started"));
    assert!(logs.contains("run_finished"));
    assert!(logs.contains("column_scored"));
}

#[test]
fn default_log_level_skips_debug_events() {
    let dir = temp_dir("log_level");
    let table = write_csv(&dir, "table.csv", "label\nPER\n");
    let log_file = dir.join("run.jsonl");

    tabeval()
        .arg("--log-file")
        .arg(&log_file)
        .arg(&table)
        .arg(&table)
        .assert()
        .success();

    let logs = fs::read_to_string(&log_file).expect("read logs");
    assert!(logs.contains("evaluation_finished"));
    assert!(!logs.contains("column_scored"));
}

#[test]
fn invalid_log_level_prints_error() {
    let dir = temp_dir("bad_level");
    let table = write_csv(&dir, "table.csv", "label\nPER\n");

    tabeval()
        .arg("--log-file")
        .arg(dir.join("run.jsonl"))
        .arg("--log-level")
        .arg("tabeval=loud")
        .arg(&table)
        .arg(&table)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Error: logging error"));
}

#[test]
fn help_and_version_exit_zero() {
    tabeval()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI_TABLE_PATH"))
        .stdout(predicate::str::contains("GROUND_TRUTH_PATH"));

    tabeval()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabeval"));
}

#[test]
fn row_count_mismatch_prints_error() {
    let dir = temp_dir("rows");
    let ai = write_csv(&dir, "ai.csv", "a\nx\ny\n");
    let truth = write_csv(&dir, "truth.csv", "a\nx\n");

    tabeval()
        .arg(&ai)
        .arg(&truth)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "Error: row count mismatch: AI table has 2 row(s), ground truth has 1",
        ))
        .stdout(predicate::str::contains("Column-wise").not());
}
