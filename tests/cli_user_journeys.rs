//! Behavior-driven tests for CLI user journeys
//!
//! These tests run the `vwap` binary against trade files on disk and check
//! what the user sees on stdout and in the exit code.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::{tempdir, TempDir};

const TRADES: &str = "\
epic,isin,trade type,reserved,quantity,price
A,I1,buy,x,5,1.0
A,I1,sell,x,5,2.0
B,I2,buy,x,1,1.0
";

fn trade_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("trades.csv");
    fs::write(&path, contents).expect("write trades");
    path
}

fn vwap(args: &[&str], file: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vwap"))
        .args(args)
        .arg(file)
        .env_remove("VWAP_TRADES_FILE")
        .env_remove("VWAP_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("vwap binary runs")
}

fn json_stdout(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

// =============================================================================
// CLI User Journey: Aggregation
// =============================================================================

#[test]
fn user_can_list_vwap_per_instrument_as_json() {
    // Given: A trade file with two instruments
    let dir = tempdir().expect("tempdir");
    let file = trade_file(&dir, TRADES);

    // When: They ask for per-instrument VWAP
    let output = vwap(&["instruments"], &file);

    // Then: The envelope carries one row per instrument in file order
    assert!(output.status.success());
    let envelope = json_stdout(&output);
    assert_eq!(envelope["meta"]["schema_version"], "v1.0.0");
    assert_eq!(envelope["meta"]["record_count"], 3);
    let rows = envelope["data"]["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["epic"], "A");
    assert_eq!(rows[0]["vwap"], 1.5);
}

#[test]
fn user_can_filter_one_epic_and_see_overall_first() {
    let dir = tempdir().expect("tempdir");
    let file = trade_file(&dir, TRADES);

    let output = vwap(&["filter", "A"], &file);

    assert!(output.status.success());
    let envelope = json_stdout(&output);
    let labels: Vec<&str> = envelope["data"]["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .filter_map(|row| row["trade_type"].as_str())
        .collect();
    assert_eq!(labels, vec!["Overall", "buy", "sell"]);
    assert_eq!(envelope["data"]["chart"]["name"], "A");
}

#[test]
fn user_filtering_an_unknown_epic_gets_an_error_envelope_and_exit_code_3() {
    let dir = tempdir().expect("tempdir");
    let file = trade_file(&dir, TRADES);

    let output = vwap(&["filter", "ZZZ"], &file);

    assert_eq!(output.status.code(), Some(3));
    let envelope = json_stdout(&output);
    assert_eq!(envelope["errors"][0]["code"], "epic_not_found");
    assert_eq!(envelope["data"]["rows"], Value::Array(Vec::new()));
}

#[test]
fn user_sees_null_vwap_and_a_warning_for_zero_volume_groups() {
    let dir = tempdir().expect("tempdir");
    let file = trade_file(
        &dir,
        "epic,isin,tt,r,q,p\nA,I1,buy,x,5,1.0\nA,I1,sell,x,-5,2.0\n",
    );

    let output = vwap(&["instruments"], &file);

    assert!(output.status.success());
    let envelope = json_stdout(&output);
    assert!(envelope["data"]["rows"][0]["vwap"].is_null());
    assert_eq!(envelope["meta"]["warnings"].as_array().map(Vec::len), Some(1));

    // And: Strict mode turns the warning into a failure
    let strict = vwap(&["--strict", "instruments"], &file);
    assert_eq!(strict.status.code(), Some(5));
}

// =============================================================================
// CLI User Journey: Load failures and export
// =============================================================================

#[test]
fn user_loading_a_malformed_file_gets_exit_code_6_and_no_output() {
    let dir = tempdir().expect("tempdir");
    let file = trade_file(&dir, "epic,isin,tt,r,q,p\nA,I1,buy,x,five,1.0\n");

    let output = vwap(&["load"], &file);

    assert_eq!(output.status.code(), Some(6));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("quantity 'five'"));
}

#[test]
fn user_can_render_a_text_table() {
    let dir = tempdir().expect("tempdir");
    let file = trade_file(&dir, TRADES);

    let output = vwap(&["--format", "table", "trade-types"], &file);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("epic  isin  trade type  VWAP"));
    assert!(stdout.contains("A     I1    sell        2.0000"));
}

#[test]
fn user_can_export_both_tables_as_xml() {
    let dir = tempdir().expect("tempdir");
    let file = trade_file(&dir, TRADES);
    let output_path = dir.path().join("report.xml");
    let output_arg = output_path.to_str().expect("utf8 path");

    let output = vwap(&["export", "--output", output_arg], &file);

    assert!(output.status.success());
    let per_stock = fs::read_to_string(dir.path().join("report_per_stock.xml")).expect("file");
    assert_eq!(per_stock.matches("<asset>").count(), 2);
    let per_pair = fs::read_to_string(dir.path().join("report_per_stock_trade_type_pair.xml"))
        .expect("file");
    assert!(per_pair.contains("\t<trade_type>sell</trade_type>"));
}
