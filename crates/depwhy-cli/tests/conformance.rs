//! Conformance tests for depwhy.
//!
//! 1. Every check id and issue kind has registry documentation.
//! 2. Reports emitted by the CLI validate against the schema derived from the report types.

use assert_cmd::Command;
use depwhy_test_util::fixtures_dir;
use depwhy_types::{AnalysisReport, explain};
use serde_json::Value;
use tempfile::TempDir;

#[allow(deprecated)]
fn depwhy_cmd() -> Command {
    Command::cargo_bin("depwhy").expect("depwhy binary not found - run `cargo build` first")
}

fn report_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(AnalysisReport)).expect("schema to json")
}

#[test]
fn all_ids_and_kinds_are_documented() {
    for id in explain::all_check_ids().iter().chain(explain::all_kinds()) {
        let doc = explain::lookup_doc(id).unwrap_or_else(|| panic!("no doc for '{id}'"));
        assert!(!doc.title.is_empty(), "{id}: empty title");
        assert!(!doc.description.is_empty(), "{id}: empty description");
        assert!(!doc.remediation.is_empty(), "{id}: empty remediation");
    }
}

#[test]
fn fixture_reports_match_schema() {
    let validator = jsonschema::validator_for(&report_schema()).expect("valid schema");
    let fixtures = fixtures_dir(env!("CARGO_MANIFEST_DIR"));

    let mut seen = 0;
    for entry in std::fs::read_dir(&fixtures).expect("read fixtures") {
        let dir = entry.expect("dir entry").path();
        let input = dir.join("requirements.txt");
        if !input.is_file() {
            continue;
        }

        let tmp = TempDir::new().expect("temp dir");
        let report_path = tmp.path().join("report.json");
        depwhy_cmd()
            .arg("--config")
            .arg(tmp.path().join("depwhy.toml"))
            .args(["analyze", "--offline", "--input"])
            .arg(&input)
            .arg("--report-out")
            .arg(&report_path)
            .output()
            .expect("run depwhy");

        let report: Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
                .expect("parse report");
        let errors: Vec<String> = validator.iter_errors(&report).map(|e| e.to_string()).collect();
        assert!(errors.is_empty(), "{}: {errors:#?}", dir.display());
        seen += 1;
    }
    assert!(seen >= 5, "expected fixture directories under {}", fixtures.display());
}

#[test]
fn runtime_error_report_matches_schema() {
    let validator = jsonschema::validator_for(&report_schema()).expect("valid schema");
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("report.json");

    depwhy_cmd()
        .args(["analyze", "--offline", "--report-out"])
        .arg(&report_path)
        .write_stdin("")
        .assert()
        .code(1);

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert!(validator.is_valid(&report));
}
