//! End-to-end CLI tests over `tests/fixtures/<name>/requirements.txt`.
//!
//! Every run is offline so results are deterministic. `clean` additionally carries an
//! `expected.report.json` golden file (timestamps and version normalized).

use assert_cmd::Command;
use depwhy_test_util::{fixtures_dir, normalize_nondeterministic};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn depwhy_cmd() -> Command {
    Command::cargo_bin("depwhy").expect("depwhy binary not found - run `cargo build` first")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir(env!("CARGO_MANIFEST_DIR"))
        .join(name)
        .join("requirements.txt")
}

fn run_analyze(input: &Path, extra: &[&str]) -> (i32, Value) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = depwhy_cmd()
        .arg("--config")
        .arg(temp_dir.path().join("depwhy.toml"))
        .arg("analyze")
        .arg("--input")
        .arg(input)
        .arg("--offline")
        .arg("--report-out")
        .arg(&report_path)
        .args(extra)
        .output()
        .expect("run depwhy");

    let exit_code = output.status.code().unwrap_or(-1);
    let text = std::fs::read_to_string(&report_path).expect("read report");
    let report: Value = serde_json::from_str(&text).expect("parse report JSON");
    (exit_code, report)
}

fn check_ids(report: &Value) -> Vec<String> {
    report["issues"]
        .as_array()
        .expect("issues array")
        .iter()
        .map(|i| i["check_id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn fixture_clean_matches_golden() {
    let (exit_code, report) = run_analyze(&fixture("clean"), &[]);
    assert_eq!(exit_code, 0, "clean fixture should exit with 0");

    let expected_path = fixtures_dir(env!("CARGO_MANIFEST_DIR"))
        .join("clean")
        .join("expected.report.json");
    let expected: Value =
        serde_json::from_str(&std::fs::read_to_string(expected_path).expect("read golden"))
            .expect("parse golden");

    let actual = normalize_nondeterministic(report);
    assert_eq!(
        actual,
        normalize_nondeterministic(expected),
        "Actual:\n{}",
        serde_json::to_string_pretty(&actual).unwrap()
    );
}

#[test]
fn fixture_duplicates_reports_first_and_conflicting_line() {
    let (exit_code, report) = run_analyze(&fixture("duplicates"), &[]);
    assert_eq!(exit_code, 2);

    assert_eq!(report["records"].as_array().map(Vec::len), Some(3));
    assert_eq!(check_ids(&report), vec!["declaration.conflict"]);
    let issue = &report["issues"][0];
    assert_eq!(issue["type"], "duplicate");
    assert_eq!(issue["severity"], "high");
    assert_eq!(issue["line"], 3);
    assert_eq!(
        issue["message"],
        "Conflict in pandas: Duplicate: pandas==2.0.3 vs pandas==1.5.0"
    );
    assert_eq!(report["explanations"][0]["source"], "fallback");
}

#[test]
fn fixture_malformed_line_becomes_issue() {
    let (exit_code, report) = run_analyze(&fixture("malformed"), &[]);
    assert_eq!(exit_code, 2);

    assert_eq!(report["records"][0]["package"], "flask");
    let message = report["issues"][0]["message"].as_str().expect("message");
    assert!(message.starts_with("Conflict in flask: Parse error: "), "{message}");
    assert_eq!(report["records"][1]["specifier"], ">=2.0");
}

#[test]
fn fixture_rule_pairs_fire() {
    for (name, check_id) in [
        ("torch_lightning", "compat.pytorch_lightning_torch"),
        ("fastapi_pydantic", "compat.fastapi_pydantic"),
        ("tensorflow_keras", "compat.tensorflow_keras"),
    ] {
        let (exit_code, report) = run_analyze(&fixture(name), &[]);
        assert_eq!(exit_code, 2, "{name}");
        assert_eq!(check_ids(&report), vec![check_id], "{name}");

        let issue = &report["issues"][0];
        assert_eq!(issue["type"], "version_incompatibility", "{name}");
        assert_eq!(issue["details"].as_object().map(|d| d.len()), Some(2), "{name}");
        assert!(issue["fingerprint"].as_str().is_some_and(|f| f.len() == 64));

        let exp = &report["explanations"][0];
        assert_eq!(exp["summary"], issue["message"], "{name}");
        assert_eq!(exp["packages_involved"], issue["packages"], "{name}");
        assert!(!exp["how_to_fix"].as_str().unwrap_or_default().is_empty());
    }
}

#[test]
fn fixture_mixed_orders_duplicates_before_rules() {
    let (exit_code, report) = run_analyze(&fixture("mixed"), &[]);
    assert_eq!(exit_code, 2);
    assert_eq!(
        check_ids(&report),
        vec![
            "declaration.conflict",
            "declaration.conflict",
            "compat.pytorch_lightning_torch",
            "compat.fastapi_pydantic",
            "compat.tensorflow_keras",
        ]
    );
    assert_eq!(report["verdict"]["counts"]["high"], 5);
    assert_eq!(report["data"]["explanations_from_fallback"], 5);
}

#[test]
fn fixture_simple_list_keeps_names_only() {
    let (exit_code, report) = run_analyze(&fixture("simple_list"), &["--list"]);
    assert_eq!(exit_code, 0);
    assert_eq!(report["data"]["input_mode"], "simple_list");

    let names: Vec<&str> = report["records"]
        .as_array()
        .expect("records")
        .iter()
        .filter_map(|r| r["package"].as_str())
        .collect();
    assert_eq!(names, vec!["torch", "pandas", "scikit-learn", "numpy"]);
    assert!(
        report["records"]
            .as_array()
            .expect("records")
            .iter()
            .all(|r| r["specifier"] == "")
    );
}

#[test]
fn fixture_writes_markdown_when_asked() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let md_path = temp_dir.path().join("out").join("report.md");

    let (exit_code, _) = run_analyze(
        &fixture("fastapi_pydantic"),
        &["--write-markdown", "--markdown-out", md_path.to_str().expect("utf8")],
    );
    assert_eq!(exit_code, 2);

    let md = std::fs::read_to_string(&md_path).expect("read markdown");
    assert!(md.contains("ISSUES FOUND"));
    assert!(md.contains("compat.fastapi_pydantic"));
    assert!(md.contains("- Source: template"));
}

#[test]
fn unreachable_service_falls_back_without_failing() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let report_path = temp_dir.path().join("report.json");

    let output = depwhy_cmd()
        .arg("--config")
        .arg(temp_dir.path().join("depwhy.toml"))
        .arg("analyze")
        .arg("--input")
        .arg(fixture("torch_lightning"))
        .args(["--endpoint", "http://127.0.0.1:9/generate", "--timeout-secs", "2"])
        .arg("--report-out")
        .arg(&report_path)
        .output()
        .expect("run depwhy");
    assert_eq!(output.status.code(), Some(2));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["data"]["service_enabled"], true);
    assert_eq!(report["data"]["explanations_from_fallback"], 1);
    assert_eq!(report["explanations"][0]["source"], "fallback");
}
