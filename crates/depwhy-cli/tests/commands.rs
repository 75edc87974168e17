use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

#[allow(deprecated)]
fn depwhy_cmd() -> Command {
    Command::cargo_bin("depwhy").expect("depwhy binary not found - run `cargo build` first")
}

const CONFLICTING: &str = "fastapi==0.78.0\npydantic>=2.0\npandas==2.0.3\npandas==1.5.0\n";

/// Analyze `input` from stdin into `<tmp>/report.json`; returns the exit code.
fn analyze_stdin(tmp: &TempDir, input: &str, config: Option<&str>) -> i32 {
    let config_path = tmp.path().join("depwhy.toml");
    if let Some(text) = config {
        std::fs::write(&config_path, text).expect("write config");
    }

    let output = depwhy_cmd()
        .arg("--config")
        .arg(&config_path)
        .args(["analyze", "--offline", "--input", "-", "--report-out"])
        .arg(tmp.path().join("report.json"))
        .write_stdin(input)
        .output()
        .expect("run depwhy");
    output.status.code().unwrap_or(-1)
}

fn read_report(tmp: &TempDir) -> Value {
    let text = std::fs::read_to_string(tmp.path().join("report.json")).expect("read report");
    serde_json::from_str(&text).expect("parse report")
}

#[test]
fn empty_input_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    let report_path = tmp.path().join("report.json");

    depwhy_cmd()
        .arg("--config")
        .arg(tmp.path().join("depwhy.toml"))
        .args(["analyze", "--offline", "--report-out"])
        .arg(&report_path)
        .write_stdin("\n  \n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "no requirements provided; please provide input",
        ));

    let report = read_report(&tmp);
    assert_eq!(report["verdict"]["all_clear"], false);
    assert_eq!(report["issues"][0]["check_id"], "tool.runtime");
    assert_eq!(report["issues"][0]["type"], "runtime_error");
}

#[test]
fn missing_input_file_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    depwhy_cmd()
        .args(["analyze", "--offline", "--input"])
        .arg(tmp.path().join("nope.txt"))
        .arg("--report-out")
        .arg(tmp.path().join("report.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("read requirements"));
}

#[test]
fn invalid_config_is_a_runtime_error() {
    let tmp = TempDir::new().expect("temp dir");
    let code = analyze_stdin(&tmp, CONFLICTING, Some("[rules.\"compat.nope\"]\nenabled = false\n"));
    assert_eq!(code, 1);
    assert_eq!(read_report(&tmp)["issues"][0]["check_id"], "tool.runtime");
}

#[test]
fn config_can_disable_and_downgrade_rules() {
    let tmp = TempDir::new().expect("temp dir");
    let code = analyze_stdin(
        &tmp,
        CONFLICTING,
        Some(
            "[rules.\"compat.fastapi_pydantic\"]\nenabled = false\n\n[rules.\"declaration.conflict\"]\nseverity = \"low\"\n",
        ),
    );
    assert_eq!(code, 2);

    let report = read_report(&tmp);
    assert_eq!(report["issues"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["issues"][0]["severity"], "low");
    assert_eq!(report["explanations"][0]["severity"], "low");
}

#[test]
fn md_renders_saved_report() {
    let tmp = TempDir::new().expect("temp dir");
    assert_eq!(analyze_stdin(&tmp, CONFLICTING, None), 2);

    depwhy_cmd()
        .args(["md", "--report"])
        .arg(tmp.path().join("report.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("# depwhy report"))
        .stdout(predicate::str::contains("compat.fastapi_pydantic"))
        .stdout(predicate::str::contains("Conflict in pandas"));
}

#[test]
fn md_rejects_foreign_report() {
    let tmp = TempDir::new().expect("temp dir");
    let path = tmp.path().join("other.json");
    std::fs::write(&path, r#"{"schema":"something.else.v1"}"#).expect("write");

    depwhy_cmd()
        .args(["md", "--report"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report schema"));
}

#[test]
fn annotations_map_severity_and_respect_max() {
    let tmp = TempDir::new().expect("temp dir");
    assert_eq!(analyze_stdin(&tmp, CONFLICTING, None), 2);
    let report = tmp.path().join("report.json");

    depwhy_cmd()
        .args(["annotations", "--file", "requirements.txt", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::error file=requirements.txt,line=4::[declaration.conflict]",
        ))
        .stdout(predicate::str::contains("::error file=requirements.txt::[compat.fastapi_pydantic]"));

    let output = depwhy_cmd()
        .args(["annotations", "--max", "1", "--report"])
        .arg(&report)
        .output()
        .expect("run");
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn explain_known_and_unknown_identifiers() {
    depwhy_cmd()
        .args(["explain", "compat.fastapi_pydantic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"));

    depwhy_cmd()
        .args(["explain", "duplicate"])
        .assert()
        .success();

    depwhy_cmd()
        .args(["explain", "deps.no_wildcards"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Available check_ids"));
}

#[test]
fn rules_lists_the_table() {
    depwhy_cmd()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("compat.pytorch_lightning_torch"))
        .stdout(predicate::str::contains("compat.fastapi_pydantic"))
        .stdout(predicate::str::contains("compat.tensorflow_keras"));
}
