//! Developer tasks (schema generation, fixture conformance, registry coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use depwhy_app::{AnalysisInput, run_analysis, serialize_report};
use depwhy_settings::Overrides;
use depwhy_test_util::normalize_nondeterministic;
use depwhy_types::InputMode;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(depwhy_types::AnalysisReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(depwhy_settings::DepwhyConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "depwhy.analysis.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "depwhy.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Check ids are lowercase, dot-separated tokens.
fn is_valid_check_id(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|part| {
            part.starts_with(|c: char| c.is_ascii_lowercase())
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        })
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

/// Hygiene checks a schema cannot express.
fn report_hygiene(name: &str, report: &serde_json::Value, errors: &mut Vec<String>) {
    let issues = report
        .get("issues")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();
    let explanations = report
        .get("explanations")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    if issues.len() != explanations.len() {
        errors.push(format!(
            "{}: {} issues but {} explanations",
            name,
            issues.len(),
            explanations.len()
        ));
    }

    for (i, issue) in issues.iter().enumerate() {
        let check_id = issue.get("check_id").and_then(|v| v.as_str()).unwrap_or("");
        if !is_valid_check_id(check_id) {
            errors.push(format!("{}: issues[{}].check_id '{}' is not a valid id", name, i, check_id));
        }
        if let Some(fp) = issue.get("fingerprint").and_then(|v| v.as_str())
            && !is_sha256_hex(fp)
        {
            errors.push(format!("{}: issues[{}].fingerprint is not sha256 hex", name, i));
        }
        if let Some(exp) = explanations.get(i)
            && exp.get("summary") != issue.get("message")
        {
            errors.push(format!("{}: explanations[{}].summary differs from the issue message", name, i));
        }
    }

    let all_clear = report
        .get("verdict")
        .and_then(|v| v.get("all_clear"))
        .and_then(|v| v.as_bool());
    if all_clear != Some(issues.is_empty()) {
        errors.push(format!("{}: verdict.all_clear disagrees with the issue list", name));
    }
}

/// Run every fixture offline, validate the reports against the generated schema, and compare
/// against golden files where present.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to JSON")?;
    let compiled = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;
    println!("✓ depwhy.analysis.v1 schema compiles");

    let dir = fixtures_dir();
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("requirements.txt").is_file())
        .collect();
    entries.sort();

    if entries.is_empty() {
        bail!("No fixtures with requirements.txt found in {}", dir.display());
    }

    let mut errors = Vec::new();
    for fixture_dir in &entries {
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let text = fs::read_to_string(fixture_dir.join("requirements.txt"))
            .with_context(|| format!("Failed to read fixture '{}'", name))?;
        let output = run_analysis(AnalysisInput {
            text: &text,
            mode: InputMode::Requirements,
            config_text: "",
            overrides: Overrides {
                offline: true,
                ..Overrides::default()
            },
        })
        .with_context(|| format!("Failed to analyze fixture '{}'", name))?;

        let bytes = serialize_report(&output.report)?;
        let report: serde_json::Value = serde_json::from_slice(&bytes)?;

        for err in compiled.iter_errors(&report) {
            errors.push(format!("{}: schema validation: {}", name, err));
        }
        report_hygiene(&name, &report, &mut errors);

        let golden_path = fixture_dir.join("expected.report.json");
        if golden_path.exists() {
            let golden: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(&golden_path)?)
                    .with_context(|| format!("Failed to parse golden for '{}'", name))?;
            if normalize_nondeterministic(golden) != normalize_nondeterministic(report) {
                errors.push(format!("{}: report differs from expected.report.json", name));
            } else {
                println!("  ✓ {} matches golden", name);
            }
        } else {
            println!("  ✓ {} validates", name);
        }
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} fixtures pass conformance checks!", entries.len());
    Ok(())
}

/// Validate that all check IDs and issue kinds have registry documentation.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = depwhy_types::explain::all_check_ids();
    let kinds = depwhy_types::explain::all_kinds();

    let mut errors = Vec::new();
    for (label, id) in check_ids
        .iter()
        .map(|id| ("Check ID", id))
        .chain(kinds.iter().map(|k| ("Kind", k)))
    {
        match depwhy_types::lookup_doc(id) {
            Some(doc) => {
                if doc.title.is_empty() {
                    errors.push(format!("{} '{}' has empty title", label, id));
                }
                if doc.description.is_empty() {
                    errors.push(format!("{} '{}' has empty description", label, id));
                }
                if doc.remediation.is_empty() {
                    errors.push(format!("{} '{}' has empty remediation", label, id));
                }
            }
            None => errors.push(format!("{} '{}' has no documentation", label, id)),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs are documented", check_ids.len());
        println!("✓ {} kinds are documented", kinds.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Analyze tests/fixtures offline and check reports + goldens");
    eprintln!("  explain-coverage  Validate all check IDs and kinds have documentation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
