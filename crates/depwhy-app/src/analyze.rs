//! The `analyze` use case: parse input, evaluate rules, explain every issue.

use anyhow::Context;
use depwhy_domain::policy::EffectiveConfig;
use depwhy_explain::Explainer;
use depwhy_settings::{Overrides, ResolvedConfig};
use depwhy_types::{
    AnalysisData, AnalysisReport, DependencyRecord, Explanation, ExplanationSource, InputMode,
    SCHEMA_ANALYSIS_V1, ToolMeta, Verdict,
};
use rayon::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

pub const EMPTY_INPUT_MESSAGE: &str = "no requirements provided; please provide input";

/// Input for the analyze use case.
#[derive(Clone, Debug)]
pub struct AnalysisInput<'a> {
    /// Requirements text or a plain list of names.
    pub text: &'a str,
    pub mode: InputMode,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    pub resolved_config: ResolvedConfig,
}

/// Run the analyze use case: resolve config, then [`analyze`] with an explainer built from it.
pub fn run_analysis(input: AnalysisInput<'_>) -> anyhow::Result<AnalysisOutput> {
    if input.text.trim().is_empty() {
        anyhow::bail!(EMPTY_INPUT_MESSAGE);
    }

    // Empty config is allowed; defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        depwhy_settings::DepwhyConfigV1::default()
    } else {
        depwhy_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        depwhy_settings::resolve_config(cfg, input.overrides).context("resolve config")?;
    debug!(explain = ?resolved.explain, "configuration resolved");

    let explainer = Explainer::from_config(&resolved.explain);
    let report = analyze(
        input.text,
        input.mode,
        &resolved.effective,
        &explainer,
        resolved.explain.parallel,
    );

    Ok(AnalysisOutput {
        report,
        resolved_config: resolved,
    })
}

/// One full pass over `text`. Never fails: parse problems become issues and generator
/// failures become template explanations.
pub fn analyze(
    text: &str,
    mode: InputMode,
    effective: &EffectiveConfig,
    explainer: &Explainer,
    parallel: bool,
) -> AnalysisReport {
    let started_at = OffsetDateTime::now_utc();

    let records = match mode {
        InputMode::Requirements => depwhy_parse::parse_requirements(text),
        InputMode::SimpleList => depwhy_parse::parse_simple_list(text),
    };
    debug!(mode = mode.as_str(), records = records.len(), "input parsed");

    let graph = depwhy_domain::build(&records);
    let outcome = depwhy_domain::check_with(&graph, effective);
    debug!(
        nodes = graph.nodes.len(),
        issues = outcome.issues.len(),
        "rules evaluated"
    );

    let explanations = explain_all(&outcome.issues, &records, explainer, parallel);
    let from_service = explanations
        .iter()
        .filter(|e| e.source == ExplanationSource::Service)
        .count() as u32;
    let from_fallback = explanations.len() as u32 - from_service;

    info!(
        records = records.len(),
        issues = outcome.issues.len(),
        from_service,
        from_fallback,
        "analysis finished"
    );

    let data = AnalysisData {
        input_mode: mode,
        records_parsed: records.len() as u32,
        issues_total: outcome.issues.len() as u32,
        service_enabled: explainer.service_enabled(),
        explanations_from_service: from_service,
        explanations_from_fallback: from_fallback,
    };

    AnalysisReport {
        schema: SCHEMA_ANALYSIS_V1.to_string(),
        tool: ToolMeta {
            name: "depwhy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict: Verdict::from_issues(&outcome.issues),
        records,
        explanations,
        issues: outcome.issues,
        data,
    }
}

// Output order equals issue order either way.
fn explain_all(
    issues: &[depwhy_types::Issue],
    records: &[DependencyRecord],
    explainer: &Explainer,
    parallel: bool,
) -> Vec<Explanation> {
    if parallel {
        issues
            .par_iter()
            .map(|issue| explainer.explain(issue, records))
            .collect()
    } else {
        issues
            .iter()
            .map(|issue| explainer.explain(issue, records))
            .collect()
    }
}

/// Map verdict to exit code: 0 = all clear, 2 = issues found.
pub fn exit_code(verdict: &Verdict) -> i32 {
    if verdict.all_clear { 0 } else { 2 }
}
