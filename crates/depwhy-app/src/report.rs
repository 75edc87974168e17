use anyhow::Context;
use depwhy_render::{
    RenderableData, RenderableExplanation, RenderableIssue, RenderableReport, RenderableSeverity,
};
use depwhy_types::{
    AnalysisData, AnalysisReport, ExplanationSource, InputMode, Issue, IssueKind,
    SCHEMA_ANALYSIS_V1, Severity, ToolMeta, Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<AnalysisReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_ANALYSIS_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse depwhy analysis report")
}

pub fn serialize_report(report: &AnalysisReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize analysis report")
}

/// A report describing a failure of the tool itself rather than of the input.
pub fn runtime_error_report(message: &str) -> AnalysisReport {
    let now = OffsetDateTime::now_utc();
    let issues = vec![Issue {
        kind: IssueKind::RuntimeError,
        check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
        packages: Vec::new(),
        message: message.to_string(),
        severity: Severity::High,
        details: None,
        line: None,
        fingerprint: None,
    }];

    AnalysisReport {
        schema: SCHEMA_ANALYSIS_V1.to_string(),
        tool: ToolMeta {
            name: "depwhy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::from_issues(&issues),
        records: Vec::new(),
        data: AnalysisData {
            input_mode: InputMode::Requirements,
            records_parsed: 0,
            issues_total: issues.len() as u32,
            service_enabled: false,
            explanations_from_service: 0,
            explanations_from_fallback: 0,
        },
        issues,
        explanations: Vec::new(),
    }
}

pub fn to_renderable(report: &AnalysisReport) -> RenderableReport {
    let issues = report
        .issues
        .iter()
        .enumerate()
        .map(|(idx, issue)| RenderableIssue {
            severity: match issue.severity {
                Severity::High => RenderableSeverity::High,
                Severity::Medium => RenderableSeverity::Medium,
                Severity::Low => RenderableSeverity::Low,
            },
            check_id: issue.check_id.clone(),
            message: issue.message.clone(),
            packages: issue.packages.clone(),
            line: issue.line,
            // Explanations are stored in issue order.
            explanation: report.explanations.get(idx).map(|e| RenderableExplanation {
                text: e.explanation.clone(),
                why: e.why_it_happens.clone(),
                fix: e.how_to_fix.clone(),
                from_service: e.source == ExplanationSource::Service,
            }),
        })
        .collect();

    RenderableReport {
        all_clear: report.verdict.all_clear,
        issues,
        data: RenderableData {
            records_parsed: report.data.records_parsed,
            explanations_from_service: report.data.explanations_from_service,
            explanations_from_fallback: report.data.explanations_from_fallback,
        },
    }
}
