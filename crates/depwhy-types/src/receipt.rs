use crate::ids;
use crate::record::DependencyRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Stable schema identifier for depwhy analysis reports.
pub const SCHEMA_ANALYSIS_V1: &str = "depwhy.analysis.v1";

/// Issue severity, ranked high to low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// What kind of problem an [`Issue`] describes. New kinds are added here, never encoded in
/// free-form strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Duplicate,
    VersionIncompatibility,
    RuntimeError,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::Duplicate => ids::KIND_DUPLICATE,
            IssueKind::VersionIncompatibility => ids::KIND_VERSION_INCOMPATIBILITY,
            IssueKind::RuntimeError => ids::KIND_RUNTIME_ERROR,
        }
    }
}

/// One detected problem. Each issue feeds exactly one explanation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub check_id: String,

    /// One package for declaration conflicts, the rule's pair for compatibility issues.
    pub packages: Vec<String>,
    pub message: String,
    pub severity: Severity,

    /// Package name -> specifier that triggered a compatibility rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,

    /// Input line of the offending declaration, when there is a single one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Stable identifier intended for dedup and trending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Issue {
    /// The first (or only) implicated package.
    pub fn package(&self) -> Option<&str> {
        self.packages.first().map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationSource {
    /// Text came back from the generative service.
    Service,
    /// Text is the hand-written template for the issue's signature.
    Fallback,
}

/// Generator output for one issue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Explanation {
    pub summary: String,
    pub explanation: String,
    pub why_it_happens: String,
    pub how_to_fix: String,
    pub packages_involved: Vec<String>,
    pub severity: Severity,
    pub source: ExplanationSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Full requirement-file grammar with duplicate detection.
    Requirements,
    /// Bare package names, one per line.
    SimpleList,
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Requirements => "requirements",
            InputMode::SimpleList => "simple_list",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityCounts {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut counts = SeverityCounts::default();
        for issue in issues {
            match issue.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    /// True iff no issue was detected.
    pub all_clear: bool,
    pub counts: SeverityCounts,
}

impl Verdict {
    pub fn from_issues(issues: &[Issue]) -> Self {
        Self {
            all_clear: issues.is_empty(),
            counts: SeverityCounts::from_issues(issues),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Depwhy-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisData {
    pub input_mode: InputMode,
    pub records_parsed: u32,
    pub issues_total: u32,
    pub service_enabled: bool,
    pub explanations_from_service: u32,
    pub explanations_from_fallback: u32,
}

/// The single immutable result of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub records: Vec<DependencyRecord>,
    pub issues: Vec<Issue>,
    pub explanations: Vec<Explanation>,
    pub data: AnalysisData,
}
