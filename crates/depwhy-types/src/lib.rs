//! Stable DTOs and IDs used across the depwhy workspace.
//!
//! This crate is intentionally boring:
//! - the dependency record produced by the parser
//! - issues, explanations and the analysis report envelope
//! - stable string IDs for checks and issue kinds
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod record;

pub use explain::{CheckDoc, lookup_doc};
pub use receipt::{
    AnalysisData, AnalysisReport, Explanation, ExplanationSource, InputMode, Issue, IssueKind,
    SCHEMA_ANALYSIS_V1, Severity, SeverityCounts, ToolMeta, Verdict,
};
pub use record::DependencyRecord;
