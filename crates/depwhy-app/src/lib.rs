//! Use case orchestration for depwhy.
//!
//! This crate provides the application layer: use cases that coordinate the parse, domain,
//! explain and render layers. The CLI crate depends on this; it only handles argument parsing
//! and I/O.

#![forbid(unsafe_code)]

mod analyze;
mod explain;
mod render;
mod report;

pub use analyze::{
    AnalysisInput, AnalysisOutput, EMPTY_INPUT_MESSAGE, analyze, exit_code, run_analysis,
};
pub use explain::{ExplainOutput, format_doc, format_not_found, format_rules, run_explain};
pub use render::{render_annotations, render_markdown, write_text};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
