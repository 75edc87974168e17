//! Render use cases: markdown and GitHub annotations from reports, plus artifact writing.

use crate::report::to_renderable;
use anyhow::Context;
use camino::Utf8Path;
use depwhy_types::AnalysisReport;

pub fn render_markdown(report: &AnalysisReport) -> String {
    depwhy_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &AnalysisReport, file: Option<&str>, max: usize) -> Vec<String> {
    depwhy_render::render_github_annotations(&to_renderable(report), file)
        .into_iter()
        .take(max)
        .collect()
}

/// Write an artifact, creating parent directories as needed.
pub fn write_text(path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write {path}"))
}
