use crate::{RenderableReport, RenderableSeverity};

/// Render issues as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line}::{message}`
///
/// `file` is the requirements file the report was produced from, when known.
pub fn render_github_annotations(report: &RenderableReport, file: Option<&str>) -> Vec<String> {
    let mut out = Vec::new();

    for issue in &report.issues {
        let level = match issue.severity {
            RenderableSeverity::High => "error",
            RenderableSeverity::Medium => "warning",
            RenderableSeverity::Low => "notice",
        };

        let mut meta = String::new();
        if let Some(path) = file {
            meta.push_str(&format!("file={}", path));
            if let Some(line) = issue.line {
                meta.push_str(&format!(",line={}", line));
            }
        }

        let mut message = format!("[{}] {}", issue.check_id, issue.message);
        if let Some(exp) = &issue.explanation {
            message.push_str(&format!("\nFix: {}", exp.fix));
        }
        let message = message
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");

        if meta.is_empty() {
            out.push(format!("::{}::{}", level, message));
        } else {
            out.push(format!("::{} {}::{}", level, meta, message));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableExplanation, RenderableIssue};

    fn issue(severity: RenderableSeverity, line: Option<u32>) -> RenderableIssue {
        RenderableIssue {
            severity,
            check_id: "declaration.conflict".to_string(),
            message: "Conflict in numpy: 100% broken\r\nsecond".to_string(),
            packages: vec!["numpy".to_string()],
            line,
            explanation: None,
        }
    }

    fn report(issues: Vec<RenderableIssue>) -> RenderableReport {
        RenderableReport {
            all_clear: issues.is_empty(),
            issues,
            data: RenderableData {
                records_parsed: 1,
                explanations_from_service: 0,
                explanations_from_fallback: 0,
            },
        }
    }

    #[test]
    fn maps_levels_and_escapes_message() {
        let lines = render_github_annotations(
            &report(vec![
                issue(RenderableSeverity::High, Some(4)),
                issue(RenderableSeverity::Medium, None),
                issue(RenderableSeverity::Low, None),
            ]),
            Some("requirements.txt"),
        );

        assert_eq!(
            lines[0],
            "::error file=requirements.txt,line=4::[declaration.conflict] Conflict in numpy: 100%25 broken%0D%0Asecond"
        );
        assert!(lines[1].starts_with("::warning file=requirements.txt::"));
        assert!(lines[2].starts_with("::notice file=requirements.txt::"));
    }

    #[test]
    fn omits_meta_without_file_and_appends_fix() {
        let mut with_fix = issue(RenderableSeverity::High, Some(2));
        with_fix.explanation = Some(RenderableExplanation {
            text: String::new(),
            why: String::new(),
            fix: "Remove the extra line.".to_string(),
            from_service: true,
        });

        let lines = render_github_annotations(&report(vec![with_fix]), None);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("::error::[declaration.conflict]"));
        assert!(lines[0].ends_with("%0AFix: Remove the extra line."));
    }

    #[test]
    fn clear_report_has_no_annotations() {
        assert!(render_github_annotations(&report(Vec::new()), Some("r.txt")).is_empty());
    }
}
