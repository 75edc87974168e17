use crate::{RenderableReport, RenderableSeverity};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# depwhy report\n\n");
    let verdict = if report.all_clear {
        "ALL CLEAR"
    } else {
        "ISSUES FOUND"
    };
    let count = |sev: RenderableSeverity| report.issues.iter().filter(|i| i.severity == sev).count();
    out.push_str(&format!(
        "- Verdict: **{}**\n- Records parsed: {}\n- Issues: {} (high: {}, medium: {}, low: {})\n",
        verdict,
        report.data.records_parsed,
        report.issues.len(),
        count(RenderableSeverity::High),
        count(RenderableSeverity::Medium),
        count(RenderableSeverity::Low),
    ));
    out.push_str(&format!(
        "- Explanations: {} from service, {} from templates\n\n",
        report.data.explanations_from_service, report.data.explanations_from_fallback
    ));

    if report.issues.is_empty() {
        out.push_str("No issues found.\n");
        return out;
    }

    out.push_str("## Issues\n");

    for (idx, issue) in report.issues.iter().enumerate() {
        let sev = match issue.severity {
            RenderableSeverity::High => "HIGH",
            RenderableSeverity::Medium => "MEDIUM",
            RenderableSeverity::Low => "LOW",
        };
        out.push_str(&format!(
            "\n### {}. [{}] `{}`\n\n{}\n\n",
            idx + 1,
            sev,
            issue.check_id,
            issue.message
        ));

        let packages: Vec<String> = issue.packages.iter().map(|p| format!("`{p}`")).collect();
        out.push_str(&format!("- Packages: {}\n", packages.join(", ")));
        if let Some(line) = issue.line {
            out.push_str(&format!("- Line: {}\n", line));
        }

        if let Some(exp) = &issue.explanation {
            out.push_str(&format!("- Why: {}\n", exp.why));
            out.push_str(&format!("- Fix: {}\n", exp.fix));
            let source = if exp.from_service { "service" } else { "template" };
            out.push_str(&format!("- Source: {}\n", source));
            out.push('\n');
            for line in exp.text.lines() {
                out.push_str(&format!("> {}\n", line).replace("> \n", ">\n"));
            }
        }
    }

    out
}
