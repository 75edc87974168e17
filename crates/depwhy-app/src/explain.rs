//! The `explain` use case: look up check/kind documentation.

use depwhy_domain::checks::COMPAT_RULES;
use depwhy_types::explain::{self, CheckDoc};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found documentation for the identifier.
    Found(CheckDoc),
    /// Unknown identifier; includes available check_ids and kinds.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_kinds: &'static [&'static str],
    },
}

/// Look up documentation for a check_id or issue kind.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_doc(identifier) {
        Some(doc) => ExplainOutput::Found(doc),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_kinds: explain::all_kinds(),
        },
    }
}

/// Format documentation for terminal display.
pub fn format_doc(doc: &CheckDoc) -> String {
    let mut out = String::new();

    out.push_str(doc.title);
    out.push('\n');
    out.push_str(&"=".repeat(doc.title.len()));
    out.push_str("\n\n");
    out.push_str(doc.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(doc.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (conflicting):\n");
    out.push_str("```text\n");
    out.push_str(doc.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (resolved):\n");
    out.push_str("```text\n");
    out.push_str(doc.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    kinds: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check_id or kind: {}\n\n", identifier));
    out.push_str("Available check_ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {}\n", id));
    }
    out.push_str("\nAvailable kinds:\n");
    for kind in kinds {
        out.push_str(&format!("  - {}\n", kind));
    }

    out
}

/// The compatibility rule table, one rule per line.
pub fn format_rules() -> String {
    let mut out = String::new();
    for rule in COMPAT_RULES {
        let (a, b) = rule.packages;
        out.push_str(&format!(
            "{} ({} + {}, {}): {}\n",
            rule.id,
            a,
            b,
            rule.severity.as_str(),
            rule.message
        ));
    }
    out
}
