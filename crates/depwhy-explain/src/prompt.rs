use depwhy_types::{DependencyRecord, Issue};
use std::collections::BTreeMap;
use std::fmt::Write as _;

// Keep free of package names and the word used by the duplicate template: the template
// fallback matches on the whole prompt.
const INSTRUCTIONS: &str = "\
Write a short explanation in plain language that covers:
1. What the conflict is, in simple terms
2. Why it happens (the technical reason)
3. How to resolve it (concrete version recommendations)

Use no more than 150 words.
";

/// Build the generation prompt for one issue.
pub fn build_prompt(issue: &Issue, records: &[DependencyRecord]) -> String {
    let mut prompt = String::from(
        "You are a Python packaging expert. Explain this dependency conflict clearly:\n\n",
    );

    // Writing to a String is infallible.
    let _ = writeln!(prompt, "Conflict: {}", issue.message);
    let _ = writeln!(prompt, "Type: {}", issue.kind.as_str());
    let _ = writeln!(prompt, "Packages involved: {}", issue.packages.join(", "));
    prompt.push_str("\nDependency details:\n");

    for rec in records.iter().filter(|r| issue.packages.contains(&r.package)) {
        let _ = writeln!(prompt, "- {}: {}", rec.package, rec.display_specifier());
    }

    if let Some(details) = issue.details.as_ref().filter(|d| !d.is_empty()) {
        let _ = writeln!(prompt, "\nVersion constraints: {}", json_object(details));
    }

    prompt.push('\n');
    prompt.push_str(INSTRUCTIONS);
    prompt
}

/// `{"a": "b", "c": "d"}`, keys in map order.
fn json_object(map: &BTreeMap<String, String>) -> String {
    let entries: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{}: {}", json_string(k), json_string(v)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}
