//! Requirement-file parsing (no IO).
//!
//! Input: the text of a requirements file, or a plain newline-separated list of names.
//! Output: one [`DependencyRecord`] per declaration, in input order.
//!
//! Malformed lines and conflicting re-declarations never abort a run; they are recorded on the
//! record's `conflict` field and surface later as issues.

#![forbid(unsafe_code)]

mod error;
mod marker;
mod requirement;
mod scanner;

pub use error::RequirementError;
pub use requirement::{Operator, Requirement, Specifier, parse_requirement};

use depwhy_types::DependencyRecord;
use std::collections::BTreeMap;

/// Parse requirements-file text.
///
/// Blank lines and `#` comment lines produce nothing; inline `# ...` suffixes are stripped
/// first. A package seen again with an identical specifier is skipped silently; with a
/// different specifier it yields an extra record annotated `Duplicate: <first> vs <this>`,
/// leaving the first declaration canonical.
pub fn parse_requirements(text: &str) -> Vec<DependencyRecord> {
    let mut records = Vec::new();
    // package -> (specifier, original line) of the first declaration
    let mut seen: BTreeMap<String, (String, String)> = BTreeMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx as u32 + 1;
        let Some(line) = requirement_text(raw) else {
            continue;
        };

        let req = match parse_requirement(line) {
            Ok(req) => req,
            Err(err) => {
                records.push(DependencyRecord {
                    package: recover_name(line),
                    original: line.to_string(),
                    line: line_no,
                    conflict: Some(format!("Parse error: {err}")),
                    ..DependencyRecord::default()
                });
                continue;
            }
        };

        let package = req.name.to_lowercase();
        let specifier = req.specifier_string();

        let conflict = match seen.get(&package) {
            Some((first_spec, _)) if *first_spec == specifier => continue,
            Some((_, first_line)) => Some(format!("Duplicate: {first_line} vs {line}")),
            None => {
                seen.insert(package.clone(), (specifier.clone(), line.to_string()));
                None
            }
        };

        records.push(DependencyRecord {
            package,
            specifier,
            extras: req.extras,
            marker: req.marker.unwrap_or_default(),
            url: req.url,
            original: line.to_string(),
            line: line_no,
            conflict,
        });
    }

    records
}

/// Parse a plain list of package names.
///
/// Anything from the first comparison character (`<`, `>`, `=`, `!`, `~`) or `[` onwards is
/// dropped. Records never carry specifiers or conflicts, and no duplicate detection happens.
/// Lines that leave no name behind are skipped.
pub fn parse_simple_list(text: &str) -> Vec<DependencyRecord> {
    let mut records = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let Some(line) = requirement_text(raw) else {
            continue;
        };

        let name = line
            .split(['<', '>', '=', '!', '~'])
            .next()
            .unwrap_or_default()
            .split('[')
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() {
            continue;
        }

        records.push(DependencyRecord::bare(
            name.to_lowercase(),
            line,
            idx as u32 + 1,
        ));
    }

    records
}

/// Strip whitespace and comments; `None` for lines that carry no declaration.
fn requirement_text(raw: &str) -> Option<&str> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line,
    };
    Some(line)
}

/// Best-effort package name for a line the grammar rejected: everything before the first
/// `==`, `>=`, `<=` or `[`.
fn recover_name(line: &str) -> String {
    let cut = ["==", ">=", "<=", "["]
        .iter()
        .filter_map(|pat| line.find(*pat))
        .min()
        .unwrap_or(line.len());
    line[..cut].trim().to_string()
}

/// Fuzz-friendly API for exercising the grammar without building records.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse one line. **Never panics** on any input.
    pub fn parse_line(text: &str) -> Result<(), RequirementError> {
        parse_requirement(text).map(|_| ())
    }

    /// Run both entry points over arbitrary text. **Never panics** on any input.
    pub fn parse_text(text: &str) -> usize {
        parse_requirements(text).len() + parse_simple_list(text).len()
    }
}


#[cfg(test)]
mod proptest;
