use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One requirement line, as understood by the parser.
///
/// Records are created once per non-blank, non-comment input line and are never mutated
/// afterwards; downstream stages borrow them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyRecord {
    /// Lower-cased package name. Best-effort for lines that failed to parse.
    pub package: String,

    /// Normalized version-constraint clauses (sorted, comma-joined). Empty when unconstrained.
    #[serde(default)]
    pub specifier: String,

    /// Optional-feature tags requested in `[...]`.
    #[serde(default)]
    pub extras: BTreeSet<String>,

    /// Environment marker after `;`, as written. Empty when absent.
    #[serde(default)]
    pub marker: String,

    /// Direct reference given with `name @ <url>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// The source line with any `#` comment stripped.
    pub original: String,

    /// 1-based input line number.
    pub line: u32,

    /// Set when the line could not be parsed or re-declares a package with another specifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<String>,
}

impl DependencyRecord {
    /// A clean record holding only a package name.
    pub fn bare(package: impl Into<String>, original: impl Into<String>, line: u32) -> Self {
        Self {
            package: package.into(),
            original: original.into(),
            line,
            ..Self::default()
        }
    }

    pub fn has_conflict(&self) -> bool {
        self.conflict.is_some()
    }

    /// Specifier text for display, with a placeholder for unconstrained packages.
    pub fn display_specifier(&self) -> &str {
        if self.specifier.is_empty() {
            "no version specified"
        } else {
            &self.specifier
        }
    }
}
