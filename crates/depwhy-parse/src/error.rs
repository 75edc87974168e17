use thiserror::Error;

/// Grammar failures for a single requirement line.
///
/// The `Display` text is embedded verbatim in the record's `Parse error: ...` annotation.
/// Columns are 1-based character positions within the comment-stripped line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    #[error("expected package name at column {col}")]
    EmptyName { col: usize },

    #[error("invalid package name `{name}`: names must start and end with a letter or digit")]
    InvalidName { name: String },

    #[error("unterminated extras list, expected `]`")]
    UnterminatedExtras,

    #[error("invalid extra name `{extra}`")]
    InvalidExtra { extra: String },

    #[error("expected version after `{op}` at column {col}")]
    MissingVersion { op: String, col: usize },

    #[error("invalid version specifier `{spec}`: {reason}")]
    InvalidSpecifier { spec: String, reason: &'static str },

    #[error("unterminated version list, expected `)`")]
    UnterminatedParen,

    #[error("invalid URL `{url}`")]
    InvalidUrl { url: String },

    #[error("invalid environment marker: {reason}")]
    InvalidMarker { reason: String },

    #[error(
        "unexpected `{found}` at column {col}: expected end of requirement, version specifier, `[`, `@` or `;`"
    )]
    TrailingInput { found: char, col: usize },
}
