//! Stable identifiers for checks and issue kinds.
//!
//! `check_id` is a dotted namespace. Issue kinds are short snake_case discriminators and
//! match the serialized form of [`crate::IssueKind`].

// Checks
pub const CHECK_DECLARATION_CONFLICT: &str = "declaration.conflict";
pub const CHECK_COMPAT_PYTORCH_LIGHTNING_TORCH: &str = "compat.pytorch_lightning_torch";
pub const CHECK_COMPAT_FASTAPI_PYDANTIC: &str = "compat.fastapi_pydantic";
pub const CHECK_COMPAT_TENSORFLOW_KERAS: &str = "compat.tensorflow_keras";

// Issue kinds
pub const KIND_DUPLICATE: &str = "duplicate";
pub const KIND_VERSION_INCOMPATIBILITY: &str = "version_incompatibility";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const KIND_RUNTIME_ERROR: &str = "runtime_error";
