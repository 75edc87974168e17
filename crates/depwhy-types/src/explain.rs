//! Explain registry for checks and issue kinds.
//!
//! Maps check IDs and issue kinds to human-readable documentation with remediation guidance.
//! This is static reference text; per-issue explanations are produced by `depwhy-explain`.

use crate::ids;

/// Documentation entry for a check or issue kind.
#[derive(Debug, Clone)]
pub struct CheckDoc {
    /// Short description of the check/kind.
    pub title: &'static str,
    /// What the check detects and why it matters.
    pub description: &'static str,
    /// How to resolve issues.
    pub remediation: &'static str,
    /// Before/after requirement snippets.
    pub examples: ExamplePair,
}

/// Before and after requirement-file snippets.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Requirements that would trigger an issue.
    pub before: &'static str,
    /// Requirements that pass.
    pub after: &'static str,
}

/// Look up documentation by check_id or issue kind.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_doc(identifier: &str) -> Option<CheckDoc> {
    match identifier {
        // Check IDs
        ids::CHECK_DECLARATION_CONFLICT => Some(doc_declaration_conflict()),
        ids::CHECK_COMPAT_PYTORCH_LIGHTNING_TORCH => Some(doc_pytorch_lightning_torch()),
        ids::CHECK_COMPAT_FASTAPI_PYDANTIC => Some(doc_fastapi_pydantic()),
        ids::CHECK_COMPAT_TENSORFLOW_KERAS => Some(doc_tensorflow_keras()),

        // Issue kinds
        ids::KIND_DUPLICATE => Some(doc_duplicate()),
        ids::KIND_VERSION_INCOMPATIBILITY => Some(doc_version_incompatibility()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_DECLARATION_CONFLICT,
        ids::CHECK_COMPAT_PYTORCH_LIGHTNING_TORCH,
        ids::CHECK_COMPAT_FASTAPI_PYDANTIC,
        ids::CHECK_COMPAT_TENSORFLOW_KERAS,
    ]
}

/// List all issue kinds that analysis can emit.
pub fn all_kinds() -> &'static [&'static str] {
    &[ids::KIND_DUPLICATE, ids::KIND_VERSION_INCOMPATIBILITY]
}

// --- Check-level docs ---

fn doc_declaration_conflict() -> CheckDoc {
    CheckDoc {
        title: "Declaration Conflicts",
        description: "\
Detects requirement lines that cannot be used as written:
- a package declared more than once with different version specifiers
- a line that does not follow the requirement grammar

Repeating a package with the same specifier is harmless and ignored.",
        remediation: "\
Keep exactly one declaration per package and make sure every line has the form
`name[extras] <specifiers> ; <marker>`. Comments start with `#`.",
        examples: ExamplePair {
            before: "pandas==2.0.3\npandas==1.5.0\nnot a valid req !!!",
            after: "pandas==2.0.3",
        },
    }
}

fn doc_pytorch_lightning_torch() -> CheckDoc {
    CheckDoc {
        title: "PyTorch Lightning vs PyTorch",
        description: "\
Flags pytorch-lightning pinned to the 2.x line together with torch pinned to 1.x.
pytorch-lightning 2.0 and later depend on APIs introduced in torch 2.0.",
        remediation: "\
Either move torch to 2.x, or keep torch 1.x and pin pytorch-lightning below 2.0.",
        examples: ExamplePair {
            before: "pytorch-lightning==2.1.0\ntorch==1.13.1",
            after: "pytorch-lightning==2.1.0\ntorch==2.1.0",
        },
    }
}

fn doc_fastapi_pydantic() -> CheckDoc {
    CheckDoc {
        title: "FastAPI vs Pydantic",
        description: "\
Flags fastapi pinned to the 0.7x line together with pydantic 2.x.
Those FastAPI releases were written against the pydantic v1 API.",
        remediation: "\
Either upgrade fastapi to a release with pydantic v2 support (0.100 or later), or pin
pydantic below 2.0.",
        examples: ExamplePair {
            before: "fastapi==0.78.0\npydantic==2.5.0",
            after: "fastapi==0.78.0\npydantic==1.10.13",
        },
    }
}

fn doc_tensorflow_keras() -> CheckDoc {
    CheckDoc {
        title: "TensorFlow vs Keras",
        description: "\
Flags tensorflow pinned to 1.x together with keras 3.x. Keras 3 targets the
TensorFlow 2 execution model and cannot run on TensorFlow 1.",
        remediation: "\
Either upgrade tensorflow to 2.x, or pin keras below 3.0.",
        examples: ExamplePair {
            before: "tensorflow==1.15.0\nkeras>=3.0",
            after: "tensorflow==2.15.0\nkeras>=3.0",
        },
    }
}

// --- Kind-level docs ---

fn doc_duplicate() -> CheckDoc {
    CheckDoc {
        title: "Duplicate or Malformed Declaration",
        description: "\
Issued for every requirement line the parser flagged: a repeated package with a
different specifier, or a line that failed to parse. Installers either reject such
files or silently pick one of the declarations.",
        remediation: "\
Remove all but one declaration of the package, and fix or delete malformed lines.",
        examples: ExamplePair {
            before: "requests>=2.28\nrequests==2.31.0",
            after: "requests==2.31.0",
        },
    }
}

fn doc_version_incompatibility() -> CheckDoc {
    CheckDoc {
        title: "Known Version Incompatibility",
        description: "\
Issued when two packages are both present and their specifiers match a curated rule of
known incompatible release lines. Matching is textual on the specifier, not a full
version solve.",
        remediation: "\
Follow the rule-specific guidance: `depwhy explain <check_id>` lists it.",
        examples: ExamplePair {
            before: "fastapi==0.78.0\npydantic>=2.0",
            after: "fastapi>=0.100\npydantic>=2.0",
        },
    }
}
