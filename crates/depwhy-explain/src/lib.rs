//! Turns issues into explanations.
//!
//! Every issue is explained exactly once: the prompt goes to a [`TextGenerator`] when one is
//! configured, and any generator failure falls back to a fixed template. The caller never sees
//! a generator error.

#![forbid(unsafe_code)]

mod config;
mod error;
mod extract;
mod fallback;
mod prompt;
mod remote;

pub use config::{DEFAULT_ENDPOINT, ExplainConfig};
pub use error::ServiceError;
pub use extract::{how_to_fix, why_it_happens};
pub use fallback::fallback_text;
pub use prompt::build_prompt;
pub use remote::RemoteGenerator;

use depwhy_types::{DependencyRecord, Explanation, ExplanationSource, Issue};
use tracing::warn;

/// Produces free text for a prompt.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// Explain one issue. `records` provides the specifier context for the packages involved.
pub fn explain(
    issue: &Issue,
    records: &[DependencyRecord],
    generator: Option<&dyn TextGenerator>,
) -> Explanation {
    let prompt = build_prompt(issue, records);

    let (text, source) = match generator.map(|g| g.generate(&prompt)) {
        Some(Ok(text)) => (text, ExplanationSource::Service),
        Some(Err(err)) => {
            warn!(check_id = %issue.check_id, error = %err, "text generation failed, using template");
            (fallback_text(&prompt).to_string(), ExplanationSource::Fallback)
        }
        None => (fallback_text(&prompt).to_string(), ExplanationSource::Fallback),
    };

    Explanation {
        summary: issue.message.clone(),
        why_it_happens: why_it_happens(&text),
        how_to_fix: how_to_fix(&text),
        explanation: text,
        packages_involved: issue.packages.clone(),
        severity: issue.severity,
        source,
    }
}

/// An explainer bound to an optional generator.
pub struct Explainer {
    generator: Option<Box<dyn TextGenerator>>,
}

impl Explainer {
    /// Templates only.
    pub fn offline() -> Self {
        Self { generator: None }
    }

    pub fn with_generator(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Some(Box::new(generator)),
        }
    }

    /// Build from resolved configuration. A remote client that cannot be constructed degrades
    /// to templates.
    pub fn from_config(cfg: &ExplainConfig) -> Self {
        if !cfg.use_external_service {
            return Self::offline();
        }
        match RemoteGenerator::new(cfg) {
            Ok(remote) => Self::with_generator(remote),
            Err(err) => {
                warn!(error = %err, "could not build text generation client, using templates");
                Self::offline()
            }
        }
    }

    pub fn service_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub fn explain(&self, issue: &Issue, records: &[DependencyRecord]) -> Explanation {
        explain(issue, records, self.generator.as_deref())
    }
}
