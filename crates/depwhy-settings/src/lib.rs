//! Config parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{DepwhyConfigV1, ExplainSection, RuleConfig};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `depwhy.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DepwhyConfigV1> {
    let cfg: DepwhyConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the configuration used by the engine and the explainer: defaults, then the file,
/// then overrides.
pub fn resolve_config(cfg: DepwhyConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
