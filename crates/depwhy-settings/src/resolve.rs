use crate::model::DepwhyConfigV1;
use anyhow::Context;
use depwhy_domain::policy::{EffectiveConfig, known_check_ids};
use depwhy_explain::ExplainConfig;
use depwhy_types::Severity;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Force templates only.
    pub offline: bool,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub api_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub explain: ExplainConfig,
}

pub fn resolve_config(cfg: DepwhyConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    for (check_id, rc) in cfg.rules.iter() {
        if !known_check_ids().any(|id| id == check_id) {
            anyhow::bail!(
                "unknown rule: {check_id} (expected one of: {})",
                known_check_ids().collect::<Vec<_>>().join(", ")
            );
        }
        let Some(entry) = effective.checks.get_mut(check_id) else {
            continue;
        };

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = rc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    let explain = resolve_explain(&cfg, overrides)?;

    Ok(ResolvedConfig { effective, explain })
}

fn resolve_explain(cfg: &DepwhyConfigV1, overrides: Overrides) -> anyhow::Result<ExplainConfig> {
    let section = &cfg.explain;
    let mut out = ExplainConfig::default();

    if let Some(v) = section.use_external_service {
        out.use_external_service = v;
    }
    if overrides.offline {
        out.use_external_service = false;
    }

    if let Some(endpoint) = overrides.endpoint.or_else(|| section.endpoint.clone()) {
        if endpoint.trim().is_empty() {
            anyhow::bail!("explain.endpoint must not be empty");
        }
        out.endpoint = endpoint.trim().to_string();
    }

    if let Some(secs) = overrides.timeout_secs.or(section.timeout_secs) {
        if secs == 0 {
            anyhow::bail!("explain.timeout_secs must be greater than zero");
        }
        out.timeout = Duration::from_secs(secs);
    }

    if let Some(n) = section.max_new_tokens {
        out.max_new_tokens = n;
    }

    if let Some(t) = section.temperature {
        if !(0.0..=2.0).contains(&t) {
            anyhow::bail!("explain.temperature must be within 0.0..=2.0 (got {t})");
        }
        out.temperature = t;
    }

    if let Some(p) = section.parallel {
        out.parallel = p;
    }

    out.api_token = overrides.api_token.filter(|t| !t.trim().is_empty());

    Ok(out)
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "high" => Ok(Severity::High),
        "medium" => Ok(Severity::Medium),
        "low" => Ok(Severity::Low),
        other => anyhow::bail!("unknown severity: {other} (expected high|medium|low)"),
    }
}
