use crate::checks::COMPAT_RULES;
use depwhy_types::{Severity, ids};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Low,
        }
    }
}

/// Per-check policy after configuration has been resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub checks: BTreeMap<String, CheckPolicy>,
}

impl EffectiveConfig {
    /// Policy for an enabled check; `None` when the check is disabled or unknown.
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        let checks = known_check_ids()
            .filter_map(|id| Some((id.to_string(), CheckPolicy::enabled(default_severity(id)?))))
            .collect();
        Self { checks }
    }
}

/// Every check id the engine can emit, declaration conflicts first, then rules in table order.
pub fn known_check_ids() -> impl Iterator<Item = &'static str> {
    std::iter::once(ids::CHECK_DECLARATION_CONFLICT).chain(COMPAT_RULES.iter().map(|r| r.id))
}

pub fn default_severity(check_id: &str) -> Option<Severity> {
    if check_id == ids::CHECK_DECLARATION_CONFLICT {
        return Some(Severity::High);
    }
    COMPAT_RULES
        .iter()
        .find(|r| r.id == check_id)
        .map(|r| r.severity)
}
