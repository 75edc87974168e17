use crate::graph::{DependencyGraph, build};
use crate::policy::{CheckPolicy, EffectiveConfig};
use depwhy_types::DependencyRecord;

pub fn record(package: &str, specifier: &str) -> DependencyRecord {
    DependencyRecord {
        package: package.to_string(),
        specifier: specifier.to_string(),
        original: format!("{package}{specifier}"),
        line: 1,
        ..DependencyRecord::default()
    }
}

pub fn conflicted(package: &str, specifier: &str, reason: &str) -> DependencyRecord {
    DependencyRecord {
        conflict: Some(reason.to_string()),
        ..record(package, specifier)
    }
}

pub fn graph(pairs: &[(&str, &str)]) -> DependencyGraph {
    let records: Vec<DependencyRecord> = pairs.iter().map(|(p, s)| record(p, s)).collect();
    build(&records)
}

pub fn config_with(check_id: &str, policy: CheckPolicy) -> EffectiveConfig {
    let mut cfg = EffectiveConfig::default();
    cfg.checks.insert(check_id.to_string(), policy);
    cfg
}
