use super::rules::COMPAT_RULES;
use crate::graph::DependencyGraph;
use crate::policy::EffectiveConfig;
use depwhy_types::{Issue, IssueKind};
use std::collections::BTreeMap;

pub fn run(graph: &DependencyGraph, cfg: &EffectiveConfig, out: &mut Vec<Issue>) {
    for rule in COMPAT_RULES {
        let Some(policy) = cfg.check_policy(rule.id) else {
            continue;
        };

        let (a, b) = rule.packages;
        let (Some(spec_a), Some(spec_b)) = (graph.specifier(a), graph.specifier(b)) else {
            continue;
        };
        if !(rule.predicate)(spec_a, spec_b) {
            continue;
        }

        let details = BTreeMap::from([
            (a.to_string(), spec_a.to_string()),
            (b.to_string(), spec_b.to_string()),
        ]);

        out.push(Issue {
            kind: IssueKind::VersionIncompatibility,
            check_id: rule.id.to_string(),
            packages: vec![a.to_string(), b.to_string()],
            message: rule.message.to_string(),
            severity: policy.severity,
            details: Some(details),
            line: None,
            fingerprint: None,
        });
    }
}
