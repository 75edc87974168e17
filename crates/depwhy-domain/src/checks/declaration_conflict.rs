use crate::graph::DependencyGraph;
use crate::policy::EffectiveConfig;
use depwhy_types::{Issue, IssueKind, ids};

pub fn run(graph: &DependencyGraph, cfg: &EffectiveConfig, out: &mut Vec<Issue>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_DECLARATION_CONFLICT) else {
        return;
    };

    for conflict in &graph.conflicts {
        out.push(Issue {
            kind: IssueKind::Duplicate,
            check_id: ids::CHECK_DECLARATION_CONFLICT.to_string(),
            packages: vec![conflict.package.clone()],
            message: format!("Conflict in {}: {}", conflict.package, conflict.reason),
            severity: policy.severity,
            details: None,
            line: Some(conflict.line),
            fingerprint: None,
        });
    }
}
