use crate::checks;
use crate::fingerprint::fingerprint_for_issue;
use crate::graph::DependencyGraph;
use crate::policy::EffectiveConfig;
use depwhy_types::Issue;

/// Result of running the rule engine over a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    /// True iff `issues` is empty.
    pub all_clear: bool,
    pub issues: Vec<Issue>,
}

/// Check a graph with every check enabled at its default severity.
pub fn check(graph: &DependencyGraph) -> CheckOutcome {
    check_with(graph, &EffectiveConfig::default())
}

pub fn check_with(graph: &DependencyGraph, cfg: &EffectiveConfig) -> CheckOutcome {
    let mut issues: Vec<Issue> = Vec::new();

    checks::run_all(graph, cfg, &mut issues);

    // Order is meaningful here (duplicates first, then table order), so no sorting.
    for issue in &mut issues {
        issue.fingerprint = Some(fingerprint_for_issue(
            &issue.check_id,
            &issue.packages,
            &issue.message,
        ));
    }

    CheckOutcome {
        all_clear: issues.is_empty(),
        issues,
    }
}
