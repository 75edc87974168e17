use crate::graph::DependencyGraph;
use crate::policy::EffectiveConfig;
use depwhy_types::Issue;

mod compat;
mod declaration_conflict;
mod rules;

pub use rules::{COMPAT_RULES, CompatRule};

/// Run every check. Declaration conflicts come first, then compatibility rules in table order.
pub fn run_all(graph: &DependencyGraph, cfg: &EffectiveConfig, out: &mut Vec<Issue>) {
    declaration_conflict::run(graph, cfg, out);
    compat::run(graph, cfg, out);
}
