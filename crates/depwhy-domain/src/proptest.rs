use crate::graph::build;
use crate::{check, check_with};
use crate::policy::EffectiveConfig;
use depwhy_types::{DependencyRecord, IssueKind};
use proptest::prelude::*;

const PACKAGES: &[&str] = &[
    "pytorch-lightning",
    "torch",
    "fastapi",
    "pydantic",
    "tensorflow",
    "keras",
    "numpy",
];

const SPECIFIERS: &[&str] = &[
    "", "==1.8.0", "==2.1.0", ">=2.0", "==0.78.0", "==1.15.0", "==3.0.1", "<2.0,>=1.8",
];

fn arb_record() -> impl Strategy<Value = DependencyRecord> {
    (
        prop::sample::select(PACKAGES),
        prop::sample::select(SPECIFIERS),
        prop::option::of("[a-z ]{1,12}"),
        1u32..500,
    )
        .prop_map(|(package, specifier, conflict, line)| DependencyRecord {
            package: package.to_string(),
            specifier: specifier.to_string(),
            original: format!("{package}{specifier}"),
            line,
            conflict,
            ..DependencyRecord::default()
        })
}

fn arb_requirement_line() -> impl Strategy<Value = String> {
    (prop::sample::select(PACKAGES), prop::sample::select(SPECIFIERS))
        .prop_map(|(p, s)| format!("{p}{s}"))
}

proptest! {
    #[test]
    fn graph_conflicts_name_existing_nodes(records in prop::collection::vec(arb_record(), 0..30)) {
        let graph = build(&records);
        for conflict in &graph.conflicts {
            prop_assert!(graph.nodes.contains_key(&conflict.package));
        }
        let expected = records.iter().filter(|r| r.conflict.is_some()).count();
        prop_assert_eq!(graph.conflicts.len(), expected);
        prop_assert!(graph.edges.is_empty());
    }

    #[test]
    fn all_clear_iff_no_issues(records in prop::collection::vec(arb_record(), 0..30)) {
        let outcome = check(&build(&records));
        prop_assert_eq!(outcome.all_clear, outcome.issues.is_empty());
    }

    #[test]
    fn duplicates_precede_rule_issues(records in prop::collection::vec(arb_record(), 0..30)) {
        let graph = build(&records);
        let outcome = check_with(&graph, &EffectiveConfig::default());

        let dupes = outcome
            .issues
            .iter()
            .take_while(|i| i.kind == IssueKind::Duplicate)
            .count();
        prop_assert_eq!(dupes, graph.conflicts.len());
        prop_assert!(outcome.issues[dupes..]
            .iter()
            .all(|i| i.kind == IssueKind::VersionIncompatibility));
        prop_assert!(outcome.issues.len() - dupes <= 3);
    }

    #[test]
    fn parsed_text_yields_consistent_outcome(lines in prop::collection::vec(arb_requirement_line(), 0..20)) {
        let records = depwhy_parse::parse_requirements(&lines.join("\n"));
        let graph = build(&records);
        for conflict in &graph.conflicts {
            prop_assert!(graph.nodes.contains_key(&conflict.package));
        }
        let outcome = check(&graph);
        prop_assert_eq!(outcome.all_clear, outcome.issues.is_empty());
    }
}
