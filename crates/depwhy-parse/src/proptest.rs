//! Property-based tests for the parser.
//!
//! These tests use proptest to verify invariants around:
//! - Record count vs. declaring lines
//! - Determinism across repeated parses
//! - Name normalization and robustness on arbitrary text

use crate::{fuzz, parse_requirements, parse_simple_list};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Strategy for valid package names.
fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9_-]{0,12}[A-Za-z0-9]")
        .unwrap()
}

/// Strategy for a specifier clause list, possibly empty.
fn arb_specifier() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (0u32..5, 0u32..20).prop_map(|(major, minor)| format!("=={major}.{minor}")),
        (0u32..5, 0u32..20).prop_map(|(major, minor)| format!(">={major}.{minor}")),
        (0u32..5, 0u32..20)
            .prop_map(|(major, minor)| format!(">={major}.{minor},<{}", major + 1)),
    ]
}

/// A line that is either a declaration, a comment, or blank.
#[derive(Clone, Debug)]
enum Line {
    Decl { name: String, spec: String },
    Comment,
    Blank,
}

fn arb_line() -> impl Strategy<Value = Line> {
    prop_oneof![
        6 => (arb_name(), arb_specifier()).prop_map(|(name, spec)| Line::Decl { name, spec }),
        1 => Just(Line::Comment),
        1 => Just(Line::Blank),
    ]
}

fn render(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|l| match l {
            Line::Decl { name, spec } => format!("{name}{spec}"),
            Line::Comment => "# pinned for reasons".to_string(),
            Line::Blank => "   ".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Number of records the parser should emit: declarations minus exact re-declarations.
fn expected_count(lines: &[Line]) -> usize {
    let mut first: BTreeMap<String, String> = BTreeMap::new();
    let mut count = 0;
    for line in lines {
        if let Line::Decl { name, spec } = line {
            match first.get(&name.to_lowercase()) {
                Some(prev) if prev == spec => {}
                Some(_) => count += 1,
                None => {
                    first.insert(name.to_lowercase(), spec.clone());
                    count += 1;
                }
            }
        }
    }
    count
}

proptest! {
    #[test]
    fn record_count_matches_declarations_minus_exact_duplicates(
        lines in prop::collection::vec(arb_line(), 0..30)
    ) {
        let records = parse_requirements(&render(&lines));
        prop_assert_eq!(records.len(), expected_count(&lines));
    }

    #[test]
    fn records_preserve_input_order(lines in prop::collection::vec(arb_line(), 0..30)) {
        let records = parse_requirements(&render(&lines));
        prop_assert!(records.windows(2).all(|w| w[0].line < w[1].line));
    }

    #[test]
    fn parsing_is_idempotent(lines in prop::collection::vec(arb_line(), 0..30)) {
        let text = render(&lines);
        prop_assert_eq!(parse_requirements(&text), parse_requirements(&text));
        prop_assert_eq!(parse_simple_list(&text), parse_simple_list(&text));
    }

    #[test]
    fn package_names_are_lower_case(lines in prop::collection::vec(arb_line(), 0..30)) {
        let text = render(&lines);
        for rec in parse_requirements(&text).iter().chain(parse_simple_list(&text).iter()) {
            prop_assert_eq!(rec.package.clone(), rec.package.to_lowercase());
            prop_assert!(!rec.package.is_empty());
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,200}") {
        let _ = fuzz::parse_text(&text);
        let _ = fuzz::parse_line(&text);
    }
}
