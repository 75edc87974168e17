//! Pure conflict evaluation (no IO).
//!
//! Input: dependency records produced by `depwhy-parse`.
//! Output: a dependency graph, then a flat, ordered list of typed issues.

#![forbid(unsafe_code)]

pub mod checks;
pub mod fingerprint;
pub mod graph;
pub mod policy;

mod engine;

pub use engine::{CheckOutcome, check, check_with};
pub use graph::{DependencyGraph, GraphConflict, Node, build};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
