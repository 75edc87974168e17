use depwhy_types::DependencyRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Current known attributes of one package name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub specifier: String,
    pub extras: BTreeSet<String>,
    pub marker: String,
    pub conflict: Option<String>,
}

/// Requirement edge between two packages. Transitive requirements are not modelled yet, so
/// graphs built from requirement text never contain edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// A record the parser annotated with a conflict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphConflict {
    pub package: String,
    pub reason: String,
    pub line: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// Package name -> node. Reflects the last record seen for each name.
    pub nodes: BTreeMap<String, Node>,
    pub edges: Vec<Edge>,
    /// Every annotated record, in input order.
    pub conflicts: Vec<GraphConflict>,
}

impl DependencyGraph {
    pub fn contains(&self, package: &str) -> bool {
        self.nodes.contains_key(package)
    }

    pub fn specifier(&self, package: &str) -> Option<&str> {
        self.nodes.get(package).map(|n| n.specifier.as_str())
    }
}

/// Project records into a graph.
///
/// The node map is a current view (later records overwrite earlier ones for the same name);
/// `conflicts` is the history of every annotated record.
pub fn build(records: &[DependencyRecord]) -> DependencyGraph {
    let mut graph = DependencyGraph::default();

    for rec in records {
        graph.nodes.insert(
            rec.package.clone(),
            Node {
                specifier: rec.specifier.clone(),
                extras: rec.extras.clone(),
                marker: rec.marker.clone(),
                conflict: rec.conflict.clone(),
            },
        );

        if let Some(reason) = &rec.conflict {
            graph.conflicts.push(GraphConflict {
                package: rec.package.clone(),
                reason: reason.clone(),
                line: rec.line,
            });
        }
    }

    graph
}
