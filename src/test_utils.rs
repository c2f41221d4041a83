//! Shared fixtures for unit tests

use crate::map::CampusMap;

use std::collections::HashMap;

pub(crate) type TestGraph = HashMap<String, Vec<(String, u32)>>;

/// Build a graph from (node, [(neighbor, cost)]) rows
pub(crate) fn graph_from(rows: &[(&str, &[(&str, u32)])]) -> TestGraph {
    rows.iter()
        .map(|(node, edges)| {
            let edges = edges.iter().map(|(to, cost)| (to.to_string(), *cost)).collect();
            (node.to_string(), edges)
        })
        .collect()
}

// Helper function to create a neighbor function from a graph
pub(crate) fn create_neighbor_fn(graph: &TestGraph) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
    move |node: &String| graph.get(node).cloned().unwrap_or_default()
}

/// Diamond-shaped graph: A -> B -> D and A -> C -> D, the lower branch is cheaper
pub(crate) fn diamond() -> TestGraph {
    graph_from(&[
        ("A", &[("B", 1), ("C", 3)]),
        ("B", &[("D", 5)]),
        ("C", &[("D", 1)]),
        ("D", &[]),
    ])
}

pub(crate) fn names(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn campus() -> CampusMap {
    CampusMap::campus().expect("embedded campus map is valid")
}
