use petgraph::stable_graph::NodeIndex;

use crate::graph::debruijn::DeBruijnGraph;

/// Position of a node in the graph's entry/exit structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Source,
    Sink,
    Interior,
    Isolated,
}

/// Node counts per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologySummary {
    pub sources: usize,
    pub sinks: usize,
    pub interior: usize,
    pub isolated: usize,
}

pub fn role(graph: &DeBruijnGraph, node: NodeIndex) -> NodeRole {
    match (graph.in_degree(node), graph.out_degree(node)) {
        (0, 0) => NodeRole::Isolated,
        (0, _) => NodeRole::Source,
        (_, 0) => NodeRole::Sink,
        _ => NodeRole::Interior,
    }
}

/// Nodes without incoming edges, in node order
pub fn sources(graph: &DeBruijnGraph) -> Vec<NodeIndex> {
    graph
        .nodes()
        .into_iter()
        .filter(|&node| graph.in_degree(node) == 0)
        .collect()
}

/// Nodes without outgoing edges, in node order
pub fn sinks(graph: &DeBruijnGraph) -> Vec<NodeIndex> {
    graph
        .nodes()
        .into_iter()
        .filter(|&node| graph.out_degree(node) == 0)
        .collect()
}

pub fn summary(graph: &DeBruijnGraph) -> TopologySummary {
    let mut summary = TopologySummary::default();
    for node in graph.nodes() {
        match role(graph, node) {
            NodeRole::Source => summary.sources += 1,
            NodeRole::Sink => summary.sinks += 1,
            NodeRole::Interior => summary.interior += 1,
            NodeRole::Isolated => summary.isolated += 1,
        }
    }
    summary
}
