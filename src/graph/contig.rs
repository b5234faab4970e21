use ahash::AHashSet;
use petgraph::stable_graph::NodeIndex;

use crate::graph::debruijn::{DeBruijnGraph, Path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub id: usize,
    pub sequence: String,
    pub length: usize,
}

impl Contig {
    pub fn new(id: usize, sequence: String) -> Self {
        let length = sequence.len();
        Self {
            id,
            sequence,
            length,
        }
    }
}

/// First path from `start` to `end`, following successors depth-first.
///
/// Successors are tried in graph order and the first one that reaches `end`
/// wins. Nodes already explored are not entered again, which also stops the
/// walk from looping on cycles.
pub fn contig_path(graph: &DeBruijnGraph, start: NodeIndex, end: NodeIndex) -> Option<Path> {
    if !graph.contains_node(start) || !graph.contains_node(end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut visited = AHashSet::new();
    visited.insert(start);
    // (node, its successors, index of the next successor to try)
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> =
        vec![(start, graph.successors(start), 0)];

    while let Some((_, successors, next)) = stack.last_mut() {
        let candidate = successors.get(*next).copied();
        *next += 1;
        let Some(node) = candidate else {
            stack.pop();
            continue;
        };

        if node == end {
            let mut path: Path = stack.iter().map(|(n, _, _)| *n).collect();
            path.push(end);
            return Some(path);
        }
        if visited.insert(node) {
            let successors = graph.successors(node);
            stack.push((node, successors, 0));
        }
    }

    None
}

/// Spell a path: the first node followed by the last base of every next node
pub fn spell_path(graph: &DeBruijnGraph, path: &[NodeIndex]) -> Option<String> {
    let overlap = graph.k().saturating_sub(2);
    let (&first, rest) = path.split_first()?;

    let mut sequence = graph.label(first)?.to_string();
    for &node in rest {
        let label = graph.label(node)?;
        sequence.push_str(label.get(overlap..)?);
    }
    Some(sequence)
}

/// Sequence along the first path from `start` to `end`, if any
pub fn contig(graph: &DeBruijnGraph, start: NodeIndex, end: NodeIndex) -> Option<String> {
    let path = contig_path(graph, start, end)?;
    spell_path(graph, &path)
}

/// Contigs for every (source, sink) pair that is connected.
///
/// Sources form the outer loop and sinks the inner one, both in the given order.
pub fn contigs(graph: &DeBruijnGraph, sources: &[NodeIndex], sinks: &[NodeIndex]) -> Vec<Contig> {
    let mut found = Vec::new();
    for &source in sources {
        for &sink in sinks {
            if let Some(sequence) = contig(graph, source, sink) {
                found.push(Contig::new(found.len(), sequence));
            }
        }
    }
    found
}
