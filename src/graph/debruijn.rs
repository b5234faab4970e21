// src/graph/debruijn.rs
use std::borrow::Borrow;

use ahash::AHashMap;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction;

use crate::error::{AssemblyError, Result};

/// Ordered sequence of node handles connected by edges
pub type Path = Vec<NodeIndex>;

/// Weighted de Bruijn graph where:
/// - Nodes are (k-1)-mers, interned by value
/// - Edges are k-mers weighted by observation count
///
/// Node handles stay valid when other nodes are removed. Nodes are only
/// added while building, so a removed handle is never reused mid-simplification.
#[derive(Debug, Clone)]
pub struct DeBruijnGraph {
    k: usize,
    graph: StableDiGraph<String, u32>,
    index: AHashMap<String, NodeIndex>,
}

impl DeBruijnGraph {
    /// Create an empty graph for k-mers of length `k`
    pub fn new(k: usize) -> Self {
        Self {
            k,
            graph: StableDiGraph::new(),
            index: AHashMap::new(),
        }
    }

    /// Build the graph from a k-mer count table.
    ///
    /// Every k-mer adds an edge from its first k-1 bases to its last k-1 bases.
    /// Node order follows the table's iteration order, so pass an ordered map
    /// when reproducible output matters.
    pub fn from_kmer_counts<I, S, C>(k: usize, counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: Borrow<u32>,
    {
        if k < 2 {
            return Err(AssemblyError::InvalidKmerSize(k));
        }

        let mut graph = Self::new(k);
        for (kmer, count) in counts {
            let kmer = kmer.as_ref();
            if kmer.len() != k || !kmer.is_ascii() {
                return Err(AssemblyError::InvalidKmer {
                    kmer: kmer.to_string(),
                    k,
                });
            }
            let count = *count.borrow();
            if count == 0 {
                continue;
            }
            graph.add_edge(&kmer[..k - 1], &kmer[1..], count);
        }

        Ok(graph)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Return the handle for a node label, adding the node if needed
    pub fn intern(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.index.insert(label.to_string(), idx);
        idx
    }

    /// Add `weight` observations of the edge `from -> to`.
    /// An existing edge accumulates the weight instead of being reset.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: u32) -> (NodeIndex, NodeIndex) {
        let a = self.intern(from);
        let b = self.intern(to);
        match self.graph.find_edge(a, b) {
            Some(edge) => {
                if let Some(w) = self.graph.edge_weight_mut(edge) {
                    *w = w.saturating_add(weight);
                }
            }
            None => {
                self.graph.add_edge(a, b, weight);
            }
        }
        (a, b)
    }

    pub fn node(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    pub fn label(&self, node: NodeIndex) -> Option<&str> {
        self.graph.node_weight(node).map(String::as_str)
    }

    pub fn contains_node(&self, node: NodeIndex) -> bool {
        self.graph.contains_node(node)
    }

    pub fn weight(&self, from: NodeIndex, to: NodeIndex) -> Option<u32> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .copied()
    }

    /// Edge weight looked up by node labels
    pub fn weight_between(&self, from: &str, to: &str) -> Option<u32> {
        self.weight(self.node(from)?, self.node(to)?)
    }

    pub fn contains_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// Remove the edge `from -> to`, returning its weight if it existed
    pub fn remove_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Option<u32> {
        let edge = self.graph.find_edge(from, to)?;
        self.graph.remove_edge(edge)
    }

    /// Remove a node and all its edges
    pub fn remove_node(&mut self, node: NodeIndex) -> Option<String> {
        let label = self.graph.remove_node(node)?;
        self.index.remove(&label);
        Some(label)
    }

    pub fn is_isolated(&self, node: NodeIndex) -> bool {
        self.contains_node(node) && self.in_degree(node) == 0 && self.out_degree(node) == 0
    }

    /// Remove `node` if it has neither incoming nor outgoing edges
    pub fn remove_if_isolated(&mut self, node: NodeIndex) -> bool {
        if self.is_isolated(node) {
            self.remove_node(node);
            true
        } else {
            false
        }
    }

    pub fn neighbors(&self, node: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        self.graph.neighbors_directed(node, dir).collect()
    }

    pub fn predecessors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(node, Direction::Incoming)
    }

    pub fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors(node, Direction::Outgoing)
    }

    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.graph.edges_directed(node, Direction::Incoming).count()
    }

    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.graph.edges_directed(node, Direction::Outgoing).count()
    }

    /// Live node handles in stable (insertion) order
    pub fn nodes(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    /// All edges as `(from, to, weight)` labels, in edge index order
    pub fn edges(&self) -> Vec<(&str, &str, u32)> {
        self.graph
            .edge_references()
            .filter_map(|edge| {
                let from = self.label(edge.source())?;
                let to = self.label(edge.target())?;
                Some((from, to, *edge.weight()))
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_build_from_kmer_counts() {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        counts.insert("ATG".to_string(), 3);
        counts.insert("TGC".to_string(), 5);
        counts.insert("GCA".to_string(), 1);

        let graph = DeBruijnGraph::from_kmer_counts(3, &counts).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        for (kmer, &count) in &counts {
            assert_eq!(graph.weight_between(&kmer[..2], &kmer[1..]), Some(count));
        }
    }

    #[test]
    fn test_readding_edge_accumulates_weight() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("AC", "CG", 2);
        graph.add_edge("AC", "CG", 3);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight_between("AC", "CG"), Some(5));
    }

    #[test]
    fn test_empty_table_gives_empty_graph() {
        let counts: BTreeMap<String, u32> = BTreeMap::new();
        let graph = DeBruijnGraph::from_kmer_counts(4, &counts).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_rejects_bad_kmers() {
        let err = DeBruijnGraph::from_kmer_counts(1, vec![("A", 1u32)]).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidKmerSize(1)));

        let err = DeBruijnGraph::from_kmer_counts(3, vec![("ACGT", 1u32)]).unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidKmer { k: 3, .. }));
    }

    #[test]
    fn test_remove_node_keeps_other_handles() {
        let mut graph = DeBruijnGraph::new(3);
        let (a, b) = graph.add_edge("AA", "AC", 1);
        let (_, c) = graph.add_edge("AC", "CG", 1);

        graph.remove_node(a);

        assert!(!graph.contains_node(a));
        assert_eq!(graph.node("AA"), None);
        assert_eq!(graph.label(b), Some("AC"));
        assert_eq!(graph.label(c), Some("CG"));
        assert_eq!(graph.in_degree(b), 0);
        assert!(graph.contains_edge(b, c));
    }

    #[test]
    fn test_remove_if_isolated() {
        let mut graph = DeBruijnGraph::new(3);
        let (a, b) = graph.add_edge("AA", "AC", 1);

        assert!(!graph.remove_if_isolated(a));
        graph.remove_edge(a, b);
        assert!(graph.remove_if_isolated(a));
        assert!(graph.remove_if_isolated(b));
        assert!(graph.is_empty());
    }
}
