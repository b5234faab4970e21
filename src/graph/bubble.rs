//! Bubble detection and resolution.
//!
//! A bubble is two or more simple paths between the same ancestor and
//! descendant, usually left by a sequencing error in the middle of a read.
//! Each bubble collapses to its best path (see `select_best_path`).

use petgraph::stable_graph::NodeIndex;
use rand::Rng;
use tracing::{debug, info};

use crate::config::SearchLimits;
use crate::error::{AssemblyError, Result};
use crate::graph::debruijn::{DeBruijnGraph, Path};
use crate::graph::path::{average_weight, path_length, select_best_path};

/// Enumerate every simple path from `start` to `end`.
///
/// Searches backward from `end`, prepending predecessors until a branch reaches
/// `start`; branches that run out of predecessors first are dropped. A branch
/// that meets one of its own nodes again fails the whole enumeration.
pub fn bubble_paths(
    graph: &DeBruijnGraph,
    start: NodeIndex,
    end: NodeIndex,
    limits: &SearchLimits,
) -> Result<Vec<Path>> {
    if !graph.contains_node(start) || !graph.contains_node(end) {
        return Ok(Vec::new());
    }

    let mut complete: Vec<Path> = Vec::new();
    // Partial paths are stored end-first and reversed once complete
    let mut stack: Vec<Path> = vec![vec![end]];

    while let Some(partial) = stack.pop() {
        let Some(&head) = partial.last() else {
            continue;
        };

        if head == start {
            let mut path = partial;
            path.reverse();
            complete.push(path);
            continue;
        }

        for pred in graph.predecessors(head) {
            if partial.contains(&pred) {
                return Err(AssemblyError::CyclicPath {
                    node: graph.label(pred).unwrap_or_default().to_string(),
                });
            }
            let mut next = partial.clone();
            next.push(pred);
            stack.push(next);
        }

        if complete.len() + stack.len() > limits.max_paths {
            return Err(AssemblyError::PathLimitExceeded {
                limit: limits.max_paths,
            });
        }
    }

    Ok(complete)
}

/// Collapse the bubble between `ancestor` and `descendant` to its best path.
///
/// Only the losing interior branches are removed; the two junction nodes stay.
/// Returns the kept path, or `None` when fewer than two paths exist.
pub fn solve_bubble<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    ancestor: NodeIndex,
    descendant: NodeIndex,
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<Option<Path>> {
    let paths = bubble_paths(graph, ancestor, descendant, limits)?;
    if paths.len() < 2 {
        return Ok(None);
    }

    let lengths: Vec<usize> = paths.iter().map(|p| path_length(p)).collect();
    let weights = paths
        .iter()
        .map(|p| average_weight(graph, p))
        .collect::<Result<Vec<f64>>>()?;

    debug!(
        "Bubble {} -> {} with {} paths",
        graph.label(ancestor).unwrap_or_default(),
        graph.label(descendant).unwrap_or_default(),
        paths.len()
    );

    select_best_path(graph, paths, &lengths, &weights, false, false, rng).map(Some)
}

/// Resolve bubbles until none remain, returning how many were collapsed.
///
/// Each pass scans pairs (i, j) with j at or after i in the node listing and
/// tries every predecessor of node i as the bubble start. Passes repeat until
/// one resolves nothing.
pub fn simplify_bubbles<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    limits: &SearchLimits,
    rng: &mut R,
) -> usize {
    let mut resolved = 0;
    let mut passes = 0;

    loop {
        passes += 1;
        let resolved_in_pass = bubble_pass(graph, limits, rng);
        resolved += resolved_in_pass;
        debug!("Bubble pass {} resolved {} bubbles", passes, resolved_in_pass);
        if resolved_in_pass == 0 {
            break;
        }
    }

    info!("Resolved {} bubbles in {} passes", resolved, passes);
    resolved
}

fn bubble_pass<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    limits: &SearchLimits,
    rng: &mut R,
) -> usize {
    let nodes = graph.nodes();
    let mut resolved = 0;

    for (i, &node_i) in nodes.iter().enumerate() {
        for &node_j in &nodes[i..] {
            if !graph.contains_node(node_i) {
                break;
            }
            // Two paths can only meet at a node with two incoming edges
            if !graph.contains_node(node_j) || graph.in_degree(node_j) < 2 {
                continue;
            }

            for start in graph.predecessors(node_i) {
                while graph.contains_node(start) && graph.contains_node(node_j) {
                    match solve_bubble(graph, start, node_j, limits, rng) {
                        Ok(Some(_)) => resolved += 1,
                        Ok(None) => break,
                        Err(err) => {
                            debug!(
                                "Skipping bubble {} -> {}: {}",
                                graph.label(start).unwrap_or_default(),
                                graph.label(node_j).unwrap_or_default(),
                                err
                            );
                            break;
                        }
                    }
                }
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labels(graph: &DeBruijnGraph, path: &[NodeIndex]) -> Vec<String> {
        path.iter()
            .map(|&n| graph.label(n).unwrap().to_string())
            .collect()
    }

    /// AA -> AC -> CG -> GT (weight 5) with an error branch AA -> AT -> TG -> GT (weight 1)
    fn diamond() -> DeBruijnGraph {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("AA", "AC", 5);
        graph.add_edge("AC", "CG", 5);
        graph.add_edge("CG", "GT", 5);
        graph.add_edge("AA", "AT", 1);
        graph.add_edge("AT", "TG", 1);
        graph.add_edge("TG", "GT", 1);
        graph
    }

    #[test]
    fn test_bubble_paths_finds_both_branches() {
        let graph = diamond();
        let start = graph.node("AA").unwrap();
        let end = graph.node("GT").unwrap();

        let paths = bubble_paths(&graph, start, end, &SearchLimits::default()).unwrap();
        let mut found: Vec<Vec<String>> = paths.iter().map(|p| labels(&graph, p)).collect();
        found.sort();

        assert_eq!(
            found,
            vec![
                vec!["AA", "AC", "CG", "GT"],
                vec!["AA", "AT", "TG", "GT"],
            ]
        );
    }

    #[test]
    fn test_bubble_paths_drops_dead_ends() {
        let mut graph = diamond();
        graph.add_edge("CC", "CG", 2);
        let start = graph.node("AA").unwrap();
        let end = graph.node("GT").unwrap();

        let paths = bubble_paths(&graph, start, end, &SearchLimits::default()).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_bubble_paths_reports_cycles() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("AA", "AC", 1);
        graph.add_edge("AC", "CA", 1);
        graph.add_edge("CA", "AC", 1);
        graph.add_edge("CA", "AG", 1);
        let start = graph.node("AA").unwrap();
        let end = graph.node("AG").unwrap();

        let err = bubble_paths(&graph, start, end, &SearchLimits::default()).unwrap_err();
        assert!(matches!(err, AssemblyError::CyclicPath { .. }));
    }

    #[test]
    fn test_bubble_paths_stops_at_ceiling() {
        let graph = diamond();
        let start = graph.node("AA").unwrap();
        let end = graph.node("GT").unwrap();
        let limits = SearchLimits {
            max_paths: 1,
            ..SearchLimits::default()
        };

        let err = bubble_paths(&graph, start, end, &limits).unwrap_err();
        assert!(matches!(err, AssemblyError::PathLimitExceeded { limit: 1 }));
    }

    #[test]
    fn test_solve_bubble_keeps_heavy_branch() {
        let mut graph = diamond();
        let start = graph.node("AA").unwrap();
        let end = graph.node("GT").unwrap();
        let mut rng = StdRng::seed_from_u64(9001);

        let kept = solve_bubble(&mut graph, start, end, &SearchLimits::default(), &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(labels(&graph, &kept), vec!["AA", "AC", "CG", "GT"]);
        assert!(graph.node("AT").is_none());
        assert!(graph.node("TG").is_none());
        assert!(graph.contains_node(start));
        assert!(graph.contains_node(end));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_solve_bubble_single_path_is_noop() {
        let mut graph = DeBruijnGraph::new(3);
        graph.add_edge("AA", "AC", 1);
        graph.add_edge("AC", "CG", 1);
        let start = graph.node("AA").unwrap();
        let end = graph.node("CG").unwrap();
        let mut rng = StdRng::seed_from_u64(9001);

        let kept = solve_bubble(&mut graph, start, end, &SearchLimits::default(), &mut rng).unwrap();
        assert!(kept.is_none());
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_simplify_bubbles_reaches_fixpoint() {
        let mut graph = diamond();
        // Second bubble downstream of the first
        graph.add_edge("GT", "TT", 4);
        graph.add_edge("TT", "TC", 4);
        graph.add_edge("TC", "CA", 4);
        graph.add_edge("GT", "GA", 1);
        graph.add_edge("GA", "GC", 1);
        graph.add_edge("GC", "CA", 1);
        let mut rng = StdRng::seed_from_u64(9001);
        let limits = SearchLimits::default();

        let resolved = simplify_bubbles(&mut graph, &limits, &mut rng);
        assert!(resolved >= 1);
        for error_node in ["AT", "TG", "GA", "GC"] {
            assert!(graph.node(error_node).is_none(), "{} survived", error_node);
        }
        assert_eq!(graph.edge_count(), 6);

        let edges_after = graph.edge_count();
        let nodes_after = graph.node_count();
        assert_eq!(simplify_bubbles(&mut graph, &limits, &mut rng), 0);
        assert_eq!(graph.edge_count(), edges_after);
        assert_eq!(graph.node_count(), nodes_after);
    }
}
