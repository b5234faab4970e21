use ahash::AHashSet;
use petgraph::stable_graph::NodeIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{AssemblyError, Result};
use crate::graph::debruijn::{DeBruijnGraph, Path};

/// Average weights closer than this are treated as equal
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Number of nodes on the path
pub fn path_length(path: &[NodeIndex]) -> usize {
    path.len()
}

/// Weights of the path's consecutive edges that exist in the graph
pub fn path_weights(graph: &DeBruijnGraph, path: &[NodeIndex]) -> Vec<u32> {
    path.windows(2)
        .filter_map(|pair| graph.weight(pair[0], pair[1]))
        .collect()
}

/// Mean weight of the edges along `path`
pub fn average_weight(graph: &DeBruijnGraph, path: &[NodeIndex]) -> Result<f64> {
    if path.len() < 2 {
        return Err(AssemblyError::EmptyPath);
    }
    let weights = path_weights(graph, path);
    if weights.is_empty() {
        return Err(AssemblyError::EmptyPath);
    }
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    Ok(total as f64 / weights.len() as f64)
}

/// Remove every edge along each path, optionally the entry and/or sink node,
/// then any node on the path left without edges.
pub fn remove_paths(
    graph: &mut DeBruijnGraph,
    paths: &[Path],
    delete_entry: bool,
    delete_sink: bool,
) {
    remove_paths_keeping(graph, paths, &[], delete_entry, delete_sink);
}

/// Same as `remove_paths`, but never touches the nodes or edges of `keep`
fn remove_paths_keeping(
    graph: &mut DeBruijnGraph,
    paths: &[Path],
    keep: &[NodeIndex],
    delete_entry: bool,
    delete_sink: bool,
) {
    let kept_nodes: AHashSet<NodeIndex> = keep.iter().copied().collect();
    let kept_edges: AHashSet<(NodeIndex, NodeIndex)> =
        keep.windows(2).map(|pair| (pair[0], pair[1])).collect();

    for path in paths {
        for pair in path.windows(2) {
            // Losing paths may share edges already removed earlier in the batch
            if !kept_edges.contains(&(pair[0], pair[1])) {
                graph.remove_edge(pair[0], pair[1]);
            }
        }

        // Neighbours of a deleted end node lose edges too, so they join the sweep
        let mut touched: Vec<NodeIndex> = path.clone();
        let ends = [
            (delete_entry, path.first().copied()),
            (delete_sink, path.last().copied()),
        ];
        for (delete, end) in ends {
            let Some(node) = end.filter(|_| delete) else {
                continue;
            };
            if kept_nodes.contains(&node) || !graph.contains_node(node) {
                continue;
            }
            touched.extend(graph.predecessors(node));
            touched.extend(graph.successors(node));
            graph.remove_node(node);
        }

        for node in touched {
            graph.remove_if_isolated(node);
        }
    }
}

/// Keep one path out of `paths` and remove the others from the graph.
///
/// The highest average weight wins; ties go to the longest path, and paths
/// equal on both are drawn uniformly from `rng`. Returns the kept path.
pub fn select_best_path<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    mut paths: Vec<Path>,
    lengths: &[usize],
    avg_weights: &[f64],
    delete_entry: bool,
    delete_sink: bool,
    rng: &mut R,
) -> Result<Path> {
    if paths.is_empty() {
        return Err(AssemblyError::NoCandidates);
    }
    if lengths.len() != paths.len() || avg_weights.len() != paths.len() {
        return Err(AssemblyError::MismatchedCandidates {
            paths: paths.len(),
            lengths: lengths.len(),
            weights: avg_weights.len(),
        });
    }

    let max_weight = avg_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let heaviest: Vec<usize> = (0..paths.len())
        .filter(|&i| (avg_weights[i] - max_weight).abs() <= WEIGHT_TOLERANCE)
        .collect();

    let max_len = heaviest.iter().map(|&i| lengths[i]).max().unwrap_or(0);
    let longest: Vec<usize> = heaviest
        .into_iter()
        .filter(|&i| lengths[i] == max_len)
        .collect();

    let best = match longest.as_slice() {
        [only] => *only,
        ties => {
            let pick = *ties.choose(rng).ok_or(AssemblyError::NoCandidates)?;
            debug!("Random tie-break among {} paths picked candidate {}", ties.len(), pick);
            pick
        }
    };

    let kept = paths.remove(best);
    remove_paths_keeping(graph, &paths, &kept, delete_entry, delete_sink);
    Ok(kept)
}
