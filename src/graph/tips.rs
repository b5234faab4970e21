//! Removal of dangling entry and exit tips.
//!
//! Several sources (or sinks) that meet a few hops into the graph are usually
//! read ends carrying errors. Every branch between the tips and their meeting
//! point competes as a path, and only the best one survives.

use std::collections::BTreeMap;

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;
use rand::Rng;
use tracing::debug;

use crate::config::SearchLimits;
use crate::error::{AssemblyError, Result};
use crate::graph::bubble::bubble_paths;
use crate::graph::debruijn::{DeBruijnGraph, Path};
use crate::graph::path::{average_weight, path_length, select_best_path};

/// Prune entry tips back to the node where all `sources` converge.
///
/// Losing branches lose their source node as well. Returns the surviving path,
/// or `None` when there is nothing to resolve.
pub fn solve_entry_tips<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    sources: &[NodeIndex],
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<Option<Path>> {
    solve_tips(graph, sources, Direction::Outgoing, limits, rng)
}

/// Prune exit tips back to the node where all `sinks` diverge.
///
/// Mirror of `solve_entry_tips`: the search walks predecessors and losing
/// branches lose their sink node.
pub fn solve_out_tips<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    sinks: &[NodeIndex],
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<Option<Path>> {
    solve_tips(graph, sinks, Direction::Incoming, limits, rng)
}

fn solve_tips<R: Rng + ?Sized>(
    graph: &mut DeBruijnGraph,
    tips: &[NodeIndex],
    dir: Direction,
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<Option<Path>> {
    let mut live: Vec<NodeIndex> = Vec::with_capacity(tips.len());
    for &tip in tips {
        if graph.contains_node(tip) && !live.contains(&tip) {
            live.push(tip);
        }
    }
    if live.len() < 2 {
        return Ok(None);
    }

    let meeting = meeting_point(graph, &live, dir, limits.max_hops)?;
    debug!(
        "{} {} tips meet at {}",
        live.len(),
        if dir == Direction::Outgoing { "entry" } else { "exit" },
        graph.label(meeting).unwrap_or_default()
    );

    let mut paths: Vec<Path> = Vec::new();
    for &tip in &live {
        let found = match dir {
            Direction::Outgoing => bubble_paths(graph, tip, meeting, limits)?,
            Direction::Incoming => bubble_paths(graph, meeting, tip, limits)?,
        };
        paths.extend(found);
    }
    if paths.len() < 2 {
        return Ok(None);
    }

    let lengths: Vec<usize> = paths.iter().map(|p| path_length(p)).collect();
    let weights = paths
        .iter()
        .map(|p| average_weight(graph, p))
        .collect::<Result<Vec<f64>>>()?;

    let (delete_entry, delete_sink) = match dir {
        Direction::Outgoing => (true, false),
        Direction::Incoming => (false, true),
    };
    select_best_path(graph, paths, &lengths, &weights, delete_entry, delete_sink, rng).map(Some)
}

/// Nearest node reachable from every tip by walking edges in `dir`.
///
/// All tips advance one hop at a time. After each hop, nodes reached from
/// every tip are candidates; the one with the smallest total distance wins,
/// then the smallest worst-case distance, then the lowest node handle.
fn meeting_point(
    graph: &DeBruijnGraph,
    tips: &[NodeIndex],
    dir: Direction,
    max_hops: usize,
) -> Result<NodeIndex> {
    let mut reached: Vec<BTreeMap<NodeIndex, usize>> = tips
        .iter()
        .map(|&tip| BTreeMap::from([(tip, 0)]))
        .collect();
    let mut frontiers: Vec<Vec<NodeIndex>> = tips.iter().map(|&tip| vec![tip]).collect();

    for hop in 1..=max_hops {
        for (seen, frontier) in reached.iter_mut().zip(frontiers.iter_mut()) {
            let mut next = Vec::new();
            for &node in frontier.iter() {
                for neighbor in graph.neighbors(node, dir) {
                    if !seen.contains_key(&neighbor) {
                        seen.insert(neighbor, hop);
                        next.push(neighbor);
                    }
                }
            }
            *frontier = next;
        }

        let (first, rest) = reached.split_first().ok_or(AssemblyError::NoConvergence {
            tips: tips.len(),
            hops: hop,
        })?;
        let best = first
            .keys()
            .filter(|&&node| rest.iter().all(|seen| seen.contains_key(&node)))
            .map(|&node| {
                let distances = reached.iter().filter_map(|seen| seen.get(&node));
                let total: usize = distances.clone().sum();
                let worst = distances.max().copied().unwrap_or(0);
                (total, worst, node)
            })
            .min();

        if let Some((_, _, node)) = best {
            return Ok(node);
        }
        if frontiers.iter().all(|frontier| frontier.is_empty()) {
            break;
        }
    }

    Err(AssemblyError::NoConvergence {
        tips: tips.len(),
        hops: max_hops,
    })
}
