//! Assembly pipeline: build the graph, simplify it, read contigs back out.
//!
//! Stages:
//! 1. K-mer table -> de Bruijn graph
//! 2. Bubble resolution to a fixpoint
//! 3. Entry tip pruning, then exit tip pruning
//! 4. Contig extraction for every connected (source, sink) pair

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::AssemblyConfig;
use crate::error::Result;
use crate::graph::bubble::simplify_bubbles;
use crate::graph::contig::{contigs, Contig};
use crate::graph::debruijn::DeBruijnGraph;
use crate::graph::tips::{solve_entry_tips, solve_out_tips};
use crate::graph::topology::{sinks, sources, summary};
use crate::io::fasta::FastaWriter;
use crate::io::fastq::read_sequences;
use crate::kmer::counter::{count_kmers, KmerTable};
use crate::stats::ContigStats;

/// What one run did to the graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub nodes_built: usize,
    pub edges_built: usize,
    pub bubbles_resolved: usize,
    pub entry_tips_resolved: bool,
    pub out_tips_resolved: bool,
    pub nodes_remaining: usize,
    pub edges_remaining: usize,
    pub contigs: usize,
}

impl std::fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Assembly Report ===")?;
        writeln!(f, "Graph built: {} nodes, {} edges", self.nodes_built, self.edges_built)?;
        writeln!(f, "Bubbles resolved: {}", self.bubbles_resolved)?;
        writeln!(f, "Entry tips resolved: {}", self.entry_tips_resolved)?;
        writeln!(f, "Exit tips resolved: {}", self.out_tips_resolved)?;
        writeln!(
            f,
            "Graph simplified: {} nodes, {} edges",
            self.nodes_remaining, self.edges_remaining
        )?;
        write!(f, "Contigs: {}", self.contigs)
    }
}

/// Simplify `graph` in place and extract its contigs.
///
/// Tip clusters that cannot be resolved are left as they are and the run goes on.
pub fn assemble_graph(
    graph: &mut DeBruijnGraph,
    config: &AssemblyConfig,
) -> (Vec<Contig>, AssemblyReport) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let limits = &config.limits;
    let mut report = AssemblyReport {
        nodes_built: graph.node_count(),
        edges_built: graph.edge_count(),
        ..AssemblyReport::default()
    };

    let topology = summary(graph);
    info!(
        "Graph has {} nodes ({} sources, {} sinks) and {} edges",
        graph.node_count(),
        topology.sources,
        topology.sinks,
        graph.edge_count()
    );

    report.bubbles_resolved = simplify_bubbles(graph, limits, &mut rng);

    let entries = sources(graph);
    match solve_entry_tips(graph, &entries, limits, &mut rng) {
        Ok(kept) => report.entry_tips_resolved = kept.is_some(),
        Err(err) => warn!("Leaving {} entry tips unresolved: {}", entries.len(), err),
    }

    let exits = sinks(graph);
    match solve_out_tips(graph, &exits, limits, &mut rng) {
        Ok(kept) => report.out_tips_resolved = kept.is_some(),
        Err(err) => warn!("Leaving {} exit tips unresolved: {}", exits.len(), err),
    }

    report.nodes_remaining = graph.node_count();
    report.edges_remaining = graph.edge_count();
    info!(
        "Simplified graph has {} nodes and {} edges",
        report.nodes_remaining, report.edges_remaining
    );

    let mut found = contigs(graph, &sources(graph), &sinks(graph));
    if config.min_contig_len > 0 {
        found.retain(|c| c.length >= config.min_contig_len);
        for (id, contig) in found.iter_mut().enumerate() {
            contig.id = id;
        }
    }
    report.contigs = found.len();
    info!("Extracted {} contigs", found.len());

    (found, report)
}

/// Build the graph from a k-mer table and assemble it
pub fn assemble_kmers(
    table: &KmerTable,
    config: &AssemblyConfig,
) -> Result<(Vec<Contig>, AssemblyReport)> {
    let mut graph = DeBruijnGraph::from_kmer_counts(config.k, table)?;
    Ok(assemble_graph(&mut graph, config))
}

/// FASTQ in, FASTA out; optionally writes contig statistics as JSON
pub fn assemble_reads(
    input: &Path,
    output: &Path,
    stats_json: Option<&Path>,
    config: &AssemblyConfig,
) -> Result<AssemblyReport> {
    info!("Starting assembly from: {}", input.display());

    let reads = read_sequences(input)?;
    info!("Read {} sequences", reads.len());

    let table = count_kmers(&reads, config.k)?;
    info!("Counted {} distinct {}-mers", table.len(), config.k);

    let (contigs, report) = assemble_kmers(&table, config)?;

    let mut writer = FastaWriter::create(output)?;
    writer.write_contigs(&contigs)?;
    writer.finish()?;
    info!("Wrote {} contigs to {}", contigs.len(), output.display());

    if let Some(path) = stats_json {
        let stats = ContigStats::from_contigs(&contigs);
        let json = serde_json::to_string_pretty(&stats).map_err(std::io::Error::from)?;
        fs::write(path, json)?;
        info!("Wrote contig statistics to {}", path.display());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u32)]) -> KmerTable {
        entries.iter().map(|&(k, c)| (k.to_string(), c)).collect()
    }

    #[test]
    fn test_assemble_kmers_linear() {
        let read = "ATGGCGTACGATTC";
        let config = AssemblyConfig {
            k: 5,
            ..AssemblyConfig::default()
        };
        let counts = count_kmers(&[read], config.k).unwrap();

        let (contigs, report) = assemble_kmers(&counts, &config).unwrap();

        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].sequence, read);
        assert_eq!(contigs[0].length, read.len());
        assert_eq!(report.bubbles_resolved, 0);
        assert!(!report.entry_tips_resolved);
    }

    #[test]
    fn test_min_contig_len_filters() {
        let config = AssemblyConfig {
            k: 3,
            min_contig_len: 5,
            ..AssemblyConfig::default()
        };
        // Two disjoint fragments: ACGT (4 bp) and TTGGAA (6 bp)
        let counts = table(&[
            ("ACG", 1),
            ("CGT", 1),
            ("TTG", 1),
            ("TGG", 1),
            ("GGA", 1),
            ("GAA", 1),
        ]);

        let (contigs, report) = assemble_kmers(&counts, &config).unwrap();

        assert_eq!(report.contigs, 1);
        assert_eq!(contigs[0].sequence, "TTGGAA");
        assert_eq!(contigs[0].id, 0);
    }

    #[test]
    fn test_report_display() {
        let report = AssemblyReport {
            nodes_built: 10,
            edges_built: 9,
            contigs: 1,
            ..AssemblyReport::default()
        };
        let text = report.to_string();
        assert!(text.contains("Graph built: 10 nodes, 9 edges"));
        assert!(text.ends_with("Contigs: 1"));
    }
}
