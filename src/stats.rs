use std::io::{BufRead, Result};
use std::path::Path;

use serde::Serialize;

use crate::graph::contig::Contig;
use crate::io::fasta::open_fasta;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContigStats {
    pub total_contigs: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub n50: usize,
    pub longest: usize,
}

impl ContigStats {
    pub fn from_lengths(mut lengths: Vec<usize>) -> Self {
        lengths.sort_unstable();
        let total: usize = lengths.iter().sum();
        let total_contigs = lengths.len();
        let average_length = if total_contigs > 0 {
            total as f64 / total_contigs as f64
        } else {
            0.0
        };

        // Calculate N50
        let mut acc = 0;
        let n50 = lengths
            .iter()
            .rev()
            .find(|&&len| {
                acc += len;
                acc * 2 >= total
            })
            .copied()
            .unwrap_or(0);

        ContigStats {
            total_contigs,
            total_length: total,
            average_length,
            n50,
            longest: lengths.last().copied().unwrap_or(0),
        }
    }

    pub fn from_contigs(contigs: &[Contig]) -> Self {
        Self::from_lengths(contigs.iter().map(|c| c.length).collect())
    }
}

impl std::fmt::Display for ContigStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Contigs: {}", self.total_contigs)?;
        writeln!(f, "Total length: {}", self.total_length)?;
        writeln!(f, "Average length: {:.1}", self.average_length)?;
        writeln!(f, "N50: {}", self.n50)?;
        write!(f, "Longest: {}", self.longest)
    }
}

/// Contig statistics of a (possibly line-wrapped) FASTA file
pub fn calculate_stats<P: AsRef<Path>>(path: P) -> Result<ContigStats> {
    let reader = open_fasta(path)?;
    let mut lengths = vec![];
    let mut current: Option<usize> = None;

    for line in reader.lines() {
        let line = line?;
        if line.starts_with('>') {
            if let Some(len) = current.take() {
                lengths.push(len);
            }
            current = Some(0);
        } else if let Some(len) = current.as_mut() {
            *len += line.trim().len();
        }
    }
    if let Some(len) = current {
        lengths.push(len);
    }

    Ok(ContigStats::from_lengths(lengths))
}
