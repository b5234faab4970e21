/// Seed used for the tie-breaking random draw unless overridden
pub const DEFAULT_SEED: u64 = 9001;

/// Bounds on the path searches run during simplification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of completed plus in-flight paths in one bubble enumeration
    pub max_paths: usize,
    /// Maximum hops walked from the tips when looking for a convergence node
    pub max_hops: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_paths: 4096,
            max_hops: 64,
        }
    }
}

/// Configuration for one assembly run
#[derive(Clone, Debug)]
pub struct AssemblyConfig {
    /// K-mer size; graph nodes have length k - 1
    pub k: usize,
    /// Seed for the tie-breaking random draw
    pub seed: u64,
    /// Minimum contig length to report (0 keeps everything)
    pub min_contig_len: usize,
    pub limits: SearchLimits,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            k: 21,
            seed: DEFAULT_SEED,
            min_contig_len: 0,
            limits: SearchLimits::default(),
        }
    }
}
