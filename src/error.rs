use thiserror::Error;

/// Result type for assembly operations
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Errors raised while building, simplifying or reading out the graph
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Average weight was requested for a path without any edge
    #[error("empty path: at least one edge is required to compute a weight")]
    EmptyPath,

    /// Best-path selection was given no candidates
    #[error("no candidate paths to select from")]
    NoCandidates,

    #[error("candidate lists differ in size: {paths} paths, {lengths} lengths, {weights} weights")]
    MismatchedCandidates {
        paths: usize,
        lengths: usize,
        weights: usize,
    },

    /// Backward path search came back to a node already on the branch
    #[error("cycle through node {node} while enumerating paths")]
    CyclicPath { node: String },

    #[error("path enumeration exceeded the ceiling of {limit} paths")]
    PathLimitExceeded { limit: usize },

    /// No node is reachable from every tip within the hop bound
    #[error("no common node for {tips} tips within {hops} hops")]
    NoConvergence { tips: usize, hops: usize },

    #[error("k-mer size must be at least 2, got {0}")]
    InvalidKmerSize(usize),

    #[error("k-mer '{kmer}' does not have length {k}")]
    InvalidKmer { kmer: String, k: usize },

    #[error("malformed FASTQ record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("invalid base '{base}' in read at line {line}")]
    InvalidBase { line: usize, base: char },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
