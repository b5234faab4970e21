//! De Bruijn graph assembly of short reads.
//!
//! Reads are cut into k-mers, the k-mers are chained into a weighted graph of
//! (k-1)-mers, bubbles and tips left by sequencing errors are removed, and the
//! remaining source-to-sink paths are spelled out as contigs.

pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod stats;

pub use config::{AssemblyConfig, SearchLimits};
pub use error::{AssemblyError, Result};
