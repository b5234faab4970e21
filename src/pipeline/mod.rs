//! Pipeline module - end-to-end assembly

pub mod assemble;

pub use assemble::{assemble_graph, assemble_kmers, assemble_reads, AssemblyReport};
