//! K-mer processing module - splitting reads and counting k-mers

pub mod counter;

pub use counter::{count_kmers, cut_kmers, KmerTable};
