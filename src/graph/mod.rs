//! Graph module - de Bruijn graph construction, simplification and contig extraction

pub mod bubble;
pub mod contig;
pub mod debruijn;
pub mod path;
pub mod tips;
pub mod topology;

pub use contig::Contig;
pub use debruijn::{DeBruijnGraph, Path};
