//! Read input and contig output

pub mod fasta;
pub mod fastq;
