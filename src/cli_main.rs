use std::path::PathBuf;

use clap::{Parser, Subcommand};

use debruijn::config::DEFAULT_SEED;

#[derive(Parser, Debug)]
#[command(name = "debruijn", version, about = "De Bruijn graph short-read assembler", long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble FASTQ reads into contigs
    Assemble {
        /// Input FASTQ(.gz) file
        #[arg(short, long)]
        input: PathBuf,

        /// K-mer size
        #[arg(short, long, default_value_t = 21)]
        kmer_size: usize,

        /// Output FASTA(.gz) file
        #[arg(short, long, default_value = "contigs.fasta")]
        output: PathBuf,

        /// Seed for breaking ties between equally good paths
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Minimum contig length to report
        #[arg(long, default_value_t = 0)]
        min_len: usize,

        /// Give up on a bubble with more candidate paths than this
        #[arg(long, default_value_t = 4096)]
        max_bubble_paths: usize,

        /// Maximum hops searched for the point where tips meet
        #[arg(long, default_value_t = 64)]
        max_tip_hops: usize,

        /// Number of threads used for k-mer counting
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Write contig statistics as JSON to this file
        #[arg(long)]
        stats_json: Option<PathBuf>,
    },

    /// Count k-mers and print them as a TSV table
    Kmers {
        /// Input FASTQ(.gz) file
        #[arg(short, long)]
        input: PathBuf,

        /// K-mer size
        #[arg(short, long, default_value_t = 21)]
        kmer_size: usize,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summary statistics of a contig FASTA file
    Stats {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: PathBuf,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}
