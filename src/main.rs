mod cli_main;

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use cli_main::{Cli, Commands};
use debruijn::config::{AssemblyConfig, SearchLimits};
use debruijn::io::fastq::read_sequences;
use debruijn::kmer::counter::{count_kmers, write_kmer_table};
use debruijn::pipeline::assemble::assemble_reads;
use debruijn::stats::calculate_stats;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Setting tracing default failed")?;

    match cli.command {
        Commands::Assemble {
            input,
            kmer_size,
            output,
            seed,
            min_len,
            max_bubble_paths,
            max_tip_hops,
            threads,
            stats_json,
        } => {
            ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .context("Failed to configure the thread pool")?;

            let config = AssemblyConfig {
                k: kmer_size,
                seed,
                min_contig_len: min_len,
                limits: SearchLimits {
                    max_paths: max_bubble_paths,
                    max_hops: max_tip_hops,
                },
            };

            let start = std::time::Instant::now();
            let report = assemble_reads(&input, &output, stats_json.as_deref(), &config)
                .with_context(|| format!("Assembly of {} failed", input.display()))?;

            info!("\n{}", report);
            info!("Assembly completed in {:.2}s", start.elapsed().as_secs_f32());
        }

        Commands::Kmers {
            input,
            kmer_size,
            output,
        } => {
            let reads = read_sequences(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let table = count_kmers(&reads, kmer_size)?;
            info!("Counted {} distinct {}-mers", table.len(), kmer_size);

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    write_kmer_table(&table, BufWriter::new(file))?;
                }
                None => write_kmer_table(&table, io::stdout().lock())?,
            }
        }

        Commands::Stats { input, json } => {
            let stats = calculate_stats(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", stats);
            }
        }
    }

    Ok(())
}
