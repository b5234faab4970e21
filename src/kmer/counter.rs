use std::collections::BTreeMap;
use std::io::{self, Write};

use ahash::AHashMap;
use rayon::prelude::*;

use crate::error::{AssemblyError, Result};

/// K-mer count table, ordered so that graph construction is reproducible
pub type KmerTable = BTreeMap<String, u32>;

/// Every length-`k` window of `read`, left to right.
///
/// Windows are cut by byte, so a read that is not ASCII yields none.
pub fn cut_kmers(read: &str, k: usize) -> impl Iterator<Item = &str> {
    let windows = if k == 0 || read.len() < k || !read.is_ascii() {
        0
    } else {
        read.len() - k + 1
    };
    (0..windows).map(move |i| &read[i..i + k])
}

/// Count k-mer occurrences across all reads.
///
/// Reads are counted in parallel and merged into an ordered table. Reads are
/// expected to be validated ASCII nucleotide strings.
pub fn count_kmers<S>(reads: &[S], k: usize) -> Result<KmerTable>
where
    S: AsRef<str> + Sync,
{
    if k < 2 {
        return Err(AssemblyError::InvalidKmerSize(k));
    }

    let counts = reads
        .par_iter()
        .fold(AHashMap::<&str, u32>::new, |mut local, read| {
            for kmer in cut_kmers(read.as_ref(), k) {
                *local.entry(kmer).or_insert(0) += 1;
            }
            local
        })
        .reduce(AHashMap::new, |mut merged, local| {
            for (kmer, count) in local {
                *merged.entry(kmer).or_insert(0) += count;
            }
            merged
        });

    Ok(counts
        .into_iter()
        .map(|(kmer, count)| (kmer.to_string(), count))
        .collect())
}

/// Write the table as `kmer\tcount` lines
pub fn write_kmer_table<W: Write>(table: &KmerTable, mut writer: W) -> io::Result<()> {
    writeln!(writer, "kmer\tcount")?;
    for (kmer, count) in table {
        writeln!(writer, "{}\t{}", kmer, count)?;
    }
    writer.flush()
}
