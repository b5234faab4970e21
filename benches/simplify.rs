use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use debruijn::graph::bubble::simplify_bubbles;
use debruijn::graph::DeBruijnGraph;
use debruijn::kmer::counter::count_kmers;
use debruijn::pipeline::assemble::assemble_graph;
use debruijn::{AssemblyConfig, SearchLimits};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const K: usize = 21;
const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Tile a random genome with overlapping reads, one substitution every `error_every` reads
fn generate_reads(genome_len: usize, read_len: usize, error_every: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(1234);
    let genome: Vec<char> = (0..genome_len).map(|_| BASES[rng.gen_range(0..4)]).collect();

    let mut reads = Vec::new();
    for (n, start) in (0..=genome_len - read_len).step_by(read_len / 10).enumerate() {
        let mut read: Vec<char> = genome[start..start + read_len].to_vec();
        if n % error_every == 0 {
            let pos = rng.gen_range(K..read_len - K);
            read[pos] = BASES[(BASES.iter().position(|&b| b == read[pos]).unwrap_or(0) + 1) % 4];
        }
        reads.push(read.into_iter().collect());
    }
    reads
}

fn build_graph(reads: &[String]) -> DeBruijnGraph {
    let table = count_kmers(reads, K).unwrap();
    DeBruijnGraph::from_kmer_counts(K, &table).unwrap()
}

fn bench_kmer_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmer_counting");

    for genome_len in [2_000, 20_000] {
        let reads = generate_reads(genome_len, 150, 7);
        let total_bases: usize = reads.iter().map(|r| r.len()).sum();
        group.throughput(Throughput::Bytes(total_bases as u64));

        group.bench_with_input(BenchmarkId::from_parameter(genome_len), &reads, |b, reads| {
            b.iter(|| black_box(count_kmers(reads, K).unwrap()))
        });
    }

    group.finish();
}

fn bench_bubbles(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify_bubbles");
    group.sample_size(20);

    for genome_len in [500, 1_500] {
        let graph = build_graph(&generate_reads(genome_len, 150, 7));

        group.bench_with_input(BenchmarkId::from_parameter(genome_len), &graph, |b, graph| {
            b.iter_batched(
                || graph.clone(),
                |mut graph| {
                    let mut rng = StdRng::seed_from_u64(9001);
                    black_box(simplify_bubbles(&mut graph, &SearchLimits::default(), &mut rng))
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let graph = build_graph(&generate_reads(1_000, 150, 5));
    let config = AssemblyConfig {
        k: K,
        ..AssemblyConfig::default()
    };

    c.bench_function("assemble_graph", |b| {
        b.iter_batched(
            || graph.clone(),
            |mut graph| black_box(assemble_graph(&mut graph, &config)),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_kmer_counting, bench_bubbles, bench_assemble);
criterion_main!(benches);
