use casenet_analytics::community::detect_communities;
use casenet_analytics::graph::GraphModel;
use casenet_analytics::metrics::betweenness::betweenness_centrality;
use casenet_analytics::paths::enumerate_simple_paths;
use casenet_analytics::CancelToken;
use casenet_core::config::{CommunityConfig, PathConfig};
use casenet_core::Snapshot;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Case-sized networks: clusters of `cluster` people, ring-linked inside and
/// bridged to the next cluster.
const TIERS: [(&str, usize, usize); 3] = [("small", 6, 8), ("medium", 10, 20), ("large", 12, 60)];

fn clustered_snapshot(clusters: usize, cluster: usize) -> Snapshot {
    let ids: Vec<String> = (0..clusters * cluster).map(|i| format!("e{i:05}")).collect();
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for c in 0..clusters {
        let base = c * cluster;
        for i in 0..cluster {
            pairs.push((base + i, base + (i + 1) % cluster));
            pairs.push((base + i, base + (i + 3) % cluster));
        }
        if c + 1 < clusters {
            pairs.push((base, base + cluster));
        }
    }

    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let pair_refs: Vec<(&str, &str)> = pairs.iter().map(|&(a, b)| (id_refs[a], id_refs[b])).collect();
    Snapshot::from_pairs(&id_refs, &pair_refs).unwrap_or_else(|e| panic!("bench snapshot: {e}"))
}

fn bench_analytics(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics.tiered");
    group.sample_size(20);

    for (name, cluster, clusters) in TIERS {
        let model = GraphModel::from_snapshot(&clustered_snapshot(clusters, cluster));
        let token = CancelToken::new();
        group.throughput(Throughput::Elements(model.node_count() as u64));

        group.bench_with_input(BenchmarkId::new("betweenness", name), &model, |b, m| {
            b.iter(|| black_box(betweenness_centrality(m, &token)))
        });

        group.bench_with_input(BenchmarkId::new("communities", name), &model, |b, m| {
            b.iter(|| black_box(detect_communities(m, &CommunityConfig::default(), &token)))
        });

        group.bench_with_input(BenchmarkId::new("paths", name), &model, |b, m| {
            let last = m.node_count() - 1;
            b.iter(|| {
                black_box(enumerate_simple_paths(
                    &m.adjacency,
                    0,
                    last,
                    &PathConfig::default(),
                    &token,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analytics);
criterion_main!(benches);
