// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_quadtree::{Identity, QuadTree, QuadTreeConfig, Square};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn domain() -> Square {
    Square::new(Point::new(0.5, 0.5), 0.5)
}

fn gen_uniform(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64(), rng.next_f64()))
        .collect()
}

fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = 0.1 + rng.next_f64() * 0.8;
        let cy = 0.1 + rng.next_f64() * 0.8;
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cy + dy));
        }
    }
    out
}

/// Nudge a point by up to `step` in each axis, staying in the unit square.
fn nudge(p: &mut Point, rng: &mut Rng, step: f64) {
    p.x = (p.x + (rng.next_f64() - 0.5) * 2.0 * step).clamp(0.0, 1.0);
    p.y = (p.y + (rng.next_f64() - 0.5) * 2.0 * step).clamp(0.0, 1.0);
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[10_000usize, 100_000] {
        let points = gen_uniform(n);
        group.throughput(Throughput::Elements(n as u64));
        for (label, cutoff) in [("seq", usize::MAX), ("par", 1024)] {
            let config = QuadTreeConfig::new()
                .with_threshold(10)
                .with_parallel_cutoff(cutoff);
            group.bench_function(format!("bulk_{label}_n{n}"), |b| {
                b.iter_batched(
                    || points.clone(),
                    |pts| {
                        let (tree, _) =
                            QuadTree::build_with_config(pts, domain(), Identity, config).unwrap();
                        black_box(tree.node_count());
                    },
                    BatchSize::LargeInput,
                )
            });
        }
        group.bench_function(format!("incremental_chunks_n{n}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let config = QuadTreeConfig::new().with_threshold(10);
                    let mut tree = QuadTree::with_config(domain(), Identity, config).unwrap();
                    for chunk in pts.chunks(256) {
                        let _ = tree.insert(chunk.iter().copied());
                    }
                    black_box(tree.count());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let config = QuadTreeConfig::new().with_threshold(10);
    for (label, points) in [
        ("uniform", gen_uniform(100_000)),
        ("clustered", gen_clustered(32, 3_000, 0.02)),
    ] {
        let probes: Vec<Point> = points.iter().step_by(97).copied().collect();
        let (tree, _) =
            QuadTree::build_with_config(points, domain(), Identity, config).unwrap();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("rect_{label}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for p in &probes {
                    hits += tree.query(&Square::new(*p, 0.01)).len();
                }
                black_box(hits);
            })
        });
        group.bench_function(format!("radius_{label}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for p in &probes {
                    hits += tree.query_radius(*p, 0.01).len();
                }
                black_box(hits);
            })
        });
        group.bench_function(format!("point_{label}"), |b| {
            b.iter(|| {
                let mut depth = 0_u64;
                for p in &probes {
                    if let Some(node) = tree.query_point(*p) {
                        depth += u64::from(node.depth());
                    }
                }
                black_box(depth);
            })
        });
    }
    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");
    let n = 100_000;
    let points = gen_uniform(n);
    let config = QuadTreeConfig::new().with_threshold(10);
    group.throughput(Throughput::Elements(n as u64));

    group.bench_function("check_untouched", |b| {
        b.iter_batched(
            || {
                QuadTree::build_with_config(points.clone(), domain(), Identity, config)
                    .unwrap()
                    .0
            },
            |mut tree| {
                let mut outs = Vec::new();
                black_box(tree.check(&mut outs));
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("drift_refresh", |b| {
        b.iter_batched(
            || {
                QuadTree::build_with_config(points.clone(), domain(), Identity, config)
                    .unwrap()
                    .0
            },
            |mut tree| {
                // Move every tenth particle a little, as a simulation step would.
                let mut rng = Rng::new(0xBADC_F00D_1234_5678);
                let mut i = 0_usize;
                tree.for_each_mut(|p| {
                    if i % 10 == 0 {
                        nudge(p, &mut rng, 0.0001);
                    }
                    i += 1;
                });
                black_box(tree.refresh().len());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_check);
criterion_main!(benches);
