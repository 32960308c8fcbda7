// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_quadtree::{Identity, QuadTree, QuadTreeConfig, Square};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize) -> Vec<Point> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Point::new(
                (x as f64 + 0.5) / n as f64,
                (y as f64 + 0.5) / n as f64,
            ));
        }
    }
    out
}

fn to_rstar_points(v: &[Point]) -> Vec<[f64; 2]> {
    v.iter().map(|p| [p.x, p.y]).collect()
}

fn bench_rstar_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare");
    let domain = Square::new(Point::new(0.5, 0.5), 0.5);
    let region = Square::new(Point::new(0.3, 0.3), 0.1);
    for &n in &[128usize, 256] {
        let points = gen_grid_points(n);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let config = QuadTreeConfig::new().with_threshold(16);
                    let (tree, _) =
                        QuadTree::build_with_config(pts, domain, Identity, config).unwrap();
                    black_box(tree.query(&region).len());
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let env = AABB::from_corners(
                        [region.left(), region.top()],
                        [region.right(), region.bottom()],
                    );
                    black_box(tree.locate_in_envelope(&env).count());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare);
criterion_main!(benches);
