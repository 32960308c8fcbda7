// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Particles in a unit square: bulk build, query, drift, and refresh.
//!
//! Run with `RUST_LOG=understory_quadtree=debug` to see the tree's own logging.

use kurbo::Point;
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_quadtree::{QuadTree, QuadTreeConfig, Square};

#[derive(Clone, Debug)]
struct Particle {
    id: u32,
    pos: Point,
}

/// Deterministic low-discrepancy coordinates, good enough for a demo.
fn scatter(i: u32) -> Point {
    let x = (f64::from(i) * 0.618_033_988_749_895).fract();
    let y = (f64::from(i) * 0.754_877_666_246_693).fract();
    Point::new(x, y)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let particles: Vec<Particle> = (0..50_000).map(|id| Particle { id, pos: scatter(id) }).collect();
    let config = QuadTreeConfig::new().with_threshold(10);
    let (mut tree, rejected) = QuadTree::build_with_config(
        particles,
        Square::new(Point::new(0.5, 0.5), 0.5),
        |p: &Particle| p.pos,
        config,
    )
    .expect("unit square is a valid domain");
    info!(
        count = tree.count(),
        rejected = rejected.len(),
        nodes = tree.node_count(),
        depth = tree.depth(),
        "built"
    );

    let probe = Point::new(0.3, 0.7);
    if let Some(cell) = tree.query_point(probe) {
        info!(bounds = ?cell.bounds().to_rect(), elements = cell.elements().len(), "cell around probe");
    }
    let near = tree.query(&Square::new(probe, 0.05));
    info!(hits = near.len(), "box query around probe");

    // Drift every tenth particle and let the tree repair itself.
    tree.for_each_mut(|p| {
        if p.id % 10 == 0 {
            p.pos = Point::new((p.pos.x + 0.003).min(1.0), (p.pos.y - 0.002).max(0.0));
        }
    });
    let mut outs = Vec::new();
    let stale = tree.check(&mut outs);
    info!(stale, "particles left their cells");
    let lost = tree.insert(outs);
    info!(count = tree.count(), lost = lost.len(), "reinserted");
}
