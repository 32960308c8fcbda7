// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a point quadtree for moving 2D elements.
//!
//! Understory Quadtree indexes elements that can be located by a single point,
//! such as particles, agents, or markers, and answers spatial queries over them.
//!
//! - Bulk-build from a batch, or grow incrementally with [`QuadTree::insert`].
//! - Query by square region, by radius, or locate the smallest cell around a point.
//! - Repair the index after elements move: [`QuadTree::check`] hands back elements
//!   that left their cell and prunes subtrees that became empty.
//!
//! The tree is generic over the element type and a [`Locate`] capability that maps
//! an element to its [`kurbo::Point`]. Any `Fn(&T) -> Point` closure works; use
//! [`Identity`] when storing points directly.
//!
//! Leaves split into four quadrants (NE, NW, SE, SW) once they hold more than
//! [`QuadTreeConfig::threshold`] elements. The y axis grows downward, so "north"
//! means smaller y. Points on a center line belong to the west and/or north side,
//! which makes the split a total, non-overlapping partition.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_quadtree::{Identity, QuadTree, Square};
//!
//! let points = [
//!     Point::new(0.1, 0.1),
//!     Point::new(0.9, 0.1),
//!     Point::new(0.1, 0.9),
//!     Point::new(0.9, 0.9),
//! ];
//! let (tree, rejected) = QuadTree::build(points, Point::new(0.5, 0.5), 0.5, Identity, 3).unwrap();
//! assert!(rejected.is_empty());
//!
//! let hits = tree.query(&Square::new(Point::new(0.1, 0.1), 0.05));
//! assert_eq!(hits, vec![&Point::new(0.1, 0.1)]);
//! assert_eq!(tree.count(), 4);
//! ```
//!
//! ## Moving elements
//!
//! Elements may change location after insertion, through
//! [`QuadTree::for_each_mut`] or interior mutability. Call [`QuadTree::check`] to
//! collect the ones that left their cell, then insert them again
//! ([`QuadTree::refresh`] does both):
//!
//! ```rust
//! use kurbo::Point;
//! use understory_quadtree::{QuadTree, Square};
//!
//! #[derive(Debug)]
//! struct Particle {
//!     id: u32,
//!     pos: Point,
//! }
//!
//! let mut tree = QuadTree::empty(Point::new(0.5, 0.5), 0.5, |p: &Particle| p.pos, 2).unwrap();
//! let _ = tree.insert((0..8).map(|id| Particle {
//!     id,
//!     pos: Point::new(0.1 * f64::from(id) + 0.05, 0.25),
//! }));
//!
//! tree.for_each_mut(|p| {
//!     if p.id == 0 {
//!         p.pos = Point::new(0.9, 0.9);
//!     }
//! });
//!
//! let mut outs = Vec::new();
//! assert_eq!(tree.check(&mut outs), 1);
//! assert_eq!(outs[0].id, 0);
//! assert!(tree.insert(outs).is_empty());
//!
//! let hits = tree.query(&Square::new(Point::new(0.9, 0.9), 0.01));
//! assert_eq!(hits[0].id, 0);
//! ```
//!
//! ## Concurrency
//!
//! With the default `parallel` feature, bulk builds and large inserts fork one task
//! per quadrant on rayon's pool and join them before returning. Batches smaller
//! than [`QuadTreeConfig::parallel_cutoff`] stay on the calling thread. The result
//! does not depend on which path ran.
//!
//! Mutation takes `&mut self`, so readers are excluded statically. To share a tree
//! between threads, wrap it in a [`SharedQuadTree`], which guards it with a
//! reader-writer lock.
//!
//! ## Depth
//!
//! Many elements at the same coordinates would otherwise split forever. Leaves at
//! [`QuadTreeConfig::max_depth`] stop splitting and keep any number of elements.
//!
//! ### Float semantics
//!
//! Elements whose location is NaN or outside the domain are never stored; they are
//! handed back as [`OutOfDomain`].

mod config;
mod error;
mod fork;
mod locate;
mod node;
mod shared;
mod tree;
pub mod types;

pub use config::QuadTreeConfig;
pub use error::{QuadTreeError, Result};
pub use locate::{Identity, Locate};
pub use node::Node;
pub use shared::SharedQuadTree;
pub use tree::{OutOfDomain, QuadTree};
pub use types::{Quadrant, Square};
