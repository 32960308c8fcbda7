// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API over the recursive node structure.

use core::fmt::Debug;

use kurbo::Point;
use tracing::{debug, warn};

use crate::config::QuadTreeConfig;
use crate::error::{QuadTreeError, Result};
use crate::locate::Locate;
use crate::node::{Context, Node};
use crate::types::{Cell, Square};

/// Elements rejected because their location is outside the tree's domain.
///
/// Returned by [`QuadTree::build`], [`QuadTree::insert`] and
/// [`QuadTree::refresh`]; nothing is dropped silently.
#[must_use = "rejected elements are handed back to the caller"]
#[derive(Clone, Debug, PartialEq)]
pub struct OutOfDomain<T>(Vec<T>);

impl<T> Default for OutOfDomain<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> OutOfDomain<T> {
    /// Number of rejected elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if every element was accepted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the rejected elements.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Take ownership of the rejected elements.
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> IntoIterator for OutOfDomain<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A point quadtree over elements of type `T`, located by `L`.
///
/// Leaves split into four quadrants once they hold more than
/// [`QuadTreeConfig::threshold`] elements. Elements may move after insertion;
/// [`QuadTree::check`] finds the ones that left their cell and prunes subtrees
/// that became empty.
pub struct QuadTree<T, L> {
    root: Box<Node<T>>,
    locate: L,
    config: QuadTreeConfig,
}

impl<T, L> QuadTree<T, L>
where
    T: Send,
    L: Locate<T> + Sync,
{
    /// Create an empty tree over the square at `center` with half side `half_dim`.
    pub fn empty(center: Point, half_dim: f64, locate: L, threshold: usize) -> Result<Self> {
        Self::with_config(
            Square::new(center, half_dim),
            locate,
            QuadTreeConfig::new().with_threshold(threshold),
        )
    }

    /// Create an empty tree over `bounds` with explicit configuration.
    pub fn with_config(bounds: Square, locate: L, config: QuadTreeConfig) -> Result<Self> {
        if bounds.is_degenerate() {
            return Err(QuadTreeError::InvalidGeometry {
                half_dim: bounds.half_dim,
            });
        }
        config.validate()?;
        Ok(Self {
            root: Box::new(Node::root(bounds)),
            locate,
            config,
        })
    }

    /// Bulk-build a tree from `elements`.
    ///
    /// Elements located outside the domain are returned instead of stored.
    pub fn build<I>(
        elements: I,
        center: Point,
        half_dim: f64,
        locate: L,
        threshold: usize,
    ) -> Result<(Self, OutOfDomain<T>)>
    where
        I: IntoIterator<Item = T>,
    {
        Self::build_with_config(
            elements,
            Square::new(center, half_dim),
            locate,
            QuadTreeConfig::new().with_threshold(threshold),
        )
    }

    /// Bulk-build a tree over `bounds` with explicit configuration.
    pub fn build_with_config<I>(
        elements: I,
        bounds: Square,
        locate: L,
        config: QuadTreeConfig,
    ) -> Result<(Self, OutOfDomain<T>)>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::with_config(bounds, locate, config)?;
        let (inside, rejected) = tree.admit(elements);
        let accepted = inside.len();
        let cx = Context {
            locate: &tree.locate,
            config: &tree.config,
        };
        tree.root = Box::new(Node::build(inside, Cell::root(bounds), 0, cx));
        debug!(
            accepted,
            rejected = rejected.len(),
            nodes = tree.node_count(),
            "built quadtree"
        );
        Ok((tree, rejected))
    }

    /// Insert a batch of elements, splitting leaves as needed.
    ///
    /// Elements located outside the domain are returned instead of stored.
    pub fn insert<I>(&mut self, elements: I) -> OutOfDomain<T>
    where
        I: IntoIterator<Item = T>,
    {
        let (inside, rejected) = self.admit(elements);
        let accepted = inside.len();
        let cx = Context {
            locate: &self.locate,
            config: &self.config,
        };
        self.root.insert(inside, cx);
        debug!(accepted, rejected = rejected.len(), "inserted batch");
        rejected
    }

    /// Run [`check`](Self::check) and insert the stale elements again.
    ///
    /// Returns the elements that moved outside the domain altogether.
    pub fn refresh(&mut self) -> OutOfDomain<T> {
        let mut outs = Vec::new();
        self.check(&mut outs);
        self.insert(outs)
    }

    fn admit<I>(&self, elements: I) -> (Vec<T>, OutOfDomain<T>)
    where
        I: IntoIterator<Item = T>,
    {
        let root = &self.root;
        let (inside, outside): (Vec<T>, Vec<T>) = elements
            .into_iter()
            .partition(|e| root.covers(self.locate.locate(e)));
        if !outside.is_empty() {
            warn!(
                count = outside.len(),
                domain = ?root.bounds(),
                "rejecting elements outside the domain"
            );
        }
        (inside, OutOfDomain(outside))
    }
}

impl<T, L: Locate<T>> QuadTree<T, L> {
    /// Elements whose location lies inside `region`, edges included.
    ///
    /// Order is unspecified. A degenerate region yields nothing.
    pub fn query(&self, region: &Square) -> Vec<&T> {
        let mut out = Vec::new();
        if region.is_degenerate() {
            return out;
        }
        let locate = &self.locate;
        if self.root.overlaps(region) {
            self.root
                .collect(region, &|e: &T| region.contains(locate.locate(e)), &mut out);
        }
        out
    }

    /// Elements within Euclidean distance `radius` of `center`, inclusive.
    ///
    /// A radius of zero matches elements located exactly at `center`. A
    /// negative or non-finite radius yields nothing.
    pub fn query_radius(&self, center: Point, radius: f64) -> Vec<&T> {
        let mut out = Vec::new();
        let reach = Square::new(center, radius);
        let valid = radius.is_finite() && radius >= 0.0 && center.is_finite();
        if !valid || !self.root.overlaps(&reach) {
            return out;
        }
        let locate = &self.locate;
        let r2 = radius * radius;
        self.root.collect(
            &reach,
            &|e: &T| (locate.locate(e) - center).hypot2() <= r2,
            &mut out,
        );
        out
    }

    /// The smallest existing node whose region contains `p`.
    ///
    /// This is point location, not a membership test: the node may or may not
    /// store an element at `p`. Returns `None` for an empty tree or a point
    /// outside the domain.
    pub fn query_point(&self, p: Point) -> Option<&Node<T>> {
        if self.is_empty() || !self.root.covers(p) {
            return None;
        }
        Some(self.root.locate_node(p))
    }

    /// All stored elements, leaves visited in NE, NW, SE, SW order.
    pub fn get(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.root.get_into(&mut out);
        out
    }

    /// Visit every stored element mutably.
    ///
    /// Moving elements here leaves the tree stale until the next
    /// [`check`](Self::check) or [`refresh`](Self::refresh).
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        self.root.for_each_mut(&mut f);
    }

    /// Move elements that left their leaf's region into `outs`.
    ///
    /// Subtrees left without elements are removed. The caller decides where
    /// the stale elements go next, usually [`insert`](Self::insert). Returns the
    /// number of elements moved.
    pub fn check(&mut self, outs: &mut Vec<T>) -> usize {
        let before = outs.len();
        let emptied = self.root.check(&self.locate, outs);
        if emptied && !self.root.is_leaf() {
            self.root = Box::new(Node::root(self.root.bounds()));
        }
        let stale = outs.len() - before;
        debug!(stale, emptied, "checked quadtree");
        stale
    }

    /// Number of stored elements, recounted from the leaves.
    pub fn count(&self) -> usize {
        self.root.count()
    }

    /// True if no elements are stored.
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf() && self.root.elements().is_empty()
    }

    /// Drop every element, keeping the domain and configuration.
    pub fn clear(&mut self) {
        self.root = Box::new(Node::root(self.root.bounds()));
    }

    /// The root node, for read-only traversal.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// The domain square.
    pub fn bounds(&self) -> Square {
        self.root.bounds()
    }

    /// The configuration the tree was created with.
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// The locator used to place elements.
    pub fn locator(&self) -> &L {
        &self.locate
    }

    /// Depth of the deepest existing node.
    pub fn depth(&self) -> u32 {
        self.root.max_depth()
    }

    /// Number of nodes, leaves and internal nodes alike.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

impl<T, L> Debug for QuadTree<T, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.root.bounds())
            .field("config", &self.config)
            .field("elements", &self.root.count())
            .field("nodes", &self.root.node_count())
            .finish_non_exhaustive()
    }
}
