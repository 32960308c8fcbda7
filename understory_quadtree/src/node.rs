// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive quadtree nodes: bulk build, incremental insert, queries, and
//! stale-entry collapse.

use core::fmt::Debug;

use kurbo::{Point, Rect};
use tracing::trace;

use crate::config::QuadTreeConfig;
use crate::fork::join4;
use crate::locate::Locate;
use crate::types::{Cell, Quadrant, Square};

type Children<T> = [Option<Box<Node<T>>>; 4];

enum Kind<T> {
    Leaf(Vec<T>),
    Internal(Children<T>),
}

/// A region of the tree: either a leaf holding elements or an internal node
/// with up to four children.
///
/// Nodes are handed out read-only by [`QuadTree::root`](crate::QuadTree::root)
/// and [`QuadTree::query_point`](crate::QuadTree::query_point) for drawing and
/// debugging.
pub struct Node<T> {
    cell: Cell,
    depth: u32,
    kind: Kind<T>,
}

/// Borrowed state every recursive call needs.
pub(crate) struct Context<'a, L> {
    pub(crate) locate: &'a L,
    pub(crate) config: &'a QuadTreeConfig,
}

impl<L> Clone for Context<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for Context<'_, L> {}

/// Route every item into the bucket of its quadrant relative to `center`.
///
/// Each item is placed by the total function [`Quadrant::of`], so the buckets
/// always account for every input item exactly once.
fn partition<T, L: Locate<T>>(items: Vec<T>, center: Point, locate: &L) -> [Vec<T>; 4] {
    let mut buckets: [Vec<T>; 4] = Default::default();
    for item in items {
        let q = Quadrant::of(center, locate.locate(&item));
        buckets[q.index()].push(item);
    }
    buckets
}

fn tag<X>(xs: [X; 4]) -> [(Quadrant, X); 4] {
    let [ne, nw, se, sw] = xs;
    [
        (Quadrant::NorthEast, ne),
        (Quadrant::NorthWest, nw),
        (Quadrant::SouthEast, se),
        (Quadrant::SouthWest, sw),
    ]
}

impl<T> Node<T> {
    pub(crate) fn empty(cell: Cell, depth: u32) -> Self {
        Self {
            cell,
            depth,
            kind: Kind::Leaf(Vec::new()),
        }
    }

    /// An empty root leaf over `bounds`.
    pub(crate) fn root(bounds: Square) -> Self {
        Self::empty(Cell::root(bounds), 0)
    }

    /// The square this node covers.
    pub fn bounds(&self) -> Square {
        self.cell.square
    }

    /// The exact region this node covers.
    ///
    /// Edges shared with siblings are the parent's center coordinates, so this
    /// can differ from [`bounds`](Self::bounds) by rounding.
    pub fn region(&self) -> Rect {
        self.cell.edges
    }

    /// Whether `p` lies in this node's region, edges included.
    ///
    /// Every element was inside its leaf's region when it was stored;
    /// [`QuadTree::check`](crate::QuadTree::check) hands back those that no
    /// longer are.
    pub fn covers(&self, p: Point) -> bool {
        self.cell.contains(p)
    }

    pub(crate) fn overlaps(&self, region: &Square) -> bool {
        self.cell.overlaps(region)
    }

    /// Distance from the root; the root is 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether this node stores elements directly.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, Kind::Leaf(_))
    }

    /// Elements stored in this node. Always empty for internal nodes.
    pub fn elements(&self) -> &[T] {
        match &self.kind {
            Kind::Leaf(items) => items,
            Kind::Internal(_) => &[],
        }
    }

    /// The child covering quadrant `q`, if one exists.
    pub fn child(&self, q: Quadrant) -> Option<&Self> {
        match &self.kind {
            Kind::Leaf(_) => None,
            Kind::Internal(children) => children[q.index()].as_deref(),
        }
    }

    /// Existing children in NE, NW, SE, SW order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, &Self)> + '_ {
        Quadrant::ALL
            .into_iter()
            .filter_map(move |q| self.child(q).map(|c| (q, c)))
    }

    /// Build a subtree over `items`, which must all lie inside `cell`.
    pub(crate) fn build<L>(items: Vec<T>, cell: Cell, depth: u32, cx: Context<'_, L>) -> Self
    where
        T: Send,
        L: Locate<T> + Sync,
    {
        if items.len() <= cx.config.threshold || depth >= cx.config.max_depth {
            return Self {
                cell,
                depth,
                kind: Kind::Leaf(items),
            };
        }

        let total = items.len();
        let buckets = partition(items, cell.square.center, cx.locate);
        debug_assert_eq!(
            buckets.iter().map(Vec::len).sum::<usize>(),
            total,
            "quadrant buckets must account for every item"
        );

        let parallel = total >= cx.config.parallel_cutoff;
        let children = join4(tag(buckets), parallel, |(q, bucket)| {
            (!bucket.is_empty())
                .then(|| Box::new(Self::build(bucket, cell.quadrant(q), depth + 1, cx)))
        });
        Self {
            cell,
            depth,
            kind: Kind::Internal(children),
        }
    }

    /// Add `items`, which must all lie inside this node's region.
    ///
    /// A leaf that would exceed the threshold turns into an internal node once
    /// and pushes its contents down together with the new batch.
    pub(crate) fn insert<L>(&mut self, mut items: Vec<T>, cx: Context<'_, L>)
    where
        T: Send,
        L: Locate<T> + Sync,
    {
        if items.is_empty() {
            return;
        }
        let cell = self.cell;
        let depth = self.depth;

        let kind = core::mem::replace(&mut self.kind, Kind::Internal(Default::default()));
        let mut children = match kind {
            Kind::Leaf(mut stored) => {
                if stored.len() + items.len() <= cx.config.threshold
                    || depth >= cx.config.max_depth
                {
                    stored.append(&mut items);
                    self.kind = Kind::Leaf(stored);
                    return;
                }
                trace!(
                    depth,
                    stored = stored.len(),
                    incoming = items.len(),
                    "splitting leaf"
                );
                stored.append(&mut items);
                items = stored;
                Default::default()
            }
            Kind::Internal(children) => children,
        };

        let total = items.len();
        let [ne, nw, se, sw] = partition(items, cell.square.center, cx.locate);
        let [c_ne, c_nw, c_se, c_sw] = &mut children;
        let jobs = [
            (Quadrant::NorthEast, c_ne, ne),
            (Quadrant::NorthWest, c_nw, nw),
            (Quadrant::SouthEast, c_se, se),
            (Quadrant::SouthWest, c_sw, sw),
        ];
        join4(jobs, total >= cx.config.parallel_cutoff, |(q, slot, bucket)| {
            if bucket.is_empty() {
                return;
            }
            slot.get_or_insert_with(|| Box::new(Self::empty(cell.quadrant(q), depth + 1)))
                .insert(bucket, cx);
        });
        self.kind = Kind::Internal(children);
    }

    /// Collect elements accepted by `keep` from subtrees overlapping `region`.
    pub(crate) fn collect<'a, F>(&'a self, region: &Square, keep: &F, out: &mut Vec<&'a T>)
    where
        F: Fn(&T) -> bool,
    {
        match &self.kind {
            Kind::Leaf(items) => out.extend(items.iter().filter(|e| keep(e))),
            Kind::Internal(children) => {
                for child in children.iter().flatten() {
                    if child.cell.overlaps(region) {
                        child.collect(region, keep, out);
                    }
                }
            }
        }
    }

    /// Descend toward `p` and return the deepest existing node on the way.
    pub(crate) fn locate_node(&self, p: Point) -> &Self {
        let mut node = self;
        while let Kind::Internal(children) = &node.kind {
            match children[node.cell.square.quadrant_of(p).index()].as_deref() {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// Append every stored element, leaves visited in NE, NW, SE, SW order.
    pub(crate) fn get_into<'a>(&'a self, out: &mut Vec<&'a T>) {
        match &self.kind {
            Kind::Leaf(items) => out.extend(items.iter()),
            Kind::Internal(children) => {
                for child in children.iter().flatten() {
                    child.get_into(out);
                }
            }
        }
    }

    pub(crate) fn for_each_mut<F: FnMut(&mut T)>(&mut self, f: &mut F) {
        match &mut self.kind {
            Kind::Leaf(items) => items.iter_mut().for_each(f),
            Kind::Internal(children) => {
                for child in children.iter_mut().flatten() {
                    child.for_each_mut(f);
                }
            }
        }
    }

    /// Move elements that left their leaf into `outs` and drop emptied subtrees.
    ///
    /// Returns true if this node holds nothing afterwards; the caller is
    /// expected to drop it.
    pub(crate) fn check<L: Locate<T>>(&mut self, locate: &L, outs: &mut Vec<T>) -> bool {
        let cell = self.cell;
        let depth = self.depth;
        match &mut self.kind {
            Kind::Leaf(items) => {
                outs.extend(items.extract_if(.., |e| !cell.contains(locate.locate(e))));
                items.is_empty()
            }
            Kind::Internal(children) => {
                for slot in children.iter_mut() {
                    if slot.as_mut().is_some_and(|c| c.check(locate, outs)) {
                        trace!(depth = depth + 1, "collapsing empty subtree");
                        *slot = None;
                    }
                }
                children.iter().all(Option::is_none)
            }
        }
    }

    /// Number of stored elements, summed over leaves.
    pub(crate) fn count(&self) -> usize {
        match &self.kind {
            Kind::Leaf(items) => items.len(),
            Kind::Internal(children) => children.iter().flatten().map(|c| c.count()).sum(),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        1 + self.children().map(|(_, c)| c.node_count()).sum::<usize>()
    }

    pub(crate) fn leaf_count(&self) -> usize {
        match &self.kind {
            Kind::Leaf(_) => 1,
            Kind::Internal(_) => self.children().map(|(_, c)| c.leaf_count()).sum(),
        }
    }

    /// Deepest materialized depth in this subtree.
    pub(crate) fn max_depth(&self) -> u32 {
        self.children()
            .map(|(_, c)| c.max_depth())
            .max()
            .unwrap_or(self.depth)
    }
}

impl<T> Debug for Node<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("bounds", &self.cell.square)
            .field("depth", &self.depth);
        match &self.kind {
            Kind::Leaf(items) => s.field("elements", &items.len()),
            Kind::Internal(children) => {
                s.field("children", &children.iter().flatten().count())
            }
        };
        s.finish_non_exhaustive()
    }
}
