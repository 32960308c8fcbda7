// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A quadtree shared between threads behind a reader-writer lock.

use std::sync::Arc;

use kurbo::Point;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::locate::Locate;
use crate::tree::{OutOfDomain, QuadTree};
use crate::types::Square;

/// Cloneable handle to a [`QuadTree`] guarded by a [`RwLock`].
///
/// Structural changes ([`insert`](Self::insert), [`check`](Self::check),
/// [`refresh`](Self::refresh)) take the lock exclusively; queries take it
/// shared. Query helpers clone their results so no borrow outlives the guard.
/// Use [`read`](Self::read) to hold the shared lock across several calls, for
/// example to walk nodes returned by [`QuadTree::query_point`].
pub struct SharedQuadTree<T, L> {
    inner: Arc<RwLock<QuadTree<T, L>>>,
}

impl<T, L> Clone for SharedQuadTree<T, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, L> From<QuadTree<T, L>> for SharedQuadTree<T, L> {
    fn from(tree: QuadTree<T, L>) -> Self {
        Self::new(tree)
    }
}

impl<T, L> SharedQuadTree<T, L> {
    /// Wrap `tree` for shared use.
    pub fn new(tree: QuadTree<T, L>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Acquire shared access for the guard's lifetime.
    pub fn read(&self) -> RwLockReadGuard<'_, QuadTree<T, L>> {
        self.inner.read()
    }

    /// Acquire exclusive access for the guard's lifetime.
    pub fn write(&self) -> RwLockWriteGuard<'_, QuadTree<T, L>> {
        self.inner.write()
    }

    /// Recover the tree if this is the last handle.
    pub fn try_unwrap(self) -> Result<QuadTree<T, L>, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T, L> SharedQuadTree<T, L>
where
    T: Send,
    L: Locate<T> + Sync,
{
    /// See [`QuadTree::insert`].
    pub fn insert<I>(&self, elements: I) -> OutOfDomain<T>
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.write().insert(elements)
    }

    /// See [`QuadTree::refresh`].
    pub fn refresh(&self) -> OutOfDomain<T> {
        self.inner.write().refresh()
    }
}

impl<T, L: Locate<T>> SharedQuadTree<T, L> {
    /// See [`QuadTree::check`].
    pub fn check(&self, outs: &mut Vec<T>) -> usize {
        self.inner.write().check(outs)
    }

    /// See [`QuadTree::count`].
    pub fn count(&self) -> usize {
        self.inner.read().count()
    }
}

impl<T: Clone, L: Locate<T>> SharedQuadTree<T, L> {
    /// Cloned results of [`QuadTree::query`].
    pub fn query(&self, region: &Square) -> Vec<T> {
        self.inner.read().query(region).into_iter().cloned().collect()
    }

    /// Cloned results of [`QuadTree::query_radius`].
    pub fn query_radius(&self, center: Point, radius: f64) -> Vec<T> {
        self.inner
            .read()
            .query_radius(center, radius)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Cloned results of [`QuadTree::get`].
    pub fn get(&self) -> Vec<T> {
        self.inner.read().get().into_iter().cloned().collect()
    }
}

impl<T, L> core::fmt::Debug for SharedQuadTree<T, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedQuadTree")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}
