// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection from stored elements to their 2D location.

use kurbo::Point;

/// Maps an element to the point it occupies.
///
/// Any `Fn(&T) -> Point` closure is a locator. The tree is generic over the
/// locator, so calls are statically dispatched.
pub trait Locate<T> {
    /// Current location of `item`.
    fn locate(&self, item: &T) -> Point;
}

impl<T, F> Locate<T> for F
where
    F: Fn(&T) -> Point,
{
    #[inline]
    fn locate(&self, item: &T) -> Point {
        self(item)
    }
}

/// Locator for trees that store [`Point`]s directly.
#[derive(Copy, Clone, Debug, Default)]
pub struct Identity;

impl Locate<Point> for Identity {
    #[inline]
    fn locate(&self, item: &Point) -> Point {
        *item
    }
}
