// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: squares and quadrants.
//!
//! The y axis grows downward (screen convention), so "north" is the half with
//! the smaller y values.

use kurbo::{Point, Rect};

/// One quarter of a [`Square`], named by compass direction.
///
/// [`Quadrant::of`] is total: every point maps to exactly one quadrant relative
/// to a center. Points on the center lines fall to the west and/or north side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `x > cx` and `y <= cy`.
    NorthEast = 0,
    /// `x <= cx` and `y <= cy`.
    NorthWest = 1,
    /// `x > cx` and `y > cy`.
    SouthEast = 2,
    /// `x <= cx` and `y > cy`.
    SouthWest = 3,
}

impl Quadrant {
    /// All quadrants in traversal order.
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// The quadrant of `point` relative to `center`.
    ///
    /// NaN coordinates compare false and land in the north-west quadrant; such
    /// points never pass [`Square::contains`] so they are rejected before routing.
    #[inline]
    pub fn of(center: Point, point: Point) -> Self {
        let east = point.x > center.x;
        let south = point.y > center.y;
        match (east, south) {
            (true, false) => Self::NorthEast,
            (false, false) => Self::NorthWest,
            (true, true) => Self::SouthEast,
            (false, true) => Self::SouthWest,
        }
    }

    /// Slot index of this quadrant in a node's child array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether `point` lies in this quadrant relative to `center`.
    #[inline]
    pub fn matches(self, center: Point, point: Point) -> bool {
        Self::of(center, point) == self
    }

    /// Unit offsets of this quadrant's center relative to its parent's center.
    const fn direction(self) -> (f64, f64) {
        match self {
            Self::NorthEast => (1.0, -1.0),
            Self::NorthWest => (-1.0, -1.0),
            Self::SouthEast => (1.0, 1.0),
            Self::SouthWest => (-1.0, 1.0),
        }
    }
}

/// Axis-aligned square given by its center and half side length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Square {
    /// Center of the square.
    pub center: Point,
    /// Half of the side length.
    pub half_dim: f64,
}

impl Square {
    /// Create a square from its center and half side length.
    pub const fn new(center: Point, half_dim: f64) -> Self {
        Self { center, half_dim }
    }

    /// Smallest x.
    #[inline]
    pub fn left(&self) -> f64 {
        self.center.x - self.half_dim
    }

    /// Largest x.
    #[inline]
    pub fn right(&self) -> f64 {
        self.center.x + self.half_dim
    }

    /// Smallest y.
    #[inline]
    pub fn top(&self) -> f64 {
        self.center.y - self.half_dim
    }

    /// Largest y.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center.y + self.half_dim
    }

    /// Corner at (left, top).
    pub fn upper_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    /// Corner at (right, top).
    pub fn upper_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    /// Corner at (left, bottom).
    pub fn lower_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    /// Corner at (right, bottom).
    pub fn lower_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// The four corners: upper-left, upper-right, lower-left, lower-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.upper_left(),
            self.upper_right(),
            self.lower_left(),
            self.lower_right(),
        ]
    }

    /// Whether the point lies inside the square, edges included.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Whether two squares share at least one point. Touching edges overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.left() > other.right()
            || self.right() < other.left()
            || self.top() > other.bottom()
            || self.bottom() < other.top())
    }

    /// The quarter of this square covering quadrant `q`.
    #[inline]
    pub fn quadrant(&self, q: Quadrant) -> Self {
        let quad_dim = self.half_dim / 2.0;
        let (dx, dy) = q.direction();
        Self {
            center: Point::new(
                self.center.x + dx * quad_dim,
                self.center.y + dy * quad_dim,
            ),
            half_dim: quad_dim,
        }
    }

    /// The quadrant of `p` relative to this square's center.
    #[inline]
    pub fn quadrant_of(&self, p: Point) -> Quadrant {
        Quadrant::of(self.center, p)
    }

    /// True if the half side length is not a positive finite number.
    pub fn is_degenerate(&self) -> bool {
        !(self.half_dim.is_finite() && self.half_dim > 0.0)
            || !self.center.x.is_finite()
            || !self.center.y.is_finite()
    }

    /// The square as a Kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }
}

/// The region a node covers.
///
/// `square` is the nominal quarter used for routing and display. `edges` are
/// inherited exactly: a child's inner edges are its parent's center
/// coordinates, so every point routed by [`Quadrant::of`] lies inside the
/// child's edges even when `center +/- half_dim` rounds differently.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Cell {
    pub(crate) square: Square,
    pub(crate) edges: Rect,
}

impl Cell {
    pub(crate) fn root(square: Square) -> Self {
        Self {
            square,
            edges: square.to_rect(),
        }
    }

    pub(crate) fn quadrant(&self, q: Quadrant) -> Self {
        let c = self.square.center;
        let Rect { x0, y0, x1, y1 } = self.edges;
        let edges = match q {
            Quadrant::NorthEast => Rect::new(c.x, y0, x1, c.y),
            Quadrant::NorthWest => Rect::new(x0, y0, c.x, c.y),
            Quadrant::SouthEast => Rect::new(c.x, c.y, x1, y1),
            Quadrant::SouthWest => Rect::new(x0, c.y, c.x, y1),
        };
        Self {
            square: self.square.quadrant(q),
            edges,
        }
    }

    /// Inclusive on all four edges, like [`Square::contains`].
    #[inline]
    pub(crate) fn contains(&self, p: Point) -> bool {
        let e = &self.edges;
        p.x >= e.x0 && p.x <= e.x1 && p.y >= e.y0 && p.y <= e.y1
    }

    #[inline]
    pub(crate) fn overlaps(&self, region: &Square) -> bool {
        let e = &self.edges;
        !(e.x0 > region.right()
            || e.x1 < region.left()
            || e.y0 > region.bottom()
            || e.y1 < region.top())
    }
}
