#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All types use `f64` surface-local coordinates with the origin at the
//! surface's top-left corner. Boxes are axis-aligned and treated as
//! immutable snapshots: a computation reads the boxes it needs up front and
//! never observes a box mutating mid-flight.
//!
//! # Invariants
//!
//! 1. [`Rect::overlaps`] uses closed-interval semantics: boxes whose edges
//!    merely touch are reported as overlapping. [`Rect::contains`] is
//!    consistent with this (edges are inside).
//! 2. [`Rect::penetration`] is positive on an axis exactly when the boxes
//!    have positive overlap depth along that axis; a non-positive value on
//!    either axis means the closed-interval overlap was edge contact or
//!    bounding-box slack, not interior overlap.

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The surface origin (top-left corner).
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).length()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A displacement in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The zero displacement.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new displacement.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// This displacement scaled by a factor.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned box in a single shared coordinate space.
///
/// Stored as the top-left corner plus extent; `right`/`bottom` are derived.
/// A query against a `Rect` sees one consistent snapshot: callers that need
/// "the box as of now" construct it first and pass it in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new box from its top-left corner and extent.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether the box has no positive area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether a point lies inside the box. Edges count as inside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Whether another box lies entirely inside this one. Shared edges count
    /// as inside.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right() <= self.right()
            && other.top >= self.top
            && other.bottom() <= self.bottom()
    }

    /// This box shifted by a displacement.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Rect {
        Rect::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }

    /// This box uniformly scaled about its own center.
    #[must_use]
    pub fn scaled_about_center(&self, factor: f64) -> Rect {
        let center = self.center();
        let width = self.width * factor;
        let height = self.height * factor;
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Closed-interval overlap test: `true` unless the boxes are strictly
    /// separated along some axis. Touching edges count as overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.right() < other.left || self.left > other.right() {
            return false;
        }
        if self.bottom() < other.top || self.top > other.bottom() {
            return false;
        }
        true
    }

    /// Per-axis penetration depth between two boxes.
    ///
    /// A positive component is the overlap depth along that axis; zero means
    /// edge contact and negative means separation. Meaningful for resolution
    /// only when [`overlaps`](Rect::overlaps) already reported contact.
    #[must_use]
    pub fn penetration(&self, other: &Rect) -> Penetration {
        let a = self.center();
        let b = other.center();
        Penetration {
            x: (self.width + other.width) / 2.0 - (a.x - b.x).abs(),
            y: (self.height + other.height) / 2.0 - (a.y - b.y).abs(),
        }
    }
}

/// Overlap depth along each axis, from [`Rect::penetration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub x: f64,
    pub y: f64,
}

impl Penetration {
    /// Whether the boxes have positive overlap depth on both axes
    /// (i.e. genuine interior overlap rather than edge contact or slack).
    #[must_use]
    pub fn is_overlap(&self) -> bool {
        self.x > 0.0 && self.y > 0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
