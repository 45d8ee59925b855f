#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are in points (`f64`) with the origin at the top-left of the
//! container and `y` growing downward. Rectangles are never normalized
//! implicitly: callers that inset past zero get a zero-sized rectangle
//! centered on the original midpoint.

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Tolerance used when comparing computed frames.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// A 2D point or translation vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components within [`GEOMETRY_EPSILON`] of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= GEOMETRY_EPSILON && (self.y - other.y).abs() <= GEOMETRY_EPSILON
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle: surface frames, container bounds, safe areas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Create a rectangle from an origin point and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Same size, moved so its top-left corner is `origin`.
    #[must_use]
    pub fn with_origin(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width, self.height)
    }

    /// Same size, moved so its center is `center`.
    #[must_use]
    pub fn with_center(&self, center: Point) -> Rect {
        Rect::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Translate by `delta`.
    #[must_use]
    pub fn offset(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    ///
    /// Negative amounts grow the rectangle. An axis that would become
    /// negative collapses to zero around its midpoint.
    #[must_use]
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        let (x, width) = collapse_axis(self.x + dx, self.width - 2.0 * dx, self.mid_x());
        let (y, height) = collapse_axis(self.y + dy, self.height - 2.0 * dy, self.mid_y());
        Rect::new(x, y, width, height)
    }

    /// Shrink by per-edge insets.
    #[must_use]
    pub fn inset(&self, insets: Insets) -> Rect {
        let (x, width) = collapse_axis(
            self.x + insets.left,
            self.width - insets.left - insets.right,
            self.mid_x(),
        );
        let (y, height) = collapse_axis(
            self.y + insets.top,
            self.height - insets.top - insets.bottom,
            self.mid_y(),
        );
        Rect::new(x, y, width, height)
    }

    /// Compute the overlapping region, or `None` if the rectangles don't overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.min_x().max(other.min_x());
        let y = self.min_y().max(other.min_y());
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Check whether `other` lies fully inside this rectangle.
    ///
    /// Equivalent to "the intersection of the two equals `other`", with a
    /// small tolerance for accumulated floating-point error.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x() - GEOMETRY_EPSILON
            && other.min_y() >= self.min_y() - GEOMETRY_EPSILON
            && other.max_x() <= self.max_x() + GEOMETRY_EPSILON
            && other.max_y() <= self.max_y() + GEOMETRY_EPSILON
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Linear interpolation between two frames; `t` is not clamped.
    #[must_use]
    pub fn lerp(&self, to: &Rect, t: f64) -> Rect {
        Rect::new(
            lerp(self.x, to.x, t),
            lerp(self.y, to.y, t),
            lerp(self.width, to.width, t),
            lerp(self.height, to.height, t),
        )
    }

    /// All four components within [`GEOMETRY_EPSILON`] of `other`.
    pub fn approx_eq(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() <= GEOMETRY_EPSILON
            && (self.y - other.y).abs() <= GEOMETRY_EPSILON
            && (self.width - other.width).abs() <= GEOMETRY_EPSILON
            && (self.height - other.height).abs() <= GEOMETRY_EPSILON
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
fn collapse_axis(start: f64, len: f64, mid: f64) -> (f64, f64) {
    if len < 0.0 { (mid, 0.0) } else { (start, len) }
}

/// Per-edge distances: safe-area insets, margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Self = Self::all(0.0);

    /// Create new insets with explicit values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge.
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            left: val,
            bottom: val,
            right: val,
        }
    }

    /// Horizontal and vertical insets.
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}
