#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates live in one shared display space (viewport pixels in a
//! browser host, cells or points elsewhere). Values are `f64` because hosts
//! report fractional layout positions.

use std::ops::Sub;

/// A pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = (f64, f64);

    /// Component-wise delta `(self - origin)`.
    #[inline]
    fn sub(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle described by its four edges.
///
/// Invariant: `top <= bottom` and `left <= right`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Rect {
    /// Create a rectangle from its edges.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    #[must_use]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(y, x + width.max(0.0), y + height.max(0.0), x)
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check if a point is inside the rectangle, edges included.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Check if a point is strictly inside the rectangle (open interval on
    /// all four sides).
    #[inline]
    #[must_use]
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    /// Check if `other` lies entirely within this rectangle, edges included.
    #[inline]
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
            && self.left <= other.left
    }

    /// Check whether the two rectangles share any area or edge.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }

    /// Grow the rectangle by `amount` on every side.
    #[must_use]
    pub fn expand(&self, amount: f64) -> Rect {
        Rect::new(
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
            self.left - amount,
        )
    }

    /// Shrink the rectangle by the given insets.
    ///
    /// Absent insets count as zero. Over-large insets collapse the rectangle
    /// onto its midline instead of inverting it.
    #[must_use]
    pub fn inset(&self, insets: Bounds) -> Rect {
        let mut top = self.top + insets.top.unwrap_or(0.0);
        let mut bottom = self.bottom - insets.bottom.unwrap_or(0.0);
        let mut left = self.left + insets.left.unwrap_or(0.0);
        let mut right = self.right - insets.right.unwrap_or(0.0);
        if top > bottom {
            let mid = (top + bottom) / 2.0;
            top = mid;
            bottom = mid;
        }
        if left > right {
            let mid = (left + right) / 2.0;
            left = mid;
            right = mid;
        }
        Rect::new(top, right, bottom, left)
    }

    /// Clamp a point into the rectangle.
    #[inline]
    #[must_use]
    pub fn clamp_point(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.left, self.right),
            p.y.clamp(self.top, self.bottom),
        )
    }

    /// Translate the rectangle by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.top + dy, self.right + dx, self.bottom + dy, self.left + dx)
    }
}

/// Partial inset constraints, one per side.
///
/// `None` on a side means the caller declared nothing for it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl Bounds {
    /// Same inset on every side.
    #[must_use]
    pub const fn all(val: f64) -> Self {
        Self {
            top: Some(val),
            right: Some(val),
            bottom: Some(val),
            left: Some(val),
        }
    }

    /// Create bounds with specific values.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        }
    }

    /// True when no side carries a value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}

impl From<f64> for Bounds {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

impl From<(f64, f64, f64, f64)> for Bounds {
    fn from((top, right, bottom, left): (f64, f64, f64, f64)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

/// Offset and optional size reported by the engines.
///
/// Pure move sessions only carry meaning in `x`/`y`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryState {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl GeometryState {
    /// An offset-only state.
    #[must_use]
    pub const fn offset(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    /// An offset plus size.
    #[must_use]
    pub const fn sized(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Fill a missing or zero size from `fallback` (usually the element's
    /// bounding rectangle).
    #[must_use]
    pub fn with_size_fallback(self, fallback: &Rect) -> Self {
        let pick = |v: Option<f64>, fb: f64| match v {
            Some(v) if v != 0.0 => v,
            _ => fb,
        };
        Self {
            width: Some(pick(self.width, fallback.width())),
            height: Some(pick(self.height, fallback.height())),
            ..self
        }
    }
}
