#![forbid(unsafe_code)]

//! Pointer-travel limits for an active drag.
//!
//! The travel rectangle is the containing block of the bounds target,
//! shrunk by caller-declared insets. Pointer samples are clamped into it
//! before any delta is computed, so the geometry engines never see an
//! out-of-range pointer.
//!
//! # Overlay freeze
//!
//! Move sessions additionally carry overlay rectangles. The resolver tracks
//! whether the pointer is in an overlay:
//!
//! ```text
//!            enter overlay              leave into travel rect
//!   Free ───────────────────▶ Frozen ──────────────────────────▶ Free
//!     ▲                          │ leave out of bounds
//!     │    re-enter travel rect  ▼
//!     └──────────────────── Frozen (out of bounds)
//! ```
//!
//! While frozen, [`BoundsResolver::resolve`] keeps returning the last valid
//! position.

use crate::direction::{Direction, Side};
use crate::geometry::{Bounds, Point, Rect};
use crate::surface::{ElementId, Surface};

/// Absolute pointer limits; `None` on a side means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TravelRect {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl TravelRect {
    /// No limits on any side.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self {
            top: None,
            right: None,
            bottom: None,
            left: None,
        }
    }

    /// Limits given by a rectangle.
    #[must_use]
    pub const fn from_rect(rect: Rect) -> Self {
        Self {
            top: Some(rect.top),
            right: Some(rect.right),
            bottom: Some(rect.bottom),
            left: Some(rect.left),
        }
    }

    /// The container rectangle shrunk by `bounds`, absent sides counting
    /// as zero.
    #[must_use]
    pub fn from_container(container: Rect, bounds: Bounds) -> Self {
        Self::from_rect(container.inset(bounds))
    }

    /// Lift the limit opposite the side being resized.
    #[must_use]
    pub fn suppress_for(mut self, direction: Direction) -> Self {
        match direction.vertical_side() {
            Some(Side::Trailing) => self.top = None,
            Some(Side::Leading) => self.bottom = None,
            None => {}
        }
        match direction.horizontal_side() {
            Some(Side::Trailing) => self.left = None,
            Some(Side::Leading) => self.right = None,
            None => {}
        }
        self
    }

    /// Clamp a point into the limits.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        let clamp_axis = |v: f64, lo: Option<f64>, hi: Option<f64>| {
            let v = lo.map_or(v, |lo| v.max(lo));
            hi.map_or(v, |hi| v.min(hi))
        };
        Point::new(
            clamp_axis(p.x, self.left, self.right),
            clamp_axis(p.y, self.top, self.bottom),
        )
    }

    /// Whether a point lies within the limits, edges included.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.left.is_none_or(|l| p.x >= l)
            && self.right.is_none_or(|r| p.x <= r)
            && self.top.is_none_or(|t| p.y >= t)
            && self.bottom.is_none_or(|b| p.y <= b)
    }
}

/// Travel rectangle for a drag whose bounds are taken from `bounds_target`.
///
/// Without an offset parent (or a laid-out one) travel is unconstrained.
pub fn resolve_travel<S: Surface + ?Sized>(
    surface: &S,
    bounds_target: ElementId,
    bounds: Bounds,
) -> TravelRect {
    surface
        .offset_parent(bounds_target)
        .and_then(|parent| surface.bounding_rect(parent))
        .map_or_else(TravelRect::unconstrained, |rect| {
            TravelRect::from_container(rect, bounds)
        })
}

/// Per-session pointer clamp with overlay freezing.
#[derive(Debug, Clone)]
pub struct BoundsResolver {
    travel: TravelRect,
    overlays: Vec<Rect>,
    last_valid: Point,
    in_overlay: bool,
}

impl BoundsResolver {
    /// Resolver for a move session.
    #[must_use]
    pub fn for_move(travel: TravelRect, overlays: Vec<Rect>, start: Point) -> Self {
        Self {
            travel,
            overlays,
            last_valid: start,
            in_overlay: false,
        }
    }

    /// Resolver for a resize session; overlays do not apply.
    #[must_use]
    pub fn for_resize(travel: TravelRect, direction: Direction, start: Point) -> Self {
        Self {
            travel: travel.suppress_for(direction),
            overlays: Vec::new(),
            last_valid: start,
            in_overlay: false,
        }
    }

    /// A resolver that passes every point through.
    #[must_use]
    pub fn passthrough(start: Point) -> Self {
        Self::for_move(TravelRect::unconstrained(), Vec::new(), start)
    }

    #[must_use]
    pub fn travel(&self) -> &TravelRect {
        &self.travel
    }

    #[must_use]
    pub fn overlays(&self) -> &[Rect] {
        &self.overlays
    }

    /// Whether travel is currently frozen by an overlay.
    #[must_use]
    pub fn in_overlay(&self) -> bool {
        self.in_overlay
    }

    /// Map a raw pointer sample to the effective pointer.
    pub fn resolve(&mut self, raw: Point) -> Point {
        if self.overlays.iter().any(|o| o.contains(raw)) {
            self.in_overlay = true;
            return self.last_valid;
        }
        if self.in_overlay {
            if !self.travel.contains(raw) {
                return self.last_valid;
            }
            self.in_overlay = false;
        }
        let p = self.travel.clamp(raw);
        self.last_valid = p;
        p
    }
}
