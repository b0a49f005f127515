#![forbid(unsafe_code)]

//! Resize engine: anchor-aware size/offset arithmetic for the eight grips.
//!
//! Each axis is handled independently. Dragging the leading edge (top/left)
//! grows the element when the pointer moves toward the leading side, so the
//! size delta is the negated pointer delta there. Whether the offset follows
//! depends on the element's [`AnchorMode`] on that axis:
//!
//! | Grip side | Size delta | Offset moves when |
//! |-----------|------------|-------------------|
//! | leading   | `-d`       | leading-anchored (by `-add`) |
//! | trailing  | `+d`       | trailing-anchored (by `+add`) |
//!
//! Corner grips apply both axis rules.
//!
//! # Invariants
//!
//! 1. Shrinking never takes a dimension below its effective minimum.
//! 2. Growing never takes a dimension above its maximum, when one is set.
//! 3. The unchanged edge of a leading-anchored element stays put.

use crate::anchor::{AnchorMode, Anchors};
use crate::direction::{Direction, Side};
use crate::geometry::GeometryState;

/// Minimum width used when none is declared.
pub const DEFAULT_MIN_WIDTH: f64 = 34.0;
/// Minimum height used when none is declared.
pub const DEFAULT_MIN_HEIGHT: f64 = 20.0;

/// Size limits. Zero or negative values count as unset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_width: Option<f64>,
    pub max_height: Option<f64>,
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| *v > 0.0)
}

impl Constraints {
    /// Declared minimum width, or [`DEFAULT_MIN_WIDTH`].
    #[must_use]
    pub fn effective_min_width(&self) -> f64 {
        positive(self.min_width).unwrap_or(DEFAULT_MIN_WIDTH)
    }

    /// Declared minimum height, or [`DEFAULT_MIN_HEIGHT`].
    #[must_use]
    pub fn effective_min_height(&self) -> f64 {
        positive(self.min_height).unwrap_or(DEFAULT_MIN_HEIGHT)
    }

    #[must_use]
    pub fn effective_max_width(&self) -> Option<f64> {
        positive(self.max_width)
    }

    #[must_use]
    pub fn effective_max_height(&self) -> Option<f64> {
        positive(self.max_height)
    }

    /// Replace unset minimums with the given fallbacks.
    #[must_use]
    pub fn with_min_fallbacks(self, min_width: f64, min_height: f64) -> Self {
        Self {
            min_width: positive(self.min_width).or(Some(min_width)),
            min_height: positive(self.min_height).or(Some(min_height)),
            ..self
        }
    }
}

/// Shrink `add` so that `current + add` respects `min` when shrinking and
/// `max` when growing.
#[inline]
#[must_use]
pub fn limit_add_val(current: f64, add: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    if add < 0.0 {
        min.map_or(add, |min| add.max(min - current))
    } else if add > 0.0 {
        max.map_or(add, |max| add.min(max - current))
    } else {
        add
    }
}

/// One axis worth of resize.
struct AxisMove {
    size: f64,
    offset: f64,
}

fn resize_axis(
    size: f64,
    offset: f64,
    side: Option<Side>,
    delta: f64,
    anchor: AnchorMode,
    min: f64,
    max: Option<f64>,
) -> AxisMove {
    match side {
        None => AxisMove { size, offset },
        Some(Side::Leading) => {
            let add = limit_add_val(size, -delta, Some(min), max);
            AxisMove {
                size: size + add,
                offset: if anchor.is_trailing() { offset } else { offset - add },
            }
        }
        Some(Side::Trailing) => {
            let add = limit_add_val(size, delta, Some(min), max);
            AxisMove {
                size: size + add,
                offset: if anchor.is_trailing() { offset + add } else { offset },
            }
        }
    }
}

/// Apply a pointer delta to `start` along the grip `direction`.
///
/// `start` must carry a size; a missing one is treated as zero.
#[must_use]
pub fn resize(
    start: GeometryState,
    direction: Direction,
    dx: f64,
    dy: f64,
    anchors: Anchors,
    constraints: &Constraints,
) -> GeometryState {
    let h = resize_axis(
        start.width.unwrap_or(0.0),
        start.x,
        direction.horizontal_side(),
        dx,
        anchors.horizontal,
        constraints.effective_min_width(),
        constraints.effective_max_width(),
    );
    let v = resize_axis(
        start.height.unwrap_or(0.0),
        start.y,
        direction.vertical_side(),
        dy,
        anchors.vertical,
        constraints.effective_min_height(),
        constraints.effective_max_height(),
    );
    GeometryState::sized(h.offset, v.offset, h.size, v.size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> GeometryState {
        GeometryState::sized(0.0, 0.0, 100.0, 80.0)
    }

    #[test]
    fn limit_add_val_shrink_respects_min() {
        assert_eq!(limit_add_val(100.0, -60.0, Some(50.0), None), -50.0);
        assert_eq!(limit_add_val(100.0, -10.0, Some(50.0), None), -10.0);
    }

    #[test]
    fn limit_add_val_grow_respects_max() {
        assert_eq!(limit_add_val(100.0, 60.0, None, Some(120.0)), 20.0);
        assert_eq!(limit_add_val(100.0, 5.0, None, Some(120.0)), 5.0);
    }

    #[test]
    fn limit_add_val_unbounded_is_identity() {
        assert_eq!(limit_add_val(100.0, -1e4, None, None), -1e4);
        assert_eq!(limit_add_val(100.0, 1e4, None, None), 1e4);
        assert_eq!(limit_add_val(100.0, 0.0, Some(500.0), Some(1.0)), 0.0);
    }

    #[test]
    fn bottom_right_grows_in_place() {
        let out = resize(
            start(),
            Direction::BottomRight,
            25.0,
            15.0,
            Anchors::default(),
            &Constraints::default(),
        );
        assert_eq!(out, GeometryState::sized(0.0, 0.0, 125.0, 95.0));
    }

    #[test]
    fn left_shrink_clamps_to_min_and_shifts_by_allowed_amount() {
        let constraints = Constraints {
            min_width: Some(50.0),
            ..Constraints::default()
        };
        let out = resize(
            start(),
            Direction::Left,
            60.0,
            0.0,
            Anchors::default(),
            &constraints,
        );
        assert_eq!(out.width, Some(50.0));
        assert_eq!(out.x, 50.0);
        assert_eq!(out.height, Some(80.0));
    }

    #[test]
    fn top_grow_moves_leading_anchored_offset() {
        let out = resize(
            start(),
            Direction::Top,
            0.0,
            -30.0,
            Anchors::default(),
            &Constraints::default(),
        );
        assert_eq!(out, GeometryState::sized(0.0, -30.0, 100.0, 110.0));
    }

    #[test]
    fn trailing_anchor_swaps_which_grip_moves_offset() {
        let anchors = Anchors::new(AnchorMode::Trailing, AnchorMode::Trailing);
        let left = resize(start(), Direction::Left, -20.0, 0.0, anchors, &Constraints::default());
        assert_eq!(left, GeometryState::sized(0.0, 0.0, 120.0, 80.0));

        let bottom = resize(start(), Direction::Bottom, 0.0, 10.0, anchors, &Constraints::default());
        assert_eq!(bottom, GeometryState::sized(0.0, 10.0, 100.0, 90.0));
    }

    #[test]
    fn default_minimums_apply() {
        let out = resize(
            start(),
            Direction::TopLeft,
            500.0,
            500.0,
            Anchors::default(),
            &Constraints::default(),
        );
        assert_eq!(out.width, Some(DEFAULT_MIN_WIDTH));
        assert_eq!(out.height, Some(DEFAULT_MIN_HEIGHT));
        assert_eq!(out.x, 100.0 - DEFAULT_MIN_WIDTH);
        assert_eq!(out.y, 80.0 - DEFAULT_MIN_HEIGHT);
    }

    #[test]
    fn zero_constraints_count_as_unset() {
        let c = Constraints {
            min_width: Some(0.0),
            max_width: Some(0.0),
            ..Constraints::default()
        };
        assert_eq!(c.effective_min_width(), DEFAULT_MIN_WIDTH);
        assert_eq!(c.effective_max_width(), None);
    }

    #[test]
    fn edge_grips_leave_other_axis_alone() {
        let out = resize(
            start(),
            Direction::Right,
            10.0,
            999.0,
            Anchors::default(),
            &Constraints::default(),
        );
        assert_eq!(out, GeometryState::sized(0.0, 0.0, 110.0, 80.0));
    }
}
