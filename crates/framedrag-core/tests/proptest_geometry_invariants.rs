//! Property-based invariants for the framedrag geometry engine.
//!
//! 1. **Overlay merge** is idempotent, never keeps a contained rectangle,
//!    and yields the same set for any permutation of its input.
//! 2. **limit_add_val** keeps `current + add` within `[min, max]` on the
//!    side it limits, and is the identity when no limit is set.
//! 3. **Classification** never returns a corner grip for a point outside
//!    that corner's buffer, and corners win where zones meet.
//! 4. **Resize** never takes a dimension below its effective minimum, and
//!    a bottom-right drag never moves a leading-anchored element.
//! 5. **Bounds** clamping always lands inside the travel rectangle.

use framedrag_core::anchor::{AnchorMode, Anchors};
use framedrag_core::bounds::TravelRect;
use framedrag_core::direction::{Direction, EDGE_BUFFER, classify};
use framedrag_core::geometry::{Bounds, GeometryState, Point, Rect};
use framedrag_core::overlay::merge_overlay_rects;
use framedrag_core::resize::{Constraints, limit_add_val, resize};
use proptest::prelude::*;

// ═════════════════════════════════════════════════════════════════════════
// Strategies
// ═════════════════════════════════════════════════════════════════════════

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-200i32..200, -200i32..200, 0i32..200, 0i32..200).prop_map(|(x, y, w, h)| {
        Rect::from_xywh(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

fn rects_strategy() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(rect_strategy(), 0..12)
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn anchor_strategy() -> impl Strategy<Value = AnchorMode> {
    prop_oneof![Just(AnchorMode::Leading), Just(AnchorMode::Trailing)]
}

fn sorted(mut rects: Vec<Rect>) -> Vec<Rect> {
    rects.sort_by(|a, b| {
        (a.top, a.right, a.bottom, a.left)
            .partial_cmp(&(b.top, b.right, b.bottom, b.left))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rects
}

// ═════════════════════════════════════════════════════════════════════════
// Overlay merge
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_is_idempotent(rects in rects_strategy()) {
        let once = merge_overlay_rects(&rects);
        prop_assert_eq!(merge_overlay_rects(&once), once);
    }

    #[test]
    fn merge_output_has_no_contained_members(rects in rects_strategy()) {
        let out = merge_overlay_rects(&rects);
        for (i, r) in out.iter().enumerate() {
            for (j, s) in out.iter().enumerate() {
                if i != j {
                    prop_assert!(!s.contains_rect(r), "{:?} contains {:?}", s, r);
                }
            }
        }
    }

    #[test]
    fn merge_covers_every_input(rects in rects_strategy()) {
        let out = merge_overlay_rects(&rects);
        for r in &rects {
            prop_assert!(out.iter().any(|s| s.contains_rect(r)));
        }
    }

    #[test]
    fn merge_is_order_independent(rects in rects_strategy()) {
        let mut reversed = rects.clone();
        reversed.reverse();
        prop_assert_eq!(
            sorted(merge_overlay_rects(&rects)),
            sorted(merge_overlay_rects(&reversed))
        );
    }

    #[test]
    fn contained_pair_reduces_to_outer(outer in rect_strategy(), inset in 0i32..20) {
        let inner = outer.inset(Bounds::all(f64::from(inset)));
        prop_assert_eq!(merge_overlay_rects(&[inner, outer]), vec![outer]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// limit_add_val
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shrink_never_passes_min(current in 1.0f64..1000.0, add in -2000.0f64..0.0, min in 0.0f64..1000.0) {
        prop_assume!(min <= current);
        let limited = limit_add_val(current, add, Some(min), None);
        prop_assert!(current + limited >= min - 1e-9);
        prop_assert!(limited >= add);
    }

    #[test]
    fn grow_never_passes_max(current in 1.0f64..1000.0, add in 0.0f64..2000.0, max in 0.0f64..2000.0) {
        prop_assume!(max >= current);
        let limited = limit_add_val(current, add, None, Some(max));
        prop_assert!(current + limited <= max + 1e-9);
        prop_assert!(limited <= add);
    }

    #[test]
    fn no_limits_is_identity(current in -1000.0f64..1000.0, add in -1000.0f64..1000.0) {
        prop_assert_eq!(limit_add_val(current, add, None, None), add);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn corner_buffers_classify_as_corner(
        x in 20i32..400,
        y in 20i32..400,
        w in 20i32..400,
        h in 20i32..400,
        ox in -4i32..5,
        oy in -4i32..5,
    ) {
        let rect = Rect::from_xywh(f64::from(x), f64::from(y), f64::from(w), f64::from(h));
        let p = Point::new(rect.left + f64::from(ox), rect.top + f64::from(oy));
        prop_assert_eq!(classify(p, &rect), Some(Direction::TopLeft));
        let p = Point::new(rect.right + f64::from(ox), rect.bottom + f64::from(oy));
        prop_assert_eq!(classify(p, &rect), Some(Direction::BottomRight));
    }

    #[test]
    fn far_interior_is_unclassified(w in 40i32..400, h in 40i32..400) {
        let rect = Rect::from_xywh(0.0, 0.0, f64::from(w), f64::from(h));
        let center = Point::new(rect.width() / 2.0, rect.height() / 2.0);
        prop_assert_eq!(classify(center, &rect), None);
    }

    #[test]
    fn classified_point_lies_near_the_edge(rect in rect_strategy(), px in -250.0f64..450.0, py in -250.0f64..450.0) {
        let p = Point::new(px, py);
        if classify(p, &rect).is_some() {
            prop_assert!(rect.expand(EDGE_BUFFER).contains_strict(p));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Resize
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_respects_minimums(
        direction in direction_strategy(),
        h_anchor in anchor_strategy(),
        v_anchor in anchor_strategy(),
        w in 40.0f64..500.0,
        h in 40.0f64..500.0,
        dx in -1000.0f64..1000.0,
        dy in -1000.0f64..1000.0,
    ) {
        let out = resize(
            GeometryState::sized(0.0, 0.0, w, h),
            direction,
            dx,
            dy,
            Anchors::new(h_anchor, v_anchor),
            &Constraints::default(),
        );
        prop_assert!(out.width.unwrap_or(0.0) >= 34.0 - 1e-9);
        prop_assert!(out.height.unwrap_or(0.0) >= 20.0 - 1e-9);
    }

    #[test]
    fn bottom_right_grows_in_place(
        w in 40.0f64..500.0,
        h in 40.0f64..500.0,
        dx in 0.0f64..500.0,
        dy in 0.0f64..500.0,
    ) {
        let out = resize(
            GeometryState::sized(7.0, 9.0, w, h),
            Direction::BottomRight,
            dx,
            dy,
            Anchors::default(),
            &Constraints::default(),
        );
        prop_assert_eq!(out, GeometryState::sized(7.0, 9.0, w + dx, h + dy));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_lands_inside_travel(container in rect_strategy(), inset in 0i32..50, px in -500.0f64..500.0, py in -500.0f64..500.0) {
        let travel = TravelRect::from_container(container, Bounds::all(f64::from(inset)));
        prop_assert!(travel.contains(travel.clamp(Point::new(px, py))));
    }
}
