#![forbid(unsafe_code)]

//! Overlay region discovery and reduction.
//!
//! An overlay is an element painted in front of the drag surface (a nested
//! button, an embedded editor). While the pointer is over one, a move session
//! holds still, so the resolver needs the set of overlay rectangles at
//! session start.
//!
//! Discovery samples the container on a regular grid and asks the surface
//! what is painted topmost at each sample. The resulting rectangles are then
//! reduced to a minimal covering set by [`merge_overlay_rects`].
//!
//! # Invariants
//!
//! 1. `merge_overlay_rects` is idempotent and maps `[]` to `[]`.
//! 2. No rectangle in the output contains another (boundary-inclusive).
//! 3. The output keeps the first-appearance order of survivors.

use ahash::AHashSet;

use crate::geometry::{Point, Rect};
use crate::surface::{ElementId, Surface};

/// Default spacing between grid samples.
pub const OVERLAY_GRID_PITCH: f64 = 50.0;

/// Smallest grid pitch a configuration may ask for.
pub const MIN_OVERLAY_GRID_PITCH: f64 = 1.0;

/// Upper bound on grid samples along either axis.
pub const MAX_GRID_SAMPLES_PER_AXIS: usize = 1024;

/// Reduce `rects` to the maximal rectangles.
///
/// Exact duplicates collapse to their first occurrence; any rectangle
/// contained in another member is dropped.
#[must_use]
pub fn merge_overlay_rects(rects: &[Rect]) -> Vec<Rect> {
    let mut unique: Vec<Rect> = Vec::with_capacity(rects.len());
    for r in rects {
        if !unique.contains(r) {
            unique.push(*r);
        }
    }

    unique
        .iter()
        .enumerate()
        .filter(|&(i, r)| {
            !unique
                .iter()
                .enumerate()
                .any(|(j, s)| i != j && s.contains_rect(r))
        })
        .map(|(_, r)| *r)
        .collect()
}

/// Grid sample points covering `rect`, both ends inclusive.
///
/// A pitch too fine for the rectangle is widened so neither axis exceeds
/// [`MAX_GRID_SAMPLES_PER_AXIS`] steps.
fn grid_samples(rect: &Rect, pitch: f64) -> impl Iterator<Item = Point> + '_ {
    let pitch = if pitch > 0.0 { pitch } else { OVERLAY_GRID_PITCH };
    let pitch = pitch.max(rect.width().max(rect.height()) / MAX_GRID_SAMPLES_PER_AXIS as f64);
    let cols = (rect.width() / pitch).floor() as usize;
    let rows = (rect.height() / pitch).floor() as usize;
    (0..=rows).flat_map(move |row| {
        (0..=cols).map(move |col| {
            Point::new(
                (rect.left + col as f64 * pitch).min(rect.right),
                (rect.top + row as f64 * pitch).min(rect.bottom),
            )
        })
    })
}

/// Discover the overlay rectangles inside `container` for a drag of
/// `dragged`.
///
/// A sampled element counts as an obstacle when it is a strict descendant
/// of `container`, lies outside the dragged element's subtree, and is not
/// one of the dragged element's ancestors.
pub fn resolve_overlays<S: Surface + ?Sized>(
    surface: &S,
    container: ElementId,
    dragged: ElementId,
    pitch: f64,
) -> Vec<Rect> {
    let Some(area) = surface.bounding_rect(container) else {
        return Vec::new();
    };

    let mut seen = AHashSet::new();
    let mut rects = Vec::new();
    for point in grid_samples(&area, pitch) {
        let Some(hit) = surface.element_at(point) else {
            continue;
        };
        if !seen.insert(hit) {
            continue;
        }
        let obstacle = hit != container
            && surface.contains(container, hit)
            && !surface.contains(dragged, hit)
            && !surface.contains(hit, dragged);
        if !obstacle {
            continue;
        }
        if let Some(rect) = surface.bounding_rect(hit) {
            rects.push(rect);
        }
    }

    let merged = merge_overlay_rects(&rects);
    tracing::debug!(
        target: "framedrag::overlay",
        container = container.get(),
        dragged = dragged.get(),
        sampled = seen.len(),
        overlays = merged.len(),
        "resolved overlay regions"
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(top: f64, right: f64, bottom: f64, left: f64) -> Rect {
        Rect::new(top, right, bottom, left)
    }

    #[test]
    fn empty_stays_empty() {
        assert!(merge_overlay_rects(&[]).is_empty());
    }

    #[test]
    fn contained_rect_is_dropped() {
        let outer = r(10.0, 20.0, 20.0, 10.0);
        let inner = r(11.0, 19.0, 19.0, 11.0);
        assert_eq!(merge_overlay_rects(&[outer, inner]), vec![outer]);
        assert_eq!(merge_overlay_rects(&[inner, outer]), vec![outer]);
    }

    #[test]
    fn duplicates_collapse() {
        let a = r(0.0, 5.0, 5.0, 0.0);
        assert_eq!(merge_overlay_rects(&[a, a, a]), vec![a]);
    }

    #[test]
    fn shared_edge_counts_as_contained() {
        let outer = r(0.0, 10.0, 10.0, 0.0);
        let flush = r(0.0, 10.0, 5.0, 5.0);
        assert_eq!(merge_overlay_rects(&[flush, outer]), vec![outer]);
    }

    #[test]
    fn disjoint_rects_survive_in_order() {
        let a = r(0.0, 5.0, 5.0, 0.0);
        let b = r(10.0, 15.0, 15.0, 10.0);
        let c = r(3.0, 12.0, 12.0, 3.0);
        assert_eq!(merge_overlay_rects(&[a, b, c]), vec![a, b, c]);
    }

    #[test]
    fn dialog_footer_buttons() {
        let rects = [
            r(100.0, 879.5, 202.0, 671.5),
            r(170.0, 879.5, 202.0, 671.5),
            r(170.0, 783.5, 202.0, 727.5),
            r(170.0, 855.5, 202.0, 799.5),
        ];
        assert_eq!(
            merge_overlay_rects(&rects),
            vec![r(100.0, 879.5, 202.0, 671.5)]
        );
    }

    #[test]
    fn merge_is_idempotent_on_mixed_input() {
        let rects = [
            r(0.0, 50.0, 50.0, 0.0),
            r(10.0, 20.0, 20.0, 10.0),
            r(40.0, 90.0, 90.0, 40.0),
            r(40.0, 90.0, 90.0, 40.0),
        ];
        let once = merge_overlay_rects(&rects);
        assert_eq!(merge_overlay_rects(&once), once);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn grid_includes_far_edges() {
        let area = Rect::from_xywh(0.0, 0.0, 100.0, 60.0);
        let pts: Vec<Point> = grid_samples(&area, 50.0).collect();
        assert_eq!(pts.len(), 6);
        assert!(pts.contains(&Point::new(100.0, 50.0)));
        assert!(pts.contains(&Point::new(0.0, 0.0)));
    }

    #[test]
    fn tiny_pitch_is_capped() {
        let area = Rect::from_xywh(0.0, 0.0, 2000.0, 500.0);
        let count = grid_samples(&area, 1e-9).count();
        let cap = MAX_GRID_SAMPLES_PER_AXIS + 1;
        assert!(count <= cap * cap);
        assert!(grid_samples(&area, 1e-9).all(|p| area.contains(p)));
    }

    mod surface {
        use super::super::*;
        use crate::testing::{MockSurface, NodeSpec};

        #[test]
        fn finds_sibling_overlays_only() {
            let mut s = MockSurface::new(Rect::from_xywh(0.0, 0.0, 400.0, 300.0));
            let root = s.root();
            let dialog = s.add(root, NodeSpec::new(0.0, 0.0, 400.0, 300.0));
            let header = s.add(dialog, NodeSpec::new(0.0, 0.0, 400.0, 40.0));
            let button = s.add(dialog, NodeSpec::new(300.0, 250.0, 80.0, 40.0));

            let found = resolve_overlays(&s, dialog, header, OVERLAY_GRID_PITCH);
            assert_eq!(found, vec![s.rect_of(button)]);
        }

        #[test]
        fn dragged_subtree_and_ancestors_are_ignored() {
            let mut s = MockSurface::new(Rect::from_xywh(0.0, 0.0, 400.0, 300.0));
            let root = s.root();
            let wrap = s.add(root, NodeSpec::new(0.0, 0.0, 400.0, 300.0));
            let dragged = s.add(wrap, NodeSpec::new(0.0, 0.0, 400.0, 300.0));
            s.add(dragged, NodeSpec::new(100.0, 100.0, 100.0, 100.0));

            assert!(resolve_overlays(&s, root, dragged, OVERLAY_GRID_PITCH).is_empty());
        }

        #[test]
        #[tracing_test::traced_test]
        fn logs_resolution_summary() {
            let s = MockSurface::new(Rect::from_xywh(0.0, 0.0, 100.0, 100.0));
            let root = s.root();
            let _ = resolve_overlays(&s, root, root, OVERLAY_GRID_PITCH);
            assert!(logs_contain("resolved overlay regions"));
        }
    }
}
