#![forbid(unsafe_code)]

//! Anchor-mode probing.
//!
//! An element positioned from its trailing edge (`right`/`bottom`) grows
//! toward the leading side when its size increases, so a resize must move a
//! different edge than it would for a leading-anchored element. The probe
//! decides which case applies.
//!
//! # Algorithm
//!
//! 1. Ask the surface for a declared positioning mode. Hosts that know it
//!    answer directly and no measurement happens.
//! 2. If the leading offset is `auto` while the trailing offset is set, the
//!    element is trailing-anchored.
//! 3. Otherwise, inside a [`MeasureScope`], read the leading offset, force a
//!    tiny extent, and read it again. A shifted leading offset means the
//!    offset was being derived from the trailing edge.
//!
//! The scope restores the original declared extent and leaves measurement
//! mode on drop, so the caller observes no change.

use std::ops::{Deref, DerefMut};

use crate::surface::{Axis, ElementId, Surface};

/// Extent forced on the element while probing.
pub const PROBE_EXTENT: f64 = 1.0;

/// Which edge an element's stored offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnchorMode {
    /// Offset measured from the left/top edge.
    #[default]
    Leading,
    /// Offset measured from the right/bottom edge.
    Trailing,
}

impl AnchorMode {
    #[inline]
    #[must_use]
    pub const fn is_trailing(self) -> bool {
        matches!(self, Self::Trailing)
    }
}

/// Anchor modes for both axes, latched at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Anchors {
    pub horizontal: AnchorMode,
    pub vertical: AnchorMode,
}

impl Anchors {
    #[must_use]
    pub const fn new(horizontal: AnchorMode, vertical: AnchorMode) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Measurement-mode borrow of a surface that restores one declared extent.
///
/// Dereferences to the surface so probes read through it.
pub struct MeasureScope<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    el: ElementId,
    axis: Axis,
    original: Option<f64>,
}

impl<'a, S: Surface + ?Sized> MeasureScope<'a, S> {
    /// Enter measurement mode and remember the declared extent of `el`.
    pub fn enter(surface: &'a mut S, el: ElementId, axis: Axis) -> Self {
        let original = surface.declared_extent(el, axis);
        surface.set_measuring(true);
        Self {
            surface,
            el,
            axis,
            original,
        }
    }

    /// The declared extent at entry.
    #[must_use]
    pub fn original_extent(&self) -> Option<f64> {
        self.original
    }

    /// Force a temporary extent.
    pub fn force_extent(&mut self, extent: f64) {
        self.surface
            .set_declared_extent(self.el, self.axis, Some(extent));
    }
}

impl<S: Surface + ?Sized> Deref for MeasureScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for MeasureScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for MeasureScope<'_, S> {
    fn drop(&mut self) {
        self.surface
            .set_declared_extent(self.el, self.axis, self.original);
        self.surface.set_measuring(false);
    }
}

/// Determine the anchor mode of `el` along `axis`.
pub fn probe_anchor<S: Surface + ?Sized>(surface: &mut S, el: ElementId, axis: Axis) -> AnchorMode {
    probe_anchor_with(surface, el, axis, PROBE_EXTENT)
}

/// [`probe_anchor`] with an explicit probe extent.
pub fn probe_anchor_with<S: Surface + ?Sized>(
    surface: &mut S,
    el: ElementId,
    axis: Axis,
    extent: f64,
) -> AnchorMode {
    if let Some(mode) = surface.declared_anchor(el, axis) {
        return mode;
    }

    let (leading, trailing) = axis.edges();
    let before = surface.computed_offset(el, leading);
    if before.is_none() && surface.computed_offset(el, trailing).is_some() {
        return AnchorMode::Trailing;
    }

    let mut scope = MeasureScope::enter(surface, el, axis);
    let probe = if scope.original_extent() == Some(extent) {
        extent + 1.0
    } else {
        extent
    };
    scope.force_extent(probe);
    let after = scope.computed_offset(el, leading);
    drop(scope);

    let mode = if before == after {
        AnchorMode::Leading
    } else {
        AnchorMode::Trailing
    };
    tracing::trace!(
        target: "framedrag::anchor",
        element = el.get(),
        ?axis,
        ?mode,
        "probed anchor mode"
    );
    mode
}

/// Probe both axes.
pub fn probe_anchors<S: Surface + ?Sized>(surface: &mut S, el: ElementId) -> Anchors {
    probe_anchors_with(surface, el, PROBE_EXTENT)
}

/// [`probe_anchors`] with an explicit probe extent.
pub fn probe_anchors_with<S: Surface + ?Sized>(
    surface: &mut S,
    el: ElementId,
    extent: f64,
) -> Anchors {
    Anchors {
        horizontal: probe_anchor_with(surface, el, Axis::Horizontal, extent),
        vertical: probe_anchor_with(surface, el, Axis::Vertical, extent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::testing::{MockSurface, NodeSpec};

    fn surface_with(h: AnchorMode, v: AnchorMode) -> (MockSurface, ElementId) {
        let mut s = MockSurface::new(Rect::from_xywh(0.0, 0.0, 800.0, 600.0));
        let root = s.root();
        let el = s.add(
            root,
            NodeSpec::new(100.0, 50.0, 200.0, 120.0).anchored(h, v),
        );
        (s, el)
    }

    #[test]
    fn leading_anchor_detected() {
        let (mut s, el) = surface_with(AnchorMode::Leading, AnchorMode::Leading);
        assert_eq!(probe_anchors(&mut s, el), Anchors::default());
    }

    #[test]
    fn trailing_anchor_detected_by_measurement() {
        let (mut s, el) = surface_with(AnchorMode::Trailing, AnchorMode::Trailing);
        assert_eq!(
            probe_anchors(&mut s, el),
            Anchors::new(AnchorMode::Trailing, AnchorMode::Trailing)
        );
        assert!(s.probe_count() > 0);
    }

    #[test]
    fn probe_restores_declared_extent() {
        let (mut s, el) = surface_with(AnchorMode::Trailing, AnchorMode::Leading);
        let before_w = s.declared_extent(el, Axis::Horizontal);
        let before_h = s.declared_extent(el, Axis::Vertical);
        probe_anchors(&mut s, el);
        assert_eq!(s.declared_extent(el, Axis::Horizontal), before_w);
        assert_eq!(s.declared_extent(el, Axis::Vertical), before_h);
        assert!(!s.is_measuring());
    }

    #[test]
    fn declared_anchor_skips_probe() {
        let (mut s, el) = surface_with(AnchorMode::Trailing, AnchorMode::Leading);
        s.set_reports_anchors(true);
        assert_eq!(
            probe_anchor(&mut s, el, Axis::Horizontal),
            AnchorMode::Trailing
        );
        assert_eq!(s.probe_count(), 0);
    }

    #[test]
    fn probe_extent_equal_to_current_still_detects() {
        let (mut s, el) = surface_with(AnchorMode::Trailing, AnchorMode::Leading);
        s.set_declared_extent(el, Axis::Horizontal, Some(PROBE_EXTENT));
        assert_eq!(
            probe_anchor(&mut s, el, Axis::Horizontal),
            AnchorMode::Trailing
        );
        assert_eq!(s.declared_extent(el, Axis::Horizontal), Some(PROBE_EXTENT));
    }
}
