#![forbid(unsafe_code)]

//! Host display-tree abstraction.
//!
//! The engine never touches a concrete display tree. Everything it needs to
//! read (rectangles, hit-tests, computed offsets) or write (offsets, sizes,
//! cursors) goes through [`Surface`], implemented by the host binding.
//!
//! # Coordinate contract
//!
//! `bounding_rect` and `element_at` use the same coordinate space as pointer
//! events. `translate` is the element's current visual offset; `computed_offset`
//! is the host's resolved positioning offset on one edge (`None` for `auto`).

use crate::anchor::AnchorMode;
use crate::direction::CursorStyle;
use crate::geometry::{Point, Rect};

/// Opaque identity of a node in the host display tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// `(leading, trailing)` edges for this axis.
    #[must_use]
    pub const fn edges(self) -> (Edge, Edge) {
        match self {
            Self::Horizontal => (Edge::Left, Edge::Right),
            Self::Vertical => (Edge::Top, Edge::Bottom),
        }
    }
}

/// One side of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Read/write access to the host display tree.
///
/// Methods that mutate visual state take `&mut self`; queries take `&self`.
pub trait Surface {
    /// Screen rectangle of an element, or `None` if it is not laid out.
    fn bounding_rect(&self, el: ElementId) -> Option<Rect>;

    /// Nearest positioned ancestor used as the containing block.
    fn offset_parent(&self, el: ElementId) -> Option<ElementId>;

    /// Topmost element painted at `point`.
    fn element_at(&self, point: Point) -> Option<ElementId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// First descendant of `root` matching `selector`.
    fn query_selector(&self, root: ElementId, selector: &str) -> Option<ElementId>;

    /// Current translate offset of an element.
    fn translate(&self, el: ElementId) -> (f64, f64);

    /// Apply a translate offset.
    fn set_translate(&mut self, el: ElementId, x: f64, y: f64);

    /// Apply an explicit size.
    fn set_size(&mut self, el: ElementId, width: f64, height: f64);

    /// Set the cursor shown over one element.
    fn set_element_cursor(&mut self, el: ElementId, cursor: CursorStyle);

    /// Resolved positioning offset on `edge`; `None` means `auto`.
    fn computed_offset(&self, el: ElementId, edge: Edge) -> Option<f64>;

    /// Declared (inline) extent along `axis`, if any.
    fn declared_extent(&self, el: ElementId, axis: Axis) -> Option<f64>;

    /// Overwrite or clear the declared extent along `axis`.
    fn set_declared_extent(&mut self, el: ElementId, axis: Axis, extent: Option<f64>);

    /// Positioning mode declared by the host, when it can report one
    /// directly. Returning `Some` skips measurement probing entirely.
    fn declared_anchor(&self, _el: ElementId, _axis: Axis) -> Option<AnchorMode> {
        None
    }

    /// Enter or leave a non-rendering measurement mode. Hosts that cannot
    /// suppress paint may ignore this.
    fn set_measuring(&mut self, _measuring: bool) {}
}

/// Resolve an optional sub-element selector, falling back to `el` itself.
pub fn resolve_target<S: Surface + ?Sized>(
    surface: &S,
    el: ElementId,
    selector: Option<&str>,
) -> ElementId {
    selector
        .filter(|s| !s.is_empty())
        .and_then(|s| surface.query_selector(el, s))
        .unwrap_or(el)
}
