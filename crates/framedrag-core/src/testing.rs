#![forbid(unsafe_code)]

//! In-memory [`Surface`] for tests.
//!
//! [`MockSurface`] models a tree of absolutely positioned boxes. Each node
//! is placed inside its parent either from the parent's leading edges or
//! from its trailing edges ([`AnchorMode`]), so growing a trailing-anchored
//! node shifts its computed leading offset exactly as a browser would. Paint
//! order is insertion order: the most recently added node is topmost.
//!
//! Enabled for this crate's own tests and, through the `test-helpers`
//! feature, for dependent crates.

use crate::anchor::AnchorMode;
use crate::direction::CursorStyle;
use crate::geometry::{Point, Rect};
use crate::surface::{Axis, Edge, ElementId, Surface};

/// Placement of a new node relative to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    horizontal: AnchorMode,
    vertical: AnchorMode,
    classes: Vec<String>,
}

impl NodeSpec {
    /// A leading-anchored node at `(left, top)` inside its parent.
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            horizontal: AnchorMode::Leading,
            vertical: AnchorMode::Leading,
            classes: Vec::new(),
        }
    }

    /// Keep the initial placement but anchor it on the given edges.
    #[must_use]
    pub fn anchored(mut self, horizontal: AnchorMode, vertical: AnchorMode) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    /// Add a class name for [`Surface::query_selector`].
    #[must_use]
    pub fn class(mut self, name: &str) -> Self {
        self.classes.push(name.to_owned());
        self
    }
}

#[derive(Debug, Clone)]
struct AxisLayout {
    anchor: AnchorMode,
    inset: f64,
    intrinsic: f64,
    declared: Option<f64>,
}

impl AxisLayout {
    fn extent(&self) -> f64 {
        self.declared.unwrap_or(self.intrinsic)
    }

    /// Leading position inside a parent span of `span`.
    fn leading(&self, span: f64) -> f64 {
        match self.anchor {
            AnchorMode::Leading => self.inset,
            AnchorMode::Trailing => span - self.inset - self.extent(),
        }
    }

    fn trailing(&self, span: f64) -> f64 {
        span - self.leading(span) - self.extent()
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    h: AxisLayout,
    v: AxisLayout,
    translate: (f64, f64),
    classes: Vec<String>,
    cursor: CursorStyle,
}

/// Tree-of-boxes surface with call counters.
#[derive(Debug, Clone)]
pub struct MockSurface {
    viewport: Rect,
    nodes: Vec<Node>,
    reports_anchors: bool,
    measuring: bool,
    probe_count: usize,
    translate_writes: usize,
}

impl MockSurface {
    /// A surface whose root node covers `viewport`.
    #[must_use]
    pub fn new(viewport: Rect) -> Self {
        let axis = |inset, intrinsic| AxisLayout {
            anchor: AnchorMode::Leading,
            inset,
            intrinsic,
            declared: None,
        };
        Self {
            viewport,
            nodes: vec![Node {
                parent: None,
                h: axis(0.0, viewport.width()),
                v: axis(0.0, viewport.height()),
                translate: (0.0, 0.0),
                classes: Vec::new(),
                cursor: CursorStyle::Default,
            }],
            reports_anchors: false,
            measuring: false,
            probe_count: 0,
            translate_writes: 0,
        }
    }

    #[must_use]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Append a child of `parent`, painted above everything added before.
    pub fn add(&mut self, parent: ElementId, spec: NodeSpec) -> ElementId {
        let parent_rect = self.rect_of(parent);
        let axis = |anchor, lead: f64, size: f64, span: f64| AxisLayout {
            anchor,
            inset: match anchor {
                AnchorMode::Leading => lead,
                AnchorMode::Trailing => span - lead - size,
            },
            intrinsic: size,
            declared: Some(size),
        };
        self.nodes.push(Node {
            parent: Some(parent),
            h: axis(spec.horizontal, spec.left, spec.width, parent_rect.width()),
            v: axis(spec.vertical, spec.top, spec.height, parent_rect.height()),
            translate: (0.0, 0.0),
            classes: spec.classes,
            cursor: CursorStyle::Default,
        });
        ElementId(self.nodes.len() as u64 - 1)
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        usize::try_from(el.get()).ok().and_then(|i| self.nodes.get(i))
    }

    fn node_mut(&mut self, el: ElementId) -> Option<&mut Node> {
        usize::try_from(el.get())
            .ok()
            .and_then(|i| self.nodes.get_mut(i))
    }

    /// Screen rectangle of `el`; an empty rectangle for unknown ids.
    #[must_use]
    pub fn rect_of(&self, el: ElementId) -> Rect {
        self.bounding_rect(el).unwrap_or_default()
    }

    /// Cursor last written to `el`.
    #[must_use]
    pub fn element_cursor(&self, el: ElementId) -> CursorStyle {
        self.node(el).map_or(CursorStyle::Default, |n| n.cursor)
    }

    /// Answer [`Surface::declared_anchor`] directly instead of forcing a probe.
    pub fn set_reports_anchors(&mut self, reports: bool) {
        self.reports_anchors = reports;
    }

    #[must_use]
    pub fn is_measuring(&self) -> bool {
        self.measuring
    }

    /// Number of times measurement mode was entered.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probe_count
    }

    /// Number of `set_translate` calls.
    #[must_use]
    pub fn translate_writes(&self) -> usize {
        self.translate_writes
    }
}

impl Surface for MockSurface {
    fn bounding_rect(&self, el: ElementId) -> Option<Rect> {
        let node = self.node(el)?;
        let Some(parent) = node.parent else {
            return Some(self.viewport);
        };
        let p = self.bounding_rect(parent)?;
        let left = p.left + node.h.leading(p.width());
        let top = p.top + node.v.leading(p.height());
        let (tx, ty) = node.translate;
        Some(Rect::from_xywh(left + tx, top + ty, node.h.extent(), node.v.extent()))
    }

    fn offset_parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el)?.parent
    }

    fn element_at(&self, point: Point) -> Option<ElementId> {
        (0..self.nodes.len())
            .rev()
            .map(|i| ElementId(i as u64))
            .find(|&id| self.bounding_rect(id).is_some_and(|r| r.contains(point)))
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn query_selector(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        let class = selector.strip_prefix('.').unwrap_or(selector);
        (0..self.nodes.len())
            .map(|i| ElementId(i as u64))
            .filter(|&id| id != root && self.contains(root, id))
            .find(|&id| {
                self.node(id)
                    .is_some_and(|n| n.classes.iter().any(|c| c == class))
            })
    }

    fn translate(&self, el: ElementId) -> (f64, f64) {
        self.node(el).map_or((0.0, 0.0), |n| n.translate)
    }

    fn set_translate(&mut self, el: ElementId, x: f64, y: f64) {
        if let Some(n) = self.node_mut(el) {
            n.translate = (x, y);
        }
        self.translate_writes += 1;
    }

    fn set_size(&mut self, el: ElementId, width: f64, height: f64) {
        if let Some(n) = self.node_mut(el) {
            n.h.declared = Some(width);
            n.v.declared = Some(height);
        }
    }

    fn set_element_cursor(&mut self, el: ElementId, cursor: CursorStyle) {
        if let Some(n) = self.node_mut(el) {
            n.cursor = cursor;
        }
    }

    fn computed_offset(&self, el: ElementId, edge: Edge) -> Option<f64> {
        let node = self.node(el)?;
        let parent = node.parent?;
        let p = self.bounding_rect(parent)?;
        Some(match edge {
            Edge::Left => node.h.leading(p.width()),
            Edge::Right => node.h.trailing(p.width()),
            Edge::Top => node.v.leading(p.height()),
            Edge::Bottom => node.v.trailing(p.height()),
        })
    }

    fn declared_extent(&self, el: ElementId, axis: Axis) -> Option<f64> {
        let node = self.node(el)?;
        match axis {
            Axis::Horizontal => node.h.declared,
            Axis::Vertical => node.v.declared,
        }
    }

    fn set_declared_extent(&mut self, el: ElementId, axis: Axis, extent: Option<f64>) {
        if let Some(n) = self.node_mut(el) {
            match axis {
                Axis::Horizontal => n.h.declared = extent,
                Axis::Vertical => n.v.declared = extent,
            }
        }
    }

    fn declared_anchor(&self, el: ElementId, axis: Axis) -> Option<AnchorMode> {
        if !self.reports_anchors {
            return None;
        }
        let node = self.node(el)?;
        Some(match axis {
            Axis::Horizontal => node.h.anchor,
            Axis::Vertical => node.v.anchor,
        })
    }

    fn set_measuring(&mut self, measuring: bool) {
        if measuring && !self.measuring {
            self.probe_count += 1;
        }
        self.measuring = measuring;
    }
}
