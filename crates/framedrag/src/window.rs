#![forbid(unsafe_code)]

//! Window composite: move and resize on one element.
//!
//! [`attach_window`] installs a resize listener and a move listener on the
//! same target and ties them together:
//!
//! ```text
//!   pointer over a grip ──► resizing = true ──► move presses are vetoed
//!   pointer leaves grips ──► resizing = false
//! ```
//!
//! Both listeners read and write one shared [`GeometryState`], so a move
//! after a resize starts from the resized size and vice versa. Setting the
//! handle disabled vetoes new sessions of either kind.

use std::cell::Cell;
use std::rc::Rc;

use framedrag_core::geometry::GeometryState;
use framedrag_core::surface::{ElementId, Surface, resolve_target};

use crate::attrs::WindowAttrs;
use crate::hub::{DetachHandle, Hub};
use crate::movable::{MovableOptions, start_movable};
use crate::resizeable::{ResizeableOptions, start_resizeable, stop_resizeable};
use crate::shared::{DisabledFlag, SharedGeometry};

/// What to attach and how.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowSpec {
    /// Selector of the target inside the host; the host itself by default.
    pub selector: Option<String>,
    pub attrs: WindowAttrs,
    pub no_move: bool,
    pub no_resize: bool,
    /// Initial geometry; read from the surface when absent.
    pub rect: Option<GeometryState>,
}

impl WindowSpec {
    #[must_use]
    pub fn new(attrs: WindowAttrs) -> Self {
        Self {
            attrs,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn no_move(mut self) -> Self {
        self.no_move = true;
        self
    }

    #[must_use]
    pub fn no_resize(mut self) -> Self {
        self.no_resize = true;
        self
    }

    #[must_use]
    pub fn rect(mut self, rect: GeometryState) -> Self {
        self.rect = Some(rect);
        self
    }
}

/// Live state of an attached window.
#[derive(Debug, Clone)]
pub struct WindowHandle {
    target: ElementId,
    movable: Option<DetachHandle>,
    resizeable: bool,
    resizing: Rc<Cell<bool>>,
    disabled: DisabledFlag,
    rect: SharedGeometry,
}

impl WindowHandle {
    /// The element that moves and resizes.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Veto (or re-allow) new move and resize sessions.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Whether the pointer currently rests on a resize grip.
    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.resizing.get()
    }

    /// Current shared geometry.
    #[must_use]
    pub fn rect(&self) -> GeometryState {
        self.rect.get()
    }

    /// The shared geometry cell itself.
    #[must_use]
    pub fn geometry(&self) -> &SharedGeometry {
        &self.rect
    }
}

/// Attach the composite to `host` (or to the element `spec.selector`
/// resolves to inside it).
pub fn attach_window<S: Surface + 'static>(
    hub: &mut Hub<S>,
    host: ElementId,
    spec: WindowSpec,
) -> WindowHandle {
    let target = resolve_target(hub.surface(), host, spec.selector.as_deref());
    let initial = spec.rect.unwrap_or_else(|| {
        let surface = hub.surface();
        let (x, y) = surface.translate(target);
        let r = surface.bounding_rect(target).unwrap_or_default();
        GeometryState::sized(x, y, r.width(), r.height())
    });

    let resizing = Rc::new(Cell::new(false));
    let disabled = DisabledFlag::new();
    let rect = SharedGeometry::new(initial);
    let bounds = spec.attrs.bounds();

    let resizeable = !spec.no_resize;
    if resizeable {
        let (hover, blur) = (Rc::clone(&resizing), Rc::clone(&resizing));
        start_resizeable(
            hub,
            target,
            ResizeableOptions::new()
                .constraints(spec.attrs.constraints())
                .disabled(&disabled)
                .on_hover(move || hover.set(true))
                .on_blur(move || blur.set(false))
                .pointer_bounds(move || bounds)
                .tracked(&rect),
        );
    }

    let movable = (!spec.no_move).then(|| {
        let busy = Rc::clone(&resizing);
        let mut options = MovableOptions::new()
            .can_start(move |_| !busy.get())
            .disabled(&disabled)
            .pointer_bounds(move || bounds)
            .tracked(&rect);
        if let Some(header) = spec.attrs.header.as_deref() {
            options = options.header(header);
        }
        start_movable(hub, target, options)
    });

    tracing::debug!(
        target: "framedrag::hub",
        element = target.get(),
        movable = movable.is_some(),
        resizeable,
        "window attached"
    );
    WindowHandle {
        target,
        movable,
        resizeable,
        resizing,
        disabled,
        rect,
    }
}

/// Remove both listeners of a window.
///
/// Returns `false` when nothing was attached any more.
pub fn detach_window<S: Surface>(hub: &mut Hub<S>, handle: &WindowHandle) -> bool {
    let moved = handle.movable.is_some_and(|h| hub.detach(h));
    let resized = handle.resizeable && stop_resizeable(hub, handle.target);
    handle.resizing.set(false);
    moved || resized
}
