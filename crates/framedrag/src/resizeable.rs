#![forbid(unsafe_code)]

//! Edge/corner resize attachment.
//!
//! The listener watches every pointer move (coalesced over the hover
//! window) and classifies it against the target's rectangle. Entering a
//! grip sets the grip cursor on the target and on the display, and fires
//! `on_hover`; leaving every grip resets the cursor and fires `on_blur`.
//!
//! A primary press while a grip is latched starts a resize session. At that
//! point the anchor modes are probed once, the travel rectangle is resolved
//! with the side opposite the grip lifted, and each coalesced sample is
//! routed through the resize engine.
//!
//! Targets are registered in the hub's registry, so [`stop_resizeable`]
//! finds the listener by element identity.

use framedrag_core::anchor::probe_anchors_with;
use framedrag_core::bounds::{BoundsResolver, resolve_travel};
use framedrag_core::coalesce::Coalescer;
use framedrag_core::direction::{CursorStyle, Direction, classify_with_buffer};
use framedrag_core::event::{PointerButton, PointerEvent, PointerEventKind};
use framedrag_core::geometry::{Bounds, GeometryState, Point};
use framedrag_core::resize::Constraints;
use framedrag_core::session::{DragEffect, DragMachine, SessionPlan};
use framedrag_core::surface::{ElementId, Surface};
use web_time::Instant;

use crate::hub::{Cx, Hub, Listener};
use crate::movable::{CanStart, GetState, OnEnd, OnStart, PointerBounds, SetState};
use crate::shared::{DisabledFlag, SharedGeometry, apply_state};

/// Hover/blur notification.
pub type OnHover = Box<dyn FnMut()>;

/// Options for [`start_resizeable`]. Every field is optional.
pub struct ResizeableOptions<S> {
    pub can_start: Option<CanStart>,
    pub on_hover: Option<OnHover>,
    pub on_blur: Option<OnHover>,
    pub on_start: Option<OnStart>,
    pub on_end: Option<OnEnd>,
    pub pointer_bounds: Option<PointerBounds>,
    pub constraints: Constraints,
    pub get_start_state: Option<GetState<S>>,
    pub set_move_state: Option<SetState<S>>,
    pub disabled: Option<DisabledFlag>,
}

impl<S> Default for ResizeableOptions<S> {
    fn default() -> Self {
        Self {
            can_start: None,
            on_hover: None,
            on_blur: None,
            on_start: None,
            on_end: None,
            pointer_bounds: None,
            constraints: Constraints::default(),
            get_start_state: None,
            set_move_state: None,
            disabled: None,
        }
    }
}

impl<S> std::fmt::Debug for ResizeableOptions<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeableOptions")
            .field("constraints", &self.constraints)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl<S> ResizeableOptions<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn can_start(mut self, f: impl FnMut(&PointerEvent) -> bool + 'static) -> Self {
        self.can_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_hover(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_hover = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_blur(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_start(mut self, f: impl FnMut(&PointerEvent) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_end(mut self, f: impl FnMut(GeometryState) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn pointer_bounds(mut self, f: impl FnMut() -> Bounds + 'static) -> Self {
        self.pointer_bounds = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn get_start_state(
        mut self,
        f: impl FnMut(&S, ElementId) -> GeometryState + 'static,
    ) -> Self {
        self.get_start_state = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn set_move_state(mut self, f: impl FnMut(&mut S, ElementId, GeometryState) + 'static) -> Self {
        self.set_move_state = Some(Box::new(f));
        self
    }

    /// Veto new sessions (and grip hovering) while `flag` is set.
    #[must_use]
    pub fn disabled(mut self, flag: &DisabledFlag) -> Self {
        self.disabled = Some(flag.clone());
        self
    }
}

impl<S: Surface> ResizeableOptions<S> {
    /// Start from and report into `state`, writing each report to the surface.
    #[must_use]
    pub fn tracked(self, state: &SharedGeometry) -> Self {
        let (get, set) = (state.clone(), state.clone());
        self.get_start_state(move |_, _| get.get())
            .set_move_state(move |surface, el, s| {
                set.set(s);
                apply_state(surface, el, s);
            })
    }
}

/// Listener driving one resizable target.
pub struct ResizeableListener<S> {
    el: ElementId,
    options: ResizeableOptions<S>,
    machine: DragMachine,
    hover: Coalescer<PointerEvent>,
    pending: Coalescer<Point>,
    current: Option<Direction>,
}

impl<S: Surface> ResizeableListener<S> {
    fn set_cursor(&self, cx: &mut Cx<'_, S>, cursor: CursorStyle) {
        cx.flags.set_cursor(cursor);
        cx.surface.set_element_cursor(self.el, cursor);
    }

    fn allowed(&mut self, event: &PointerEvent) -> bool {
        if self.options.disabled.as_ref().is_some_and(DisabledFlag::get) {
            return false;
        }
        self.options.can_start.as_mut().is_none_or(|f| f(event))
    }

    /// Latch `direction`, updating cursors and firing hover/blur on change.
    fn latch(&mut self, cx: &mut Cx<'_, S>, direction: Option<Direction>) {
        if direction == self.current {
            return;
        }
        self.current = direction;
        self.set_cursor(cx, CursorStyle::for_direction(direction));
        tracing::trace!(target: "framedrag::hub", element = self.el.get(), ?direction, "resize grip changed");
        let notify = if direction.is_some() {
            self.options.on_hover.as_mut()
        } else {
            self.options.on_blur.as_mut()
        };
        if let Some(f) = notify {
            f();
        }
    }

    /// Re-classify a hover sample; sessions in progress keep their grip.
    ///
    /// A vetoed sample releases any latched grip, so `on_blur` always
    /// follows an `on_hover`.
    fn classify_hover(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent) {
        if self.machine.is_active() {
            return;
        }
        if !self.allowed(event) {
            self.latch(cx, None);
            self.set_cursor(cx, CursorStyle::Default);
            return;
        }
        let Some(rect) = cx.surface.bounding_rect(self.el) else {
            return;
        };
        let direction = classify_with_buffer(event.position, &rect, cx.config.edge_buffer);
        self.latch(cx, direction);
    }

    fn start(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent) {
        let Some(direction) = self.current else {
            return;
        };
        if self.machine.is_active() || !self.allowed(event) {
            return;
        }

        let rect = cx.surface.bounding_rect(self.el).unwrap_or_default();
        let start = match self.options.get_start_state.as_mut() {
            Some(get) => get(cx.surface, self.el),
            None => {
                let (x, y) = cx.surface.translate(self.el);
                GeometryState::sized(x, y, rect.width(), rect.height())
            }
        }
        .with_size_fallback(&rect);

        let anchors = probe_anchors_with(cx.surface, self.el, cx.config.probe_extent);
        let constraints = self
            .options
            .constraints
            .with_min_fallbacks(cx.config.min_width_fallback, cx.config.min_height_fallback);
        let bounds = self
            .options
            .pointer_bounds
            .as_mut()
            .map_or_else(Bounds::default, |f| f());
        let travel = resolve_travel(cx.surface, self.el, bounds);
        let resolver = BoundsResolver::for_resize(travel, direction, event.position);
        let plan = SessionPlan::Resize {
            direction,
            anchors,
            constraints,
        };

        let t = self
            .machine
            .begin(event.position, start, plan, resolver, cx.flags);
        if matches!(t.effect, DragEffect::Started { .. })
            && let Some(on_start) = self.options.on_start.as_mut()
        {
            on_start(event);
        }
    }

    fn apply(&mut self, cx: &mut Cx<'_, S>, pointer: Point) {
        let t = self.machine.pointer_move(pointer);
        if let DragEffect::Moved { state } = t.effect {
            match self.options.set_move_state.as_mut() {
                Some(set) => set(cx.surface, self.el, state),
                None => apply_state(&mut *cx.surface, self.el, state),
            }
        }
    }

    fn drain_moves(&mut self, cx: &mut Cx<'_, S>, now: Option<Instant>) {
        let mut due = Vec::with_capacity(2);
        match now {
            Some(now) => self.pending.drain_due(now, |p| due.push(p)),
            None => self.pending.flush(|p| due.push(p)),
        };
        for p in due {
            self.apply(cx, p);
        }
    }

    fn finish(&mut self, cx: &mut Cx<'_, S>) {
        self.drain_moves(cx, None);
        let t = self.machine.release();
        if let DragEffect::Ended { last_state } = t.effect
            && let Some(on_end) = self.options.on_end.as_mut()
        {
            on_end(last_state);
        }
    }
}

impl<S: Surface> Listener<S> for ResizeableListener<S> {
    fn on_pointer(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent, now: Instant) {
        match event.kind {
            PointerEventKind::Moved => {
                if self.machine.is_active() {
                    self.pending.push(event.position, now);
                } else {
                    self.hover.push(*event, now);
                }
            }
            PointerEventKind::Down(PointerButton::Primary) => self.start(cx, event),
            PointerEventKind::Up(PointerButton::Primary) if self.machine.is_active() => {
                self.finish(cx);
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, cx: &mut Cx<'_, S>, now: Instant) {
        let mut hovered = Vec::with_capacity(2);
        self.hover.drain_due(now, |e| hovered.push(e));
        for e in &hovered {
            self.classify_hover(cx, e);
        }
        self.drain_moves(cx, Some(now));
    }

    fn teardown(&mut self, cx: &mut Cx<'_, S>) {
        self.hover.clear();
        self.pending.clear();
        if let Some(t) = self.machine.force_cancel()
            && let DragEffect::Canceled { last_state } = t.effect
            && let Some(on_end) = self.options.on_end.as_mut()
        {
            on_end(last_state);
        }
        if self.current.take().is_some() {
            self.set_cursor(cx, CursorStyle::Default);
        }
    }
}

/// Make `el` resizable from its edges and corners.
///
/// A target that is already resizable is left as is.
pub fn start_resizeable<S: Surface + 'static>(
    hub: &mut Hub<S>,
    el: ElementId,
    options: ResizeableOptions<S>,
) {
    if hub.registry().is_registered(el) {
        tracing::debug!(target: "framedrag::hub", element = el.get(), "target already resizable");
        return;
    }
    let listener = ResizeableListener {
        el,
        options,
        machine: DragMachine::new(),
        hover: Coalescer::new(hub.config().hover_window()),
        pending: Coalescer::new(hub.config().move_window()),
        current: None,
    };
    hub.install_for(el, Box::new(listener));
}

/// Remove the resize listener from `el`.
///
/// Returns `false` when `el` was not resizable.
pub fn stop_resizeable<S: Surface>(hub: &mut Hub<S>, el: ElementId) -> bool {
    hub.detach_target(el) > 0
}
