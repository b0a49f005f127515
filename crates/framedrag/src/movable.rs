#![forbid(unsafe_code)]

//! Drag-to-move attachment.
//!
//! [`start_movable`] installs a listener that starts a move session when the
//! primary button goes down on the target's handle (the header sub-element,
//! or the whole target), feeds coalesced pointer samples through the
//! [`DragMachine`], and writes each reported offset back through
//! `set_move_state`.
//!
//! # Usage
//!
//! ```ignore
//! let handle = start_movable(&mut hub, dialog, MovableOptions::new().header(".title"));
//! // ... later
//! hub.detach(handle);
//! ```

use framedrag_core::bounds::{BoundsResolver, resolve_travel};
use framedrag_core::coalesce::Coalescer;
use framedrag_core::event::{PointerButton, PointerEvent, PointerEventKind};
use framedrag_core::geometry::{Bounds, GeometryState, Point};
use framedrag_core::overlay::resolve_overlays;
use framedrag_core::session::{DragEffect, DragMachine, SessionPlan};
use framedrag_core::surface::{ElementId, Surface, resolve_target};
use web_time::{Duration, Instant};

use crate::hub::{Cx, DetachHandle, Hub, Listener};
use crate::shared::{DisabledFlag, SharedGeometry, apply_state};

/// Press predicate.
pub type CanStart = Box<dyn FnMut(&PointerEvent) -> bool>;
/// Called once a session starts.
pub type OnStart = Box<dyn FnMut(&PointerEvent)>;
/// Called when a session ends, with the last reported state.
pub type OnEnd = Box<dyn FnMut(GeometryState)>;
/// Supplies pointer-travel insets at session start.
pub type PointerBounds = Box<dyn FnMut() -> Bounds>;
/// Reads the start state of an element.
pub type GetState<S> = Box<dyn FnMut(&S, ElementId) -> GeometryState>;
/// Applies a reported state to an element.
pub type SetState<S> = Box<dyn FnMut(&mut S, ElementId, GeometryState)>;

/// Options for [`start_movable`]. Every field is optional.
pub struct MovableOptions<S> {
    pub header_selector: Option<String>,
    pub can_start: Option<CanStart>,
    pub on_start: Option<OnStart>,
    pub on_end: Option<OnEnd>,
    pub pointer_bounds: Option<PointerBounds>,
    pub get_start_state: Option<GetState<S>>,
    pub set_move_state: Option<SetState<S>>,
    /// Element whose offset parent bounds the travel; the target by default.
    pub bounds_target: Option<ElementId>,
    pub disabled: Option<DisabledFlag>,
}

impl<S> Default for MovableOptions<S> {
    fn default() -> Self {
        Self {
            header_selector: None,
            can_start: None,
            on_start: None,
            on_end: None,
            pointer_bounds: None,
            get_start_state: None,
            set_move_state: None,
            bounds_target: None,
            disabled: None,
        }
    }
}

impl<S> std::fmt::Debug for MovableOptions<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovableOptions")
            .field("header_selector", &self.header_selector)
            .field("bounds_target", &self.bounds_target)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl<S> MovableOptions<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn header(mut self, selector: impl Into<String>) -> Self {
        self.header_selector = Some(selector.into());
        self
    }

    #[must_use]
    pub fn can_start(mut self, f: impl FnMut(&PointerEvent) -> bool + 'static) -> Self {
        self.can_start = Some(Box::new(f));
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

    #[must_use]
    pub fn bounds_target(mut self, el: ElementId) -> Self {
        self.bounds_target = Some(el);
        self
    }

    /// Veto new sessions while `flag` is set.
    #[must_use]
    pub fn disabled(mut self, flag: &DisabledFlag) -> Self {
        self.disabled = Some(flag.clone());
        self
    }
}

impl<S: Surface> MovableOptions<S> {
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

/// Listener driving one movable target.
pub struct MovableListener<S> {
    el: ElementId,
    handle_el: ElementId,
    options: MovableOptions<S>,
    machine: DragMachine,
    pending: Coalescer<Point>,
}

impl<S: Surface> MovableListener<S> {
    fn new(surface: &S, el: ElementId, options: MovableOptions<S>, move_window: Duration) -> Self {
        let handle_el = resolve_target(surface, el, options.header_selector.as_deref());
        Self {
            el,
            handle_el,
            options,
            machine: DragMachine::new(),
            pending: Coalescer::new(move_window),
        }
    }

    fn pressed_on_handle(&self, surface: &S, event: &PointerEvent) -> bool {
        let hit = event.target.or_else(|| surface.element_at(event.position));
        hit.is_some_and(|hit| surface.contains(self.handle_el, hit))
    }

    fn start(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent) {
        if self.machine.is_active() || !self.pressed_on_handle(cx.surface, event) {
            return;
        }
        if self.options.disabled.as_ref().is_some_and(DisabledFlag::get) {
            return;
        }
        if let Some(can_start) = self.options.can_start.as_mut()
            && !can_start(event)
        {
            return;
        }

        let start = match self.options.get_start_state.as_mut() {
            Some(get) => get(cx.surface, self.el),
            None => {
                let (x, y) = cx.surface.translate(self.el);
                GeometryState::offset(x, y)
            }
        };
        let bounds_target = self.options.bounds_target.unwrap_or(self.el);
        let bounds = self
            .options
            .pointer_bounds
            .as_mut()
            .map_or_else(Bounds::default, |f| f());
        let travel = resolve_travel(cx.surface, bounds_target, bounds);
        let overlays = cx
            .surface
            .offset_parent(bounds_target)
            .map(|container| {
                resolve_overlays(cx.surface, container, self.el, cx.config.overlay_grid_pitch)
            })
            .unwrap_or_default();
        let resolver = BoundsResolver::for_move(travel, overlays, event.position);

        let t = self
            .machine
            .begin(event.position, start, SessionPlan::Move, resolver, cx.flags);
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
                None => cx.surface.set_translate(self.el, state.x, state.y),
            }
        }
    }

    fn drain(&mut self, cx: &mut Cx<'_, S>, now: Option<Instant>) {
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
        self.drain(cx, None);
        let t = self.machine.release();
        if let DragEffect::Ended { last_state } = t.effect
            && let Some(on_end) = self.options.on_end.as_mut()
        {
            on_end(last_state);
        }
    }
}

impl<S: Surface> Listener<S> for MovableListener<S> {
    fn on_pointer(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent, now: Instant) {
        match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => self.start(cx, event),
            PointerEventKind::Moved if self.machine.is_active() => {
                self.pending.push(event.position, now);
            }
            PointerEventKind::Up(PointerButton::Primary) if self.machine.is_active() => {
                self.finish(cx);
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, cx: &mut Cx<'_, S>, now: Instant) {
        self.drain(cx, Some(now));
    }

    fn teardown(&mut self, _cx: &mut Cx<'_, S>) {
        self.pending.clear();
        if let Some(t) = self.machine.force_cancel()
            && let DragEffect::Canceled { last_state } = t.effect
            && let Some(on_end) = self.options.on_end.as_mut()
        {
            on_end(last_state);
        }
    }
}

/// Make `el` draggable. Returns the handle that removes the listener.
pub fn start_movable<S: Surface + 'static>(
    hub: &mut Hub<S>,
    el: ElementId,
    options: MovableOptions<S>,
) -> DetachHandle {
    let window = hub.config().move_window();
    let listener = MovableListener::new(hub.surface(), el, options, window);
    hub.install(Box::new(listener))
}
