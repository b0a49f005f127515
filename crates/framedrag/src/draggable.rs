#![forbid(unsafe_code)]

//! Raw drag binding.
//!
//! [`start_draggable`] reports pointer deltas and nothing else: no travel
//! bounds, no overlays, no surface writes. Each coalesced sample calls
//! `on_move(dx, dy, start)` with the delta from the press point, and the
//! accumulated offset (the offset at press plus that delta) is kept in a
//! [`SharedGeometry`] the host can read between gestures.

use framedrag_core::bounds::BoundsResolver;
use framedrag_core::coalesce::Coalescer;
use framedrag_core::event::{PointerButton, PointerEvent, PointerEventKind};
use framedrag_core::geometry::{GeometryState, Point};
use framedrag_core::session::{DragEffect, DragMachine, SessionPlan};
use framedrag_core::surface::{ElementId, Surface};
use web_time::Instant;

use crate::hub::{Cx, DetachHandle, Hub, Listener};
use crate::movable::{CanStart, OnEnd, OnStart};
use crate::shared::{DisabledFlag, SharedGeometry};

/// Delta callback: `(dx, dy, press point)`.
pub type OnMove = Box<dyn FnMut(f64, f64, Point)>;

/// Options for [`start_draggable`].
#[derive(Default)]
pub struct DraggableOptions {
    pub can_start: Option<CanStart>,
    pub on_start: Option<OnStart>,
    pub on_move: Option<OnMove>,
    /// Called on release (or detach) with the accumulated offset.
    pub on_end: Option<OnEnd>,
    pub disabled: Option<DisabledFlag>,
    /// Accumulated offset; a fresh one at the origin when absent.
    pub offset: Option<SharedGeometry>,
}

impl std::fmt::Debug for DraggableOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraggableOptions")
            .field("disabled", &self.disabled)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl DraggableOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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
    pub fn on_move(mut self, f: impl FnMut(f64, f64, Point) + 'static) -> Self {
        self.on_move = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_end(mut self, f: impl FnMut(GeometryState) + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn disabled(mut self, flag: &DisabledFlag) -> Self {
        self.disabled = Some(flag.clone());
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: &SharedGeometry) -> Self {
        self.offset = Some(offset.clone());
        self
    }
}

/// Listener driving one raw drag binding.
pub struct DraggableListener {
    el: ElementId,
    options: DraggableOptions,
    offset: SharedGeometry,
    machine: DragMachine,
    pending: Coalescer<Point>,
}

impl DraggableListener {
    fn start<S: Surface + ?Sized>(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent) {
        if self.machine.is_active() {
            return;
        }
        let hit = event.target.or_else(|| cx.surface.element_at(event.position));
        if !hit.is_some_and(|hit| cx.surface.contains(self.el, hit)) {
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
        let resolver = BoundsResolver::passthrough(event.position);
        let t = self.machine.begin(
            event.position,
            self.offset.get(),
            SessionPlan::Move,
            resolver,
            cx.flags,
        );
        if matches!(t.effect, DragEffect::Started { .. })
            && let Some(on_start) = self.options.on_start.as_mut()
        {
            on_start(event);
        }
    }

    fn apply(&mut self, pointer: Point) {
        let Some((start_pointer, start)) = self
            .machine
            .session()
            .map(|s| (s.start_pointer(), s.start_state()))
        else {
            return;
        };
        if let DragEffect::Moved { state } = self.machine.pointer_move(pointer).effect {
            self.offset.set(state);
            if let Some(on_move) = self.options.on_move.as_mut() {
                on_move(state.x - start.x, state.y - start.y, start_pointer);
            }
        }
    }

    fn drain(&mut self, now: Option<Instant>) {
        let mut due = Vec::with_capacity(2);
        match now {
            Some(now) => self.pending.drain_due(now, |p| due.push(p)),
            None => self.pending.flush(|p| due.push(p)),
        };
        for p in due {
            self.apply(p);
        }
    }
}

impl<S: Surface> Listener<S> for DraggableListener {
    fn on_pointer(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent, now: Instant) {
        match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => self.start(cx, event),
            PointerEventKind::Moved if self.machine.is_active() => {
                self.pending.push(event.position, now);
            }
            PointerEventKind::Up(PointerButton::Primary) if self.machine.is_active() => {
                self.drain(None);
                if let DragEffect::Ended { last_state } = self.machine.release().effect
                    && let Some(on_end) = self.options.on_end.as_mut()
                {
                    on_end(last_state);
                }
            }
            _ => {}
        }
    }

    fn on_tick(&mut self, _cx: &mut Cx<'_, S>, now: Instant) {
        self.drain(Some(now));
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

/// Report drag deltas for presses on `el`. Returns the handle that removes
/// the listener.
pub fn start_draggable<S: Surface + 'static>(
    hub: &mut Hub<S>,
    el: ElementId,
    mut options: DraggableOptions,
) -> DetachHandle {
    let offset = options.offset.take().unwrap_or_default();
    let listener = DraggableListener {
        el,
        options,
        offset,
        machine: DragMachine::new(),
        pending: Coalescer::new(hub.config().move_window()),
    };
    hub.install(Box::new(listener))
}
