#![forbid(unsafe_code)]

//! Listener hub: the single entry point for host pointer events.
//!
//! The host owns one [`Hub`] per display surface and forwards every pointer
//! event to [`Hub::dispatch`] and every timer tick to [`Hub::tick`].
//! Attachments (`start_movable`, `start_resizeable`, windows) install
//! [`Listener`]s and receive a [`DetachHandle`] back.
//!
//! # Invariants
//!
//! 1. Listeners run in installation order.
//! 2. [`Hub::detach`] runs the listener's teardown exactly once; a second
//!    call with the same handle returns `false` and does nothing.
//! 3. A listener never observes another listener's borrow of the surface:
//!    each call receives the surface through its own [`Cx`].

use framedrag_core::config::EngineConfig;
use framedrag_core::event::PointerEvent;
use framedrag_core::flags::SurfaceFlags;
use framedrag_core::surface::{ElementId, Surface};
use web_time::Instant;

use crate::registry::Registry;

/// Identifies one installed listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetachHandle(pub(crate) u64);

impl DetachHandle {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Everything a listener may touch during one callback.
pub struct Cx<'a, S: ?Sized> {
    pub surface: &'a mut S,
    pub flags: &'a SurfaceFlags,
    pub config: &'a EngineConfig,
}

/// A pointer-event consumer installed on a [`Hub`].
pub trait Listener<S: Surface + ?Sized> {
    /// Handle one pointer event.
    fn on_pointer(&mut self, cx: &mut Cx<'_, S>, event: &PointerEvent, now: Instant);

    /// Deliver deferred work whose window has closed.
    fn on_tick(&mut self, _cx: &mut Cx<'_, S>, _now: Instant) {}

    /// Release everything the listener holds. Called once, on detach.
    fn teardown(&mut self, _cx: &mut Cx<'_, S>) {}
}

struct Slot<S: Surface + ?Sized> {
    handle: DetachHandle,
    listener: Box<dyn Listener<S>>,
}

/// Owns the surface, the shared display flags, and the installed listeners.
pub struct Hub<S: Surface> {
    surface: S,
    flags: SurfaceFlags,
    config: EngineConfig,
    slots: Vec<Option<Slot<S>>>,
    registry: Registry,
    next_handle: u64,
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for Hub<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("surface", &self.surface)
            .field("flags", &self.flags)
            .field("listeners", &self.listener_count())
            .field("registry", &self.registry)
            .finish()
    }
}

impl<S: Surface> Hub<S> {
    /// A hub with the default engine configuration.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(surface: S, config: EngineConfig) -> Self {
        Self {
            surface,
            flags: SurfaceFlags::new(),
            config,
            slots: Vec::new(),
            registry: Registry::new(),
            next_handle: 0,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Shared display flags (global cursor, selection suppression).
    #[must_use]
    pub fn flags(&self) -> &SurfaceFlags {
        &self.flags
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of installed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Install a listener.
    pub fn install(&mut self, listener: Box<dyn Listener<S>>) -> DetachHandle {
        self.next_handle += 1;
        let handle = DetachHandle(self.next_handle);
        self.slots.push(Some(Slot { handle, listener }));
        tracing::debug!(target: "framedrag::hub", handle = handle.get(), "listener installed");
        handle
    }

    /// Install a listener and register it under `target`.
    pub fn install_for(&mut self, target: ElementId, listener: Box<dyn Listener<S>>) -> DetachHandle {
        let handle = self.install(listener);
        self.registry.register(target, handle);
        handle
    }

    fn cx(&mut self) -> Cx<'_, S> {
        Cx {
            surface: &mut self.surface,
            flags: &self.flags,
            config: &self.config,
        }
    }

    /// Remove a listener and run its teardown.
    ///
    /// Returns `false` when the handle is unknown or already detached.
    pub fn detach(&mut self, handle: DetachHandle) -> bool {
        let Some(index) = self
            .slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|s| s.handle == handle))
        else {
            return false;
        };
        let Some(mut slot) = self.slots[index].take() else {
            return false;
        };
        slot.listener.teardown(&mut self.cx());
        self.registry.forget(handle);
        self.slots.retain(Option::is_some);
        tracing::debug!(target: "framedrag::hub", handle = handle.get(), "listener detached");
        true
    }

    /// Detach every listener registered under `target`.
    ///
    /// Returns the number of listeners removed.
    pub fn detach_target(&mut self, target: ElementId) -> usize {
        self.registry
            .take(target)
            .into_iter()
            .filter(|h| self.detach(*h))
            .count()
    }

    /// Forward a pointer event to every listener.
    pub fn dispatch(&mut self, event: &PointerEvent, now: Instant) {
        tracing::trace!(target: "framedrag::hub", kind = ?event.kind, x = event.position.x, y = event.position.y, "dispatch");
        self.for_each_listener(|listener, cx| listener.on_pointer(cx, event, now));
    }

    /// Deliver deferred work due at `now`.
    pub fn tick(&mut self, now: Instant) {
        self.for_each_listener(|listener, cx| listener.on_tick(cx, now));
    }

    fn for_each_listener<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn Listener<S>, &mut Cx<'_, S>),
    {
        let count = self.slots.len();
        for index in 0..count {
            let Some(mut slot) = self.slots.get_mut(index).and_then(Option::take) else {
                continue;
            };
            f(slot.listener.as_mut(), &mut self.cx());
            if let Some(place) = self.slots.get_mut(index) {
                *place = Some(slot);
            }
        }
    }
}

impl<S: Surface> Drop for Hub<S> {
    fn drop(&mut self) {
        let slots = std::mem::take(&mut self.slots);
        for mut slot in slots.into_iter().flatten() {
            slot.listener.teardown(&mut self.cx());
        }
    }
}
