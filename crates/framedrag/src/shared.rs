#![forbid(unsafe_code)]

//! Host-side handles shared between an attachment and its owner.
//!
//! [`DisabledFlag`] vetoes new sessions without detaching anything.
//! [`SharedGeometry`] holds the offset (or offset and size) an attachment
//! starts from and reports into, so the host can read it between gestures.

use std::cell::Cell;
use std::rc::Rc;

use framedrag_core::geometry::GeometryState;
use framedrag_core::surface::{ElementId, Surface};

use crate::style::{StyleDecl, rect_to_style};

/// Shared on/off switch for new sessions. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct DisabledFlag(Rc<Cell<bool>>);

impl DisabledFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, disabled: bool) {
        self.0.set(disabled);
    }

    #[must_use]
    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// Shared geometry cell. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedGeometry(Rc<Cell<GeometryState>>);

impl SharedGeometry {
    #[must_use]
    pub fn new(initial: GeometryState) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    #[must_use]
    pub fn get(&self) -> GeometryState {
        self.0.get()
    }

    pub fn set(&self, state: GeometryState) {
        self.0.set(state);
    }

    /// Inline style for the current state.
    #[must_use]
    pub fn style(&self) -> StyleDecl {
        rect_to_style(&self.get())
    }
}

/// Write `state` to the surface: size when it carries one, then offset.
pub(crate) fn apply_state<S: Surface + ?Sized>(surface: &mut S, el: ElementId, state: GeometryState) {
    if let (Some(w), Some(h)) = (state.width, state.height) {
        surface.set_size(el, w, h);
    }
    surface.set_translate(el, state.x, state.y);
}
