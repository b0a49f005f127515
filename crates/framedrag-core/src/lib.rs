#![forbid(unsafe_code)]

//! Core: pointer-driven move/resize geometry for framedrag.
//!
//! # Role in framedrag
//! `framedrag-core` is the engine. It owns gesture sequencing, grip
//! classification, pointer clamping, overlay discovery, and the anchor-aware
//! move/resize arithmetic. It never touches a concrete display tree: hosts
//! implement [`Surface`] and the `framedrag` crate binds everything to
//! pointer events.
//!
//! # Primary responsibilities
//! - **Coalescing**: clock-injected rate limiting that never loses the last sample.
//! - **Classification**: eight grip zones around a rectangle, corners first.
//! - **Anchor probing**: leading vs trailing positioning, with RAII restore.
//! - **Overlays and bounds**: the travel rectangle plus overlay freezing.
//! - **DragMachine**: Idle/Armed/Active lifecycle owning the selection guard.
//!
//! # How it fits in the system
//! The binding crate (`framedrag`) turns host pointer events into
//! [`DragMachine`] calls and writes the reported [`GeometryState`] back
//! through [`Surface`]. Everything here is deterministic: time comes in as
//! an argument and the display tree comes in as a trait object.

pub mod anchor;
pub mod bounds;
pub mod coalesce;
pub mod config;
pub mod direction;
pub mod event;
pub mod flags;
pub mod geometry;
pub mod motion;
pub mod overlay;
pub mod resize;
pub mod session;
pub mod surface;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use anchor::{AnchorMode, Anchors, probe_anchor, probe_anchors};
pub use bounds::{BoundsResolver, TravelRect, resolve_travel};
pub use coalesce::{Coalescer, Throttled, schedule};
pub use config::{ConfigError, EngineConfig};
pub use direction::{CursorStyle, Direction, classify, classify_with_buffer};
pub use event::{PointerButton, PointerEvent, PointerEventKind};
pub use flags::{SelectionGuard, SurfaceFlags};
pub use geometry::{Bounds, GeometryState, Point, Rect};
pub use motion::move_by;
pub use overlay::{merge_overlay_rects, resolve_overlays};
pub use resize::{Constraints, limit_add_val, resize};
pub use session::{DragEffect, DragMachine, DragPhase, DragTransition, SessionPlan};
pub use surface::{Axis, Edge, ElementId, Surface, resolve_target};
