#![forbid(unsafe_code)]

//! Move and resize bindings for display-tree elements.
//!
//! # Role in framedrag
//! This crate connects the `framedrag-core` engine to a host. The host
//! implements [`Surface`] for its display tree, owns a [`Hub`], and forwards
//! pointer events and timer ticks to it. Attachments install listeners on
//! the hub.
//!
//! # Primary responsibilities
//! - **Hub**: event fan-out, deferred-delivery ticks, detach bookkeeping.
//! - **Attachments**: [`start_draggable`], [`start_movable`],
//!   [`start_resizeable`] / [`stop_resizeable`], and the [`attach_window`]
//!   composite.
//! - **Shared handles**: [`DisabledFlag`] and [`SharedGeometry`].
//! - **Host helpers**: attribute parsing ([`WindowAttrs`]) and
//!   `translate(...)` style conversion.
//!
//! # Usage
//!
//! ```ignore
//! let mut hub = Hub::new(my_surface);
//! let attrs = WindowAttrs::from_source(&element_attributes, None);
//! let window = attach_window(&mut hub, dialog, WindowSpec::new(attrs));
//!
//! // host event loop
//! hub.dispatch(&PointerEvent::down(x, y), Instant::now());
//! hub.tick(Instant::now());
//!
//! detach_window(&mut hub, &window);
//! ```

pub mod attrs;
pub mod draggable;
pub mod hub;
pub mod movable;
pub mod registry;
pub mod resizeable;
pub mod shared;
pub mod style;
pub mod window;

pub use attrs::{AttrSource, DEFAULT_PREFIX, WindowAttrs};
pub use draggable::{DraggableListener, DraggableOptions, start_draggable};
pub use hub::{Cx, DetachHandle, Hub, Listener};
pub use movable::{MovableListener, MovableOptions, start_movable};
pub use registry::Registry;
pub use resizeable::{ResizeableListener, ResizeableOptions, start_resizeable, stop_resizeable};
pub use shared::{DisabledFlag, SharedGeometry};
pub use style::{StyleDecl, format_translate, parse_translate, rect_to_style};
pub use window::{WindowHandle, WindowSpec, attach_window, detach_window};

pub use framedrag_core::{
    AnchorMode, Bounds, Constraints, CursorStyle, Direction, ElementId, EngineConfig, GeometryState,
    PointerButton, PointerEvent, PointerEventKind, Point, Rect, Surface, SurfaceFlags,
};
