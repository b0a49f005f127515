#![forbid(unsafe_code)]

//! Edge/corner classification for resize grips.
//!
//! [`classify`] maps a pointer position and a target rectangle to one of
//! eight resize zones. Each zone is an open rectangle built by expanding a
//! fixed buffer around a corner, or around the middle section of an edge
//! (the edge sections stop where the corner buffers start).
//!
//! # Invariants
//!
//! 1. Corners are tested before edges, so a pointer inside both a corner's
//!    horizontal and vertical buffer always classifies as that corner.
//! 2. A pointer exactly on a zone boundary belongs to no zone.

use crate::geometry::{Point, Rect};

/// Half-width of every grip zone.
pub const EDGE_BUFFER: f64 = 5.0;

/// Which edge or corner of the target is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Classification order: corners first, then edges.
    pub const ALL: [Direction; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
    ];

    /// The horizontal side this direction drags, if any.
    #[must_use]
    pub const fn horizontal_side(self) -> Option<Side> {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => Some(Side::Leading),
            Self::Right | Self::TopRight | Self::BottomRight => Some(Side::Trailing),
            Self::Top | Self::Bottom => None,
        }
    }

    /// The vertical side this direction drags, if any.
    #[must_use]
    pub const fn vertical_side(self) -> Option<Side> {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Some(Side::Leading),
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Some(Side::Trailing),
            Self::Left | Self::Right => None,
        }
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        self.horizontal_side().is_some() && self.vertical_side().is_some()
    }

    /// Cursor shown while hovering or dragging this grip.
    #[must_use]
    pub const fn cursor(self) -> CursorStyle {
        match self {
            Self::TopLeft | Self::BottomRight => CursorStyle::NwseResize,
            Self::Top | Self::Bottom => CursorStyle::NsResize,
            Self::BottomLeft | Self::TopRight => CursorStyle::NeswResize,
            Self::Left | Self::Right => CursorStyle::EwResize,
        }
    }

    /// The open grip zone for this direction around `rect`.
    #[must_use]
    pub fn zone(self, rect: &Rect, buffer: f64) -> Rect {
        let Rect {
            top,
            right,
            bottom,
            left,
        } = *rect;
        let b = buffer;
        // Rect::new takes (top, right, bottom, left).
        match self {
            Self::TopLeft => Rect::new(top - b, left + b, top + b, left - b),
            Self::TopRight => Rect::new(top - b, right + b, top + b, right - b),
            Self::BottomRight => Rect::new(bottom - b, right + b, bottom + b, right - b),
            Self::BottomLeft => Rect::new(bottom - b, left + b, bottom + b, left - b),
            Self::Top => Rect::new(top - b, right - b, top + b, left + b),
            Self::Right => Rect::new(top + b, right + b, bottom - b, right - b),
            Self::Bottom => Rect::new(bottom - b, right - b, bottom + b, left + b),
            Self::Left => Rect::new(top + b, left + b, bottom - b, left - b),
        }
    }
}

/// Which side of an axis a direction drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top or left.
    Leading,
    /// Bottom or right.
    Trailing,
}

/// Pointer cursor affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    NwseResize,
    NsResize,
    NeswResize,
    EwResize,
}

impl CursorStyle {
    /// CSS keyword; the default cursor is the empty string so that hosts
    /// clear any inline override.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::NwseResize => "nwse-resize",
            Self::NsResize => "ns-resize",
            Self::NeswResize => "nesw-resize",
            Self::EwResize => "ew-resize",
        }
    }

    /// Cursor for an optional direction.
    #[must_use]
    pub const fn for_direction(direction: Option<Direction>) -> Self {
        match direction {
            Some(d) => d.cursor(),
            None => Self::Default,
        }
    }
}

/// Classify a pointer against `rect` using the default [`EDGE_BUFFER`].
#[must_use]
pub fn classify(pointer: Point, rect: &Rect) -> Option<Direction> {
    classify_with_buffer(pointer, rect, EDGE_BUFFER)
}

/// Classify a pointer against `rect` with an explicit buffer.
#[must_use]
pub fn classify_with_buffer(pointer: Point, rect: &Rect, buffer: f64) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|d| d.zone(rect, buffer).contains_strict(pointer))
}
