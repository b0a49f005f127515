#![forbid(unsafe_code)]

//! Move engine.

use crate::geometry::GeometryState;

/// Offset `start` by the pointer delta. Size passes through untouched.
///
/// No clamping happens here; the pointer was already clamped upstream.
#[inline]
#[must_use]
pub fn move_by(start: GeometryState, dx: f64, dy: f64) -> GeometryState {
    GeometryState {
        x: start.x + dx,
        y: start.y + dy,
        ..start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_by_delta() {
        assert_eq!(
            move_by(GeometryState::offset(0.0, 0.0), 30.0, -10.0),
            GeometryState::offset(30.0, -10.0)
        );
    }

    #[test]
    fn size_is_preserved() {
        let moved = move_by(GeometryState::sized(5.0, 5.0, 100.0, 50.0), -5.0, 1.5);
        assert_eq!(moved, GeometryState::sized(0.0, 6.5, 100.0, 50.0));
    }
}
