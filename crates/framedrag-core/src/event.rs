#![forbid(unsafe_code)]

//! Pointer input events delivered by the host.

use crate::geometry::Point;
use crate::surface::ElementId;

/// Pointer buttons. Only [`PointerButton::Primary`] starts a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Moved,
}

/// One pointer event.
///
/// `target` is the element the host hit-tested for the event, when known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub target: Option<ElementId>,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            target: None,
        }
    }

    /// Primary-button press.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Primary-button release.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Moved, x, y)
    }

    /// Attach the hit-tested target.
    #[must_use]
    pub const fn on(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Whether this is a press of the primary button.
    #[must_use]
    pub const fn is_primary_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(PointerButton::Primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_position() {
        let e = PointerEvent::down(3.0, 4.0).on(ElementId(9));
        assert!(e.is_primary_down());
        assert_eq!(e.position, Point::new(3.0, 4.0));
        assert_eq!(e.target, Some(ElementId(9)));
        assert!(!PointerEvent::up(0.0, 0.0).is_primary_down());
        assert!(
            !PointerEvent::new(PointerEventKind::Down(PointerButton::Secondary), 0.0, 0.0)
                .is_primary_down()
        );
    }
}
