#![forbid(unsafe_code)]

//! Drag session lifecycle.
//!
//! ```text
//! Idle -> Armed -> Active -> Idle
//!            \----------------> Idle (release before any move)
//! ```
//!
//! [`DragMachine`] owns at most one [`DragSession`]. A press that arrives
//! while a session exists is reported as a no-op instead of replacing it.
//! The session holds the display's selection-suppression guard, so ending
//! it by release, by [`DragMachine::force_cancel`], or by dropping the
//! machine restores the flag exactly once.
//!
//! Every call returns a [`DragTransition`] carrying a monotonically
//! increasing `transition_id`, including no-ops.

use crate::anchor::Anchors;
use crate::bounds::BoundsResolver;
use crate::direction::Direction;
use crate::flags::{SelectionGuard, SurfaceFlags};
use crate::geometry::{GeometryState, Point};
use crate::motion::move_by;
use crate::resize::{Constraints, resize};

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    Armed,
    Active,
}

/// What a session does with pointer deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionPlan {
    Move,
    Resize {
        direction: Direction,
        anchors: Anchors,
        constraints: Constraints,
    },
}

/// Why a call was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragNoopReason {
    IdleWithoutSession,
    ActiveSessionInProgress,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    Started { start: GeometryState },
    Moved { state: GeometryState },
    Ended { last_state: GeometryState },
    Canceled { last_state: GeometryState },
    Noop { reason: DragNoopReason },
}

/// One lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragPhase,
    pub to: DragPhase,
    pub effect: DragEffect,
}

impl DragTransition {
    /// The reported state, for effects that carry one.
    #[must_use]
    pub fn state(&self) -> Option<GeometryState> {
        match self.effect {
            DragEffect::Started { start } => Some(start),
            DragEffect::Moved { state } => Some(state),
            DragEffect::Ended { last_state } | DragEffect::Canceled { last_state } => {
                Some(last_state)
            }
            DragEffect::Noop { .. } => None,
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

/// State owned by one gesture.
#[derive(Debug)]
pub struct DragSession {
    start_pointer: Point,
    start_state: GeometryState,
    plan: SessionPlan,
    resolver: BoundsResolver,
    last_state: GeometryState,
    _selection: SelectionGuard,
}

impl DragSession {
    #[must_use]
    pub fn start_pointer(&self) -> Point {
        self.start_pointer
    }

    #[must_use]
    pub fn start_state(&self) -> GeometryState {
        self.start_state
    }

    #[must_use]
    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    /// Grip latched at start, for resize sessions.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match self.plan {
            SessionPlan::Resize { direction, .. } => Some(direction),
            SessionPlan::Move => None,
        }
    }

    #[must_use]
    pub fn in_overlay(&self) -> bool {
        self.resolver.in_overlay()
    }

    #[must_use]
    pub fn last_state(&self) -> GeometryState {
        self.last_state
    }

    fn advance(&mut self, pointer: Point) -> GeometryState {
        let effective = self.resolver.resolve(pointer);
        let (dx, dy) = effective - self.start_pointer;
        let state = match &self.plan {
            SessionPlan::Move => move_by(self.start_state, dx, dy),
            SessionPlan::Resize {
                direction,
                anchors,
                constraints,
            } => resize(self.start_state, *direction, dx, dy, *anchors, constraints),
        };
        self.last_state = state;
        state
    }
}

/// Lifecycle machine for one draggable target.
#[derive(Debug, Default)]
pub struct DragMachine {
    phase: Phase,
    transition_counter: u64,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Armed(DragSession),
    Active(DragSession),
}

impl Phase {
    fn tag(&self) -> DragPhase {
        match self {
            Self::Idle => DragPhase::Idle,
            Self::Armed(_) => DragPhase::Armed,
            Self::Active(_) => DragPhase::Active,
        }
    }
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase.tag()
    }

    /// Whether a session exists.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Armed(s) | Phase::Active(s) => Some(s),
        }
    }

    fn emit(&mut self, from: DragPhase, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.phase.tag(),
            effect,
        }
    }

    /// Start a session.
    ///
    /// The caller has already checked the button and any start predicate.
    pub fn begin(
        &mut self,
        pointer: Point,
        start: GeometryState,
        plan: SessionPlan,
        resolver: BoundsResolver,
        flags: &SurfaceFlags,
    ) -> DragTransition {
        let from = self.phase.tag();
        if self.is_active() {
            return self.emit(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::ActiveSessionInProgress,
                },
            );
        }

        self.phase = Phase::Armed(DragSession {
            start_pointer: pointer,
            start_state: start,
            plan,
            resolver,
            last_state: start,
            _selection: flags.suppress_selection(),
        });
        tracing::debug!(
            target: "framedrag::session",
            x = pointer.x,
            y = pointer.y,
            ?plan,
            "drag session started"
        );
        self.emit(from, DragEffect::Started { start })
    }

    /// Feed one (coalesced) pointer sample.
    pub fn pointer_move(&mut self, pointer: Point) -> DragTransition {
        let from = self.phase.tag();
        let mut session = match std::mem::take(&mut self.phase) {
            Phase::Idle => {
                return self.emit(
                    from,
                    DragEffect::Noop {
                        reason: DragNoopReason::IdleWithoutSession,
                    },
                );
            }
            Phase::Armed(s) | Phase::Active(s) => s,
        };
        let state = session.advance(pointer);
        self.phase = Phase::Active(session);
        tracing::trace!(
            target: "framedrag::session",
            x = state.x,
            y = state.y,
            width = ?state.width,
            height = ?state.height,
            "drag session moved"
        );
        self.emit(from, DragEffect::Moved { state })
    }

    /// End the session on pointer release.
    pub fn release(&mut self) -> DragTransition {
        let from = self.phase.tag();
        match std::mem::take(&mut self.phase) {
            Phase::Idle => self.emit(
                from,
                DragEffect::Noop {
                    reason: DragNoopReason::IdleWithoutSession,
                },
            ),
            Phase::Armed(session) | Phase::Active(session) => {
                let last_state = session.last_state;
                drop(session);
                tracing::debug!(
                    target: "framedrag::session",
                    x = last_state.x,
                    y = last_state.y,
                    "drag session ended"
                );
                self.emit(from, DragEffect::Ended { last_state })
            }
        }
    }

    /// Tear down any session without a release event.
    ///
    /// Returns `None` when idle.
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        let from = self.phase.tag();
        match std::mem::take(&mut self.phase) {
            Phase::Idle => None,
            Phase::Armed(session) | Phase::Active(session) => {
                let last_state = session.last_state;
                drop(session);
                tracing::debug!(target: "framedrag::session", "drag session canceled");
                Some(self.emit(from, DragEffect::Canceled { last_state }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::AnchorMode;
    use crate::bounds::TravelRect;
    use crate::geometry::Rect;

    fn begin_move(m: &mut DragMachine, flags: &SurfaceFlags) -> DragTransition {
        let start = Point::new(10.0, 10.0);
        m.begin(
            start,
            GeometryState::offset(0.0, 0.0),
            SessionPlan::Move,
            BoundsResolver::passthrough(start),
            flags,
        )
    }

    #[test]
    fn move_session_reports_offset_delta() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        let t = begin_move(&mut m, &flags);
        assert_eq!(t.to, DragPhase::Armed);
        let t = m.pointer_move(Point::new(40.0, 0.0));
        assert_eq!(t.from, DragPhase::Armed);
        assert_eq!(t.to, DragPhase::Active);
        assert_eq!(
            t.effect,
            DragEffect::Moved {
                state: GeometryState::offset(30.0, -10.0)
            }
        );
        let t = m.release();
        assert_eq!(
            t.effect,
            DragEffect::Ended {
                last_state: GeometryState::offset(30.0, -10.0)
            }
        );
        assert_eq!(m.phase(), DragPhase::Idle);
    }

    #[test]
    fn second_press_is_noop() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        begin_move(&mut m, &flags);
        let t = begin_move(&mut m, &flags);
        assert_eq!(
            t.effect,
            DragEffect::Noop {
                reason: DragNoopReason::ActiveSessionInProgress
            }
        );
        assert_eq!(m.phase(), DragPhase::Armed);
    }

    #[test]
    fn idle_calls_are_noops() {
        let mut m = DragMachine::new();
        assert!(m.pointer_move(Point::default()).is_noop());
        assert!(m.release().is_noop());
        assert!(m.force_cancel().is_none());
    }

    #[test]
    fn selection_flag_follows_session() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        begin_move(&mut m, &flags);
        assert!(flags.selection_suppressed());
        m.pointer_move(Point::new(12.0, 12.0));
        assert!(flags.selection_suppressed());
        m.release();
        assert!(!flags.selection_suppressed());
    }

    #[test]
    fn force_cancel_restores_selection() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        begin_move(&mut m, &flags);
        let t = m.force_cancel().expect("active session");
        assert!(matches!(t.effect, DragEffect::Canceled { .. }));
        assert!(!flags.selection_suppressed());
        assert!(m.force_cancel().is_none());
    }

    #[test]
    fn dropping_machine_restores_selection() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        begin_move(&mut m, &flags);
        drop(m);
        assert!(!flags.selection_suppressed());
    }

    #[test]
    fn transition_ids_increase() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        let a = begin_move(&mut m, &flags).transition_id;
        let b = begin_move(&mut m, &flags).transition_id;
        let c = m.pointer_move(Point::new(1.0, 1.0)).transition_id;
        let d = m.release().transition_id;
        assert!(a < b && b < c && c < d);
    }

    #[test]
    fn resize_session_routes_through_resize_engine() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        let start = Point::new(300.0, 200.0);
        let travel = TravelRect::from_rect(Rect::from_xywh(0.0, 0.0, 320.0, 1000.0));
        m.begin(
            start,
            GeometryState::sized(0.0, 0.0, 300.0, 200.0),
            SessionPlan::Resize {
                direction: Direction::BottomRight,
                anchors: Anchors::new(AnchorMode::Leading, AnchorMode::Leading),
                constraints: Constraints::default(),
            },
            BoundsResolver::for_resize(travel, Direction::BottomRight, start),
            &flags,
        );
        assert_eq!(m.session().and_then(DragSession::direction), Some(Direction::BottomRight));
        let t = m.pointer_move(Point::new(400.0, 250.0));
        // Horizontal travel is clamped at x = 320.
        assert_eq!(t.state(), Some(GeometryState::sized(0.0, 0.0, 320.0, 250.0)));
    }

    #[test]
    #[tracing_test::traced_test]
    fn lifecycle_is_logged() {
        let flags = SurfaceFlags::new();
        let mut m = DragMachine::new();
        begin_move(&mut m, &flags);
        m.release();
        assert!(logs_contain("drag session started"));
        assert!(logs_contain("drag session ended"));
    }
}
