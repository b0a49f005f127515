#![forbid(unsafe_code)]

//! Time-window coalescing for high-frequency pointer notifications.
//!
//! Pointer hosts can deliver hundreds of move notifications per second. The
//! [`Coalescer`] bounds delivery to at most one scheduled call per window
//! while guaranteeing the final value of a window is never lost:
//!
//! - The first call while idle is scheduled to run when the window closes.
//! - Calls that arrive while the window is busy are remembered; only the
//!   latest is kept.
//! - When the window closes the scheduled call runs, then the latest
//!   remembered call (if any) runs immediately after, and the window resets.
//!
//! The coalescer never reads a clock. Callers pass `now` to [`Coalescer::push`]
//! and drive delivery with [`Coalescer::drain_due`], which keeps it
//! deterministic under test.
//!
//! # Usage
//!
//! ```
//! use framedrag_core::coalesce::schedule;
//! use web_time::{Duration, Instant};
//!
//! let mut seen = Vec::new();
//! let t = Instant::now();
//! {
//!     let mut wrapped = schedule(|v: u32| seen.push(v), Duration::from_millis(50));
//!     for v in 1..=5 {
//!         wrapped.call(v, t);
//!     }
//!     assert_eq!(wrapped.tick(t + Duration::from_millis(50)), 2);
//! }
//! assert_eq!(seen, vec![1, 5]);
//! ```

use web_time::{Duration, Instant};

/// Pending-call bookkeeping for one coalescing window.
///
/// Holds at most two pending argument sets: the one that opened the window
/// and the latest one seen while the window was busy.
#[derive(Debug, Clone)]
pub struct Coalescer<A> {
    window: Duration,
    deadline: Option<Instant>,
    scheduled: Option<A>,
    latest: Option<A>,
}

impl<A> Coalescer<A> {
    /// Create a coalescer with the given window length.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            scheduled: None,
            latest: None,
        }
    }

    /// Window length.
    #[inline]
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a window is open.
    #[inline]
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the open window closes.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a call.
    pub fn push(&mut self, args: A, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.window);
            self.scheduled = Some(args);
        } else {
            self.latest = Some(args);
        }
    }

    /// Deliver pending calls if the window has closed at `now`.
    ///
    /// Returns the number of invocations of `f` (0, 1, or 2).
    pub fn drain_due<F>(&mut self, now: Instant, f: F) -> usize
    where
        F: FnMut(A),
    {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(f),
            _ => 0,
        }
    }

    /// Deliver pending calls immediately, ignoring the deadline.
    pub fn flush<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(A),
    {
        self.deadline = None;
        let mut delivered = 0;
        if let Some(args) = self.scheduled.take() {
            f(args);
            delivered += 1;
        }
        if let Some(args) = self.latest.take() {
            f(args);
            delivered += 1;
        }
        delivered
    }

    /// Discard pending calls without delivering them.
    pub fn clear(&mut self) {
        self.deadline = None;
        self.scheduled = None;
        self.latest = None;
    }
}

/// A callable wrapped by a [`Coalescer`].
///
/// Returned by [`schedule`].
pub struct Throttled<A, F> {
    inner: Coalescer<A>,
    f: F,
}

impl<A, F> std::fmt::Debug for Throttled<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttled")
            .field("window", &self.inner.window)
            .field("busy", &self.inner.is_busy())
            .finish()
    }
}

impl<A, F> Throttled<A, F>
where
    F: FnMut(A),
{
    /// Call the wrapped function through the coalescing window.
    pub fn call(&mut self, args: A, now: Instant) {
        self.inner.push(args, now);
    }

    /// Deliver pending calls whose window has closed.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.inner.drain_due(now, &mut self.f)
    }

    /// Deliver pending calls now.
    pub fn flush(&mut self) -> usize {
        self.inner.flush(&mut self.f)
    }

    /// Drop pending calls.
    pub fn cancel(&mut self) {
        self.inner.clear();
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.inner.is_busy()
    }
}

/// Wrap `f` so calls are coalesced into windows of length `window`.
#[must_use]
pub fn schedule<A, F>(f: F, window: Duration) -> Throttled<A, F>
where
    F: FnMut(A),
{
    Throttled {
        inner: Coalescer::new(window),
        f,
    }
}
