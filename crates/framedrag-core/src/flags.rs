#![forbid(unsafe_code)]

//! Display-wide flags shared by every gesture on one surface.
//!
//! Text-selection suppression and the global cursor are singular for the
//! whole display. A drag session acquires selection suppression through a
//! [`SelectionGuard`]; dropping the guard restores the previous value, so the
//! flag is released exactly once however the session ends (release, unbind,
//! or unwinding).
//!
//! The flags are `!Send` by construction: event delivery is single-threaded.

use std::cell::Cell;
use std::rc::Rc;

use crate::direction::CursorStyle;

#[derive(Debug, Default)]
struct FlagCells {
    selection_suppressed: Cell<bool>,
    cursor: Cell<CursorStyle>,
}

/// Shared handle to the display-wide flags.
///
/// Cloning yields another handle to the same flags.
#[derive(Debug, Clone, Default)]
pub struct SurfaceFlags {
    cells: Rc<FlagCells>,
}

impl SurfaceFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether text selection is currently suppressed.
    #[must_use]
    pub fn selection_suppressed(&self) -> bool {
        self.cells.selection_suppressed.get()
    }

    /// Global cursor override.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.cells.cursor.get()
    }

    pub fn set_cursor(&self, cursor: CursorStyle) {
        self.cells.cursor.set(cursor);
    }

    /// Suppress text selection until the returned guard is dropped.
    #[must_use = "selection is restored as soon as the guard is dropped"]
    pub fn suppress_selection(&self) -> SelectionGuard {
        let previous = self.cells.selection_suppressed.replace(true);
        SelectionGuard {
            cells: Rc::clone(&self.cells),
            previous,
        }
    }
}

/// Scoped selection suppression; restores the prior value on drop.
#[derive(Debug)]
pub struct SelectionGuard {
    cells: Rc<FlagCells>,
    previous: bool,
}

impl Drop for SelectionGuard {
    fn drop(&mut self) {
        self.cells.selection_suppressed.set(self.previous);
    }
}
