#![forbid(unsafe_code)]

//! Target-to-listener registry.
//!
//! Maps a target element to the detach handles installed for it, so a later
//! `stop_*` call can find them without any marker stored on the element.

use ahash::AHashMap;
use framedrag_core::surface::ElementId;

use crate::hub::DetachHandle;

/// Registered detach handles, keyed by target identity.
#[derive(Debug, Default)]
pub struct Registry {
    entries: AHashMap<ElementId, Vec<DetachHandle>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `handle` for `target`.
    pub fn register(&mut self, target: ElementId, handle: DetachHandle) {
        self.entries.entry(target).or_default().push(handle);
    }

    /// Remove and return every handle for `target`.
    pub fn take(&mut self, target: ElementId) -> Vec<DetachHandle> {
        self.entries.remove(&target).unwrap_or_default()
    }

    /// Forget a single handle, wherever it is registered.
    pub fn forget(&mut self, handle: DetachHandle) {
        self.entries.retain(|_, handles| {
            handles.retain(|h| *h != handle);
            !handles.is_empty()
        });
    }

    #[must_use]
    pub fn is_registered(&self, target: ElementId) -> bool {
        self.entries.contains_key(&target)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_empties_the_entry() {
        let mut r = Registry::new();
        let t = ElementId(3);
        r.register(t, DetachHandle(1));
        r.register(t, DetachHandle(2));
        assert!(r.is_registered(t));
        assert_eq!(r.take(t), vec![DetachHandle(1), DetachHandle(2)]);
        assert!(r.take(t).is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn forget_drops_empty_entries() {
        let mut r = Registry::new();
        r.register(ElementId(1), DetachHandle(7));
        r.forget(DetachHandle(7));
        assert!(!r.is_registered(ElementId(1)));
    }
}
