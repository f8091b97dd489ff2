// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking for several concurrent pointers (mouse plus touches).

use alloc::vec::Vec;

use hashbrown::HashMap;
use understory_pick::{NodeId, Trail};

use crate::hover::{HoverEvent, HoverTracker};

/// Identifier of a pointer stream, as assigned by the platform.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// One [`HoverTracker`] per pointer.
///
/// Pointers are independent: a node entered by one finger is not exited
/// because another finger moved away.
#[derive(Clone, Debug, Default)]
pub struct PointerHover {
    trackers: HashMap<PointerId, HoverTracker>,
}

impl PointerHover {
    /// Create an empty set of trackers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest pick for `pointer`, creating its tracker on first use.
    pub fn update(&mut self, pointer: PointerId, trail: Option<&Trail>) -> Vec<HoverEvent> {
        if trail.is_none() && !self.trackers.contains_key(&pointer) {
            return Vec::new();
        }
        self.trackers.entry(pointer).or_default().update(trail)
    }

    /// Drop `pointer` (for example on touch end), returning its exit events.
    pub fn remove(&mut self, pointer: PointerId) -> Vec<HoverEvent> {
        self.trackers
            .remove(&pointer)
            .map(|mut t| t.clear())
            .unwrap_or_default()
    }

    /// Forget every pointer without emitting events.
    pub fn reset_all(&mut self) {
        self.trackers.clear();
    }

    /// The current trail of `pointer`, if it hovers anything.
    pub fn current(&self, pointer: PointerId) -> Option<&Trail> {
        self.trackers.get(&pointer).and_then(HoverTracker::current)
    }

    /// Returns true if any pointer's current trail contains `node`.
    pub fn is_hovered(&self, node: NodeId) -> bool {
        self.trackers.values().any(|t| t.is_hovered(node))
    }

    /// Number of tracked pointers.
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Returns true if no pointer is tracked.
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_pick::{LocalNode, Tree};

    #[test]
    fn pointers_are_independent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(Some(root), LocalNode::default());
        let b = tree.insert(Some(root), LocalNode::default());
        let ta = tree.trail_to(a).unwrap();
        let tb = tree.trail_to(b).unwrap();

        let mut hover = PointerHover::new();
        let f1 = PointerId(1);
        let f2 = PointerId(2);
        assert_eq!(
            hover.update(f1, Some(&ta)),
            vec![HoverEvent::Enter(root), HoverEvent::Enter(a)]
        );
        // The second finger enters the shared root again: trackers do not share state.
        assert_eq!(
            hover.update(f2, Some(&tb)),
            vec![HoverEvent::Enter(root), HoverEvent::Enter(b)]
        );
        assert!(hover.is_hovered(a) && hover.is_hovered(b));

        assert_eq!(
            hover.remove(f1),
            vec![HoverEvent::Exit(a), HoverEvent::Exit(root)]
        );
        assert!(!hover.is_hovered(a));
        assert!(hover.is_hovered(root), "still under the second finger");
        assert_eq!(hover.current(f2), Some(&tb));
        assert_eq!(hover.len(), 1);
    }

    #[test]
    fn unknown_pointers_cost_nothing() {
        let mut hover = PointerHover::new();
        assert!(hover.update(PointerId(7), None).is_empty());
        assert!(hover.is_empty());
        assert!(hover.remove(PointerId(7)).is_empty());
    }

    #[test]
    fn reset_all_is_silent() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let t = tree.trail_to(root).unwrap();
        let mut hover = PointerHover::new();
        let _ = hover.update(PointerId(1), Some(&t));
        hover.reset_all();
        assert!(hover.is_empty());
        assert!(!hover.is_hovered(root));
    }
}
