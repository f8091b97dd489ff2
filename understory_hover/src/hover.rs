// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state: compute enter/exit transitions from successive picked trails.
//!
//! ## Usage
//!
//! 1) Pick once per pointer-move frame with [`Tree::pick`](understory_pick::Tree::pick).
//! 2) Call [`HoverTracker::update`] with the result to get `Enter(..)` / `Exit(..)` transitions.
//! 3) Call [`HoverTracker::reset`] when the root is detached or the pointer leaves the viewport.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_hover::{HoverEvent, HoverTracker};
//! use understory_pick::{LocalNode, NodeKind, PathNode, PickFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::default());
//! let button = tree.insert(
//!     Some(root),
//!     LocalNode {
//!         kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, 10.0, 10.0))),
//!         ..Default::default()
//!     },
//! );
//!
//! let mut hover = HoverTracker::new();
//! let trail = tree.pick(root, Point::new(5.0, 5.0), PickFlags::MOUSE).unwrap();
//! assert_eq!(
//!     hover.update(trail.as_ref()),
//!     vec![HoverEvent::Enter(root), HoverEvent::Enter(button)]
//! );
//! let trail = tree.pick(root, Point::new(50.0, 5.0), PickFlags::MOUSE).unwrap();
//! assert_eq!(
//!     hover.update(trail.as_ref()),
//!     vec![HoverEvent::Exit(button), HoverEvent::Exit(root)]
//! );
//! ```

use alloc::vec::Vec;

use understory_pick::{NodeId, Trail};

/// A hover state machine over picked trails.
///
/// Tracks the previously hovered trail and, when updated with a new one,
/// computes the minimal sequence of exit and enter transitions between them.
///
/// Ordering semantics:
/// - Exit events are emitted from inner-most to outer-most.
/// - Enter events are emitted from outer-most to inner-most.
///
/// Nodes are matched by position: a node that is still at the same depth of
/// the shared ancestry gets nothing, while a node that moved to a different
/// position exits from the old one and enters at the new one.
///
/// Each pointer stream owns its own tracker; see [`PointerHover`](crate::PointerHover)
/// for several pointers at once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverTracker {
    previous: Option<Trail>,
}

/// A hover transition event.
///
/// Returned by [`HoverTracker::update`] and [`HoverTracker::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverEvent {
    /// Pointer enters the given node (in order from outer→inner).
    Enter(NodeId),
    /// Pointer exits the given node (in order from inner→outer).
    Exit(NodeId),
}

impl HoverEvent {
    /// The node this event is for.
    pub fn node(self) -> NodeId {
        match self {
            Self::Enter(n) | Self::Exit(n) => n,
        }
    }
}

impl HoverTracker {
    /// Create an empty hover tracker.
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// The trail seen by the last update, if any.
    pub fn current(&self) -> Option<&Trail> {
        self.previous.as_ref()
    }

    /// Returns true if `node` is on the current trail.
    pub fn is_hovered(&self, node: NodeId) -> bool {
        self.previous.as_ref().is_some_and(|t| t.contains(node))
    }

    /// Forget the current trail without emitting events.
    ///
    /// Use when the root is detached; the nodes may no longer exist.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Forget the current trail, returning exit events from inner-most to outer-most.
    pub fn clear(&mut self) -> Vec<HoverEvent> {
        self.update(None)
    }

    /// Update the hovered trail and return the exit/enter events required to
    /// transition from the previous trail to `new_trail`.
    ///
    /// Exits are emitted from inner-most to outer-most, then enters from
    /// outer-most to inner-most. An unchanged trail emits nothing.
    pub fn update(&mut self, new_trail: Option<&Trail>) -> Vec<HoverEvent> {
        // The common prefix is the shared ancestry; its length is the depth
        // of the lowest common ancestor (LCA) plus one.
        let lca = match (&self.previous, new_trail) {
            (Some(old), Some(new)) => old.common_prefix_len(new),
            _ => 0,
        };

        let mut out = Vec::new();
        // Exits: from old tail back to the LCA (exclusive), inner→outer.
        if let Some(old) = &self.previous {
            for &k in old.nodes()[lca..].iter().rev() {
                out.push(HoverEvent::Exit(k));
            }
        }

        // Enters: from LCA down to new tail, outer→inner.
        if let Some(new) = new_trail {
            for &k in &new.nodes()[lca..] {
                out.push(HoverEvent::Enter(k));
            }
        }

        if self.previous.as_ref() != new_trail {
            self.previous = new_trail.cloned();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Point, Rect};
    use understory_pick::{LocalNode, NodeKind, PathNode, PickFlags, Tree};

    /// A chain of nested nodes under a fresh root, plus extra branches on demand.
    struct Fixture {
        tree: Tree,
        root: NodeId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut tree = Tree::new();
            let root = tree.insert(None, LocalNode::default());
            Self { tree, root }
        }

        fn child(&mut self, parent: NodeId) -> NodeId {
            self.tree.insert(Some(parent), LocalNode::default())
        }

        fn trail(&self, leaf: NodeId) -> Trail {
            self.tree.trail_to(leaf).unwrap()
        }
    }

    // Fresh trail: expect outer→inner enters.
    #[test]
    fn hover_enter_on_fresh_trail() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let b = f.child(a);
        let mut h = HoverTracker::new();
        let ev = h.update(Some(&f.trail(b)));
        assert_eq!(
            ev,
            vec![
                HoverEvent::Enter(f.root),
                HoverEvent::Enter(a),
                HoverEvent::Enter(b)
            ]
        );
        assert_eq!(h.current(), Some(&f.trail(b)));
        assert!(h.is_hovered(a));
    }

    // Clearing: expect inner→outer exits.
    #[test]
    fn hover_exit_to_absent() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let mut h = HoverTracker::new();
        let _ = h.update(Some(&f.trail(a)));
        let ev = h.clear();
        assert_eq!(ev, vec![HoverEvent::Exit(a), HoverEvent::Exit(f.root)]);
        assert!(h.current().is_none());
        assert!(h.clear().is_empty(), "nothing left to exit");
    }

    // Reset drops the state silently.
    #[test]
    fn hover_reset_is_silent() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let mut h = HoverTracker::new();
        let _ = h.update(Some(&f.trail(a)));
        h.reset();
        assert!(h.current().is_none());
        // After a reset the same trail enters again.
        assert_eq!(h.update(Some(&f.trail(a))).len(), 2);
    }

    // Branch change with shallow LCA: exit inner tail, then enter new branch.
    #[test]
    fn hover_branch_change() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let a1 = f.child(a);
        let b = f.child(f.root);
        let mut h = HoverTracker::new();
        let _ = h.update(Some(&f.trail(a1)));
        let ev = h.update(Some(&f.trail(b)));
        assert_eq!(
            ev,
            vec![
                HoverEvent::Exit(a1),
                HoverEvent::Exit(a),
                HoverEvent::Enter(b)
            ]
        );
    }

    // Disjoint trails from different roots: exit everything, enter everything.
    #[test]
    fn hover_disjoint_trails() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let other_root = f.tree.insert(None, LocalNode::default());
        let x = f.child(other_root);
        let mut h = HoverTracker::new();
        let _ = h.update(Some(&f.trail(a)));
        let ev = h.update(Some(&f.trail(x)));
        assert_eq!(
            ev,
            vec![
                HoverEvent::Exit(a),
                HoverEvent::Exit(f.root),
                HoverEvent::Enter(other_root),
                HoverEvent::Enter(x),
            ]
        );
    }

    // Moving up to an ancestor only exits the tail; moving down only enters.
    #[test]
    fn hover_ancestor_and_descendant() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let a1 = f.child(a);
        let mut h = HoverTracker::new();
        let _ = h.update(Some(&f.trail(a1)));
        assert_eq!(h.update(Some(&f.trail(a))), vec![HoverEvent::Exit(a1)]);
        assert_eq!(h.update(Some(&f.trail(a1))), vec![HoverEvent::Enter(a1)]);
    }

    // Same trail repeated: no transitions.
    #[test]
    fn hover_same_trail_no_events() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let mut h = HoverTracker::new();
        let first = h.update(Some(&f.trail(a)));
        assert_eq!(first, vec![HoverEvent::Enter(f.root), HoverEvent::Enter(a)]);
        assert!(h.update(Some(&f.trail(a))).is_empty());
        assert!(h.update(None).len() == 2);
        assert!(h.update(None).is_empty());
    }

    // A node that moved to another position exits and re-enters.
    #[test]
    fn hover_reparented_node_rejoins() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let b = f.child(f.root);
        let x = f.child(a);
        let mut h = HoverTracker::new();
        let _ = h.update(Some(&f.trail(x)));
        f.tree.reparent(x, Some(b));
        let ev = h.update(Some(&f.trail(x)));
        assert_eq!(
            ev,
            vec![
                HoverEvent::Exit(x),
                HoverEvent::Exit(a),
                HoverEvent::Enter(b),
                HoverEvent::Enter(x),
            ]
        );
    }

    // Each node gets at most one enter and one exit per transition.
    #[test]
    fn hover_events_are_unique_per_node() {
        let mut f = Fixture::new();
        let a = f.child(f.root);
        let a1 = f.child(a);
        let a2 = f.child(a1);
        let b = f.child(f.root);
        let b1 = f.child(b);
        let trails = [
            Some(f.trail(a2)),
            Some(f.trail(b1)),
            None,
            Some(f.trail(a1)),
            Some(f.trail(a2)),
            Some(f.trail(f.root)),
        ];
        let mut h = HoverTracker::new();
        let mut prev: Option<Trail> = None;
        for t in &trails {
            let ev = h.update(t.as_ref());
            let lca = match (&prev, t) {
                (Some(p), Some(n)) => p.common_prefix_len(n),
                _ => 0,
            };
            let exits: Vec<_> = ev
                .iter()
                .filter(|e| matches!(e, HoverEvent::Exit(_)))
                .map(|e| e.node())
                .collect();
            let enters: Vec<_> = ev
                .iter()
                .filter(|e| matches!(e, HoverEvent::Enter(_)))
                .map(|e| e.node())
                .collect();
            let mut expected_exits: Vec<_> =
                prev.as_ref().map(|p| p.nodes()[lca..].to_vec()).unwrap_or_default();
            expected_exits.reverse();
            let expected_enters: Vec<_> =
                t.as_ref().map(|n| n.nodes()[lca..].to_vec()).unwrap_or_default();
            assert_eq!(exits, expected_exits);
            assert_eq!(enters, expected_enters);
            prev = t.clone();
        }
    }

    // End to end with picking: moving between overlapping siblings.
    #[test]
    fn hover_follows_picks() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalNode::default());
        let a = tree.insert(
            Some(root),
            LocalNode {
                kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, 10.0, 10.0))),
                ..Default::default()
            },
        );
        let b = tree.insert(
            Some(root),
            LocalNode {
                kind: NodeKind::Path(PathNode::filled(Rect::new(5.0, 5.0, 15.0, 15.0))),
                ..Default::default()
            },
        );
        let mut h = HoverTracker::new();
        let mut step = |x: f64, y: f64| {
            let trail = tree.pick(root, Point::new(x, y), PickFlags::MOUSE).unwrap();
            h.update(trail.as_ref())
        };
        assert_eq!(
            step(2.0, 2.0),
            vec![HoverEvent::Enter(root), HoverEvent::Enter(a)]
        );
        assert!(step(3.0, 3.0).is_empty(), "same node, no transitions");
        assert_eq!(
            step(7.0, 7.0),
            vec![HoverEvent::Exit(a), HoverEvent::Enter(b)]
        );
        assert_eq!(
            step(30.0, 30.0),
            vec![HoverEvent::Exit(b), HoverEvent::Exit(root)]
        );
    }
}
