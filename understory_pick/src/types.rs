// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, pick flags, and local node data.

use kurbo::Affine;

use crate::geometry::{NodeKind, Shape};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Tri-state pickability of a node.
///
/// Only input picks (those with [`PickFlags::PICKABLE_AWARE`]) look at this.
/// Visual picks answer "what is drawn here" and ignore it entirely.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Pickable {
    /// No explicit setting. Behaves as pickable unless an ancestor is [`Pickable::No`].
    #[default]
    Inherit,
    /// Explicitly pickable.
    Yes,
    /// Not pickable. Input picks prune this node and its entire subtree,
    /// regardless of what descendants set.
    No,
}

bitflags::bitflags! {
    /// Mode flags for [`Tree::pick`](crate::Tree::pick).
    ///
    /// The empty set is a visual pick. Any area flag or [`PickFlags::PICKABLE_AWARE`]
    /// makes it an input pick, and input picks always prune [`Pickable::No`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PickFlags: u8 {
        /// Test each node's mouse area in addition to its self shape.
        const USE_MOUSE_AREA = 0b0000_0001;
        /// Test each node's touch area in addition to its self shape.
        const USE_TOUCH_AREA = 0b0000_0010;
        /// Prune nodes marked [`Pickable::No`] together with their subtrees.
        ///
        /// Implied by either area flag; set it alone for an input pick that
        /// ignores pointer areas.
        const PICKABLE_AWARE = 0b0000_0100;
        /// Resolve the raw hit to the nearest listener-owning ancestor.
        ///
        /// See [`Tree::pick_target`](crate::Tree::pick_target).
        const SEEK_LISTENER  = 0b0000_1000;
    }
}

impl PickFlags {
    /// What is visibly drawn at a point. Ignores pickability and pointer areas.
    pub const VISUAL: Self = Self::empty();
    /// Input pick for a mouse pointer.
    pub const MOUSE: Self = Self::PICKABLE_AWARE.union(Self::USE_MOUSE_AREA);
    /// Input pick for a touch pointer.
    pub const TOUCH: Self = Self::PICKABLE_AWARE.union(Self::USE_TOUCH_AREA);

    /// Input pick flags for a pointer of the given kind.
    ///
    /// Pens use mouse areas.
    pub const fn for_pointer(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Mouse | PointerKind::Pen => Self::MOUSE,
            PointerKind::Touch => Self::TOUCH,
        }
    }

    /// Returns true if this is an input pick rather than a visual one.
    pub const fn is_input(self) -> bool {
        self.intersects(
            Self::USE_MOUSE_AREA
                .union(Self::USE_TOUCH_AREA)
                .union(Self::PICKABLE_AWARE),
        )
    }
}

impl Default for PickFlags {
    fn default() -> Self {
        Self::VISUAL
    }
}

/// Kind of pointer driving an input pick.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    Mouse,
    /// Finger on a touch surface.
    Touch,
    /// Stylus.
    Pen,
}

/// Handle of an input listener attached to a node.
///
/// Unique per node; callers use it to keep their callbacks in their own storage.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerKey(pub(crate) u32);

/// An input listener as seen by picking.
///
/// Picking only cares that a node has listeners and whether the first one
/// redirects events to an ancestor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InputListener {
    /// Node that should receive events instead of the listener's own node.
    ///
    /// Honored by listener-seeking picks when the target is already on the
    /// picked trail at or above the listener's node.
    pub target: Option<NodeId>,
}

impl InputListener {
    /// A listener that receives events on its own node.
    pub const fn new() -> Self {
        Self { target: None }
    }

    /// A listener that redirects events to `target`.
    pub const fn targeting(target: NodeId) -> Self {
        Self {
            target: Some(target),
        }
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Local transform relative to parent space. Must be invertible when picked.
    pub local_transform: Affine,
    /// Invisible nodes and their subtrees are never picked.
    pub visible: bool,
    /// Pickability for input picks.
    pub pickable: Pickable,
    /// Self content used for the self-containment test.
    pub kind: NodeKind,
    /// Optional local clip. Points outside prune the node and its subtree.
    pub clip: Option<Shape>,
    /// Input-only hit extension used when picking with [`PickFlags::USE_MOUSE_AREA`].
    pub mouse_area: Option<Shape>,
    /// Input-only hit extension used when picking with [`PickFlags::USE_TOUCH_AREA`].
    pub touch_area: Option<Shape>,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            local_transform: Affine::IDENTITY,
            visible: true,
            pickable: Pickable::Inherit,
            kind: NodeKind::Container,
            clip: None,
            mouse_area: None,
            touch_area: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_presets() {
        assert_eq!(PickFlags::for_pointer(PointerKind::Mouse), PickFlags::MOUSE);
        assert_eq!(PickFlags::for_pointer(PointerKind::Pen), PickFlags::MOUSE);
        assert_eq!(PickFlags::for_pointer(PointerKind::Touch), PickFlags::TOUCH);
        assert!(PickFlags::TOUCH.contains(PickFlags::PICKABLE_AWARE));
        assert!(!PickFlags::TOUCH.contains(PickFlags::USE_MOUSE_AREA));
    }

    #[test]
    fn visual_is_not_input() {
        assert!(!PickFlags::VISUAL.is_input());
        assert!(!PickFlags::SEEK_LISTENER.is_input());
        assert!(PickFlags::USE_TOUCH_AREA.is_input());
        assert!(PickFlags::MOUSE.is_input());
        assert_eq!(PickFlags::default(), PickFlags::VISUAL);
    }
}
