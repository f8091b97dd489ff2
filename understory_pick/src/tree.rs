// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, and bounds.
//!
//! Picking lives in [`crate::pick`].

use alloc::vec::Vec;
use kurbo::{Affine, Rect};

use crate::error::{InvalidRegion, RegionKind};
use crate::geometry::{NodeKind, Shape};
use crate::trail::Trail;
use crate::types::{InputListener, ListenerKey, LocalNode, NodeId, Pickable};
use crate::util::transform_rect_bbox;

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// A retained scene tree.
///
/// Nodes live in generational slots; each node has at most one parent and
/// owns the ordering of its children. The last child is painted on top.
/// The tree may hold several roots.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) local: LocalNode,
    pub(crate) listeners: Vec<(ListenerKey, InputListener)>,
    next_listener: u32,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as the topmost child of `parent` (or as a root if `None`).
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        if let Some(p) = parent {
            assert!(self.is_alive(p), "cannot insert under stale parent {p:?}");
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` as the topmost child of `new_parent` (or make it a root).
    ///
    /// # Panics
    ///
    /// Panics if `new_parent` is stale, or is `id` itself or one of its
    /// descendants. The tree is left unchanged in either case.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent {
            assert!(self.is_alive(p), "cannot reparent {id:?} under stale {p:?}");
            assert!(
                !self.is_ancestor_of(id, p),
                "cannot reparent {id:?} under its own subtree"
            );
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Move `id` above all of its siblings.
    pub fn move_to_front(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            let siblings = &mut self.node_mut(parent).children;
            siblings.retain(|c| *c != id);
            siblings.push(id);
        }
    }

    /// Move `id` below all of its siblings.
    pub fn move_to_back(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            let siblings = &mut self.node_mut(parent).children;
            siblings.retain(|c| *c != id);
            siblings.insert(0, id);
        }
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update visibility.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.visible = visible;
        }
    }

    /// Update pickability.
    pub fn set_pickable(&mut self, id: NodeId, pickable: Pickable) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.pickable = pickable;
        }
    }

    /// Replace the node's self content.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.kind = kind;
        }
    }

    /// Update local clip.
    pub fn set_clip(&mut self, id: NodeId, clip: Option<Shape>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.clip = clip;
        }
    }

    /// Update the mouse area.
    pub fn set_mouse_area(&mut self, id: NodeId, area: Option<Shape>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.mouse_area = area;
        }
    }

    /// Update the touch area.
    pub fn set_touch_area(&mut self, id: NodeId, area: Option<Shape>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.touch_area = area;
        }
    }

    /// Append an input listener. Returns `None` if `id` is stale.
    pub fn add_input_listener(
        &mut self,
        id: NodeId,
        listener: InputListener,
    ) -> Option<ListenerKey> {
        let n = self.node_opt_mut(id)?;
        let key = ListenerKey(n.next_listener);
        n.next_listener += 1;
        n.listeners.push((key, listener));
        Some(key)
    }

    /// Remove an input listener. Returns true if it was attached.
    pub fn remove_input_listener(&mut self, id: NodeId, key: ListenerKey) -> bool {
        let Some(n) = self.node_opt_mut(id) else {
            return false;
        };
        let before = n.listeners.len();
        n.listeners.retain(|(k, _)| *k != key);
        n.listeners.len() != before
    }

    /// Listeners attached to `id`, in insertion order.
    pub fn listeners(&self, id: NodeId) -> impl Iterator<Item = &InputListener> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.listeners.iter().map(|(_, l)| l))
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Local data of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.get(id).map(|n| &n.local)
    }

    /// Parent of a live node, or `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a live node, bottom to top.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// The trail from `id`'s root down to `id`.
    pub fn trail_to(&self, id: NodeId) -> Option<Trail> {
        if !self.is_alive(id) {
            return None;
        }
        let mut out = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            out.push(n);
            current = self.node(n).parent;
        }
        out.reverse();
        Some(Trail::from_vec(out))
    }

    /// Local bounds of the node's own content.
    pub fn self_bounds(&self, id: NodeId) -> Option<Rect> {
        self.get(id).and_then(|n| n.local.kind.bounds())
    }

    /// Conservative parent-space bounds of everything visible in the subtree.
    ///
    /// Clips are applied through their bounding boxes. Pointer areas are not
    /// included; visual picks never hit outside these bounds.
    pub fn subtree_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        if !node.local.visible {
            return None;
        }
        let mut bounds = node.local.kind.bounds();
        for child in &node.children {
            if let Some(cb) = self.subtree_bounds(*child) {
                bounds = Some(bounds.map_or(cb, |b| b.union(cb)));
            }
        }
        let mut bounds = bounds?;
        if let Some(clip) = &node.local.clip {
            bounds = bounds.intersect(clip.bounding_box());
        }
        Some(transform_rect_bbox(node.local.local_transform, bounds))
    }

    /// Every clip and pointer area with non-finite coordinates under `root`.
    pub fn invalid_regions(&self, root: NodeId) -> Vec<InvalidRegion> {
        let mut out = Vec::new();
        self.collect_invalid_regions(root, &mut out);
        out
    }

    fn collect_invalid_regions(&self, id: NodeId, out: &mut Vec<InvalidRegion>) {
        let Some(node) = self.get(id) else {
            return;
        };
        let regions = [
            (&node.local.clip, RegionKind::Clip),
            (&node.local.mouse_area, RegionKind::MouseArea),
            (&node.local.touch_area, RegionKind::TouchArea),
        ];
        for (shape, region) in regions {
            if shape.as_ref().is_some_and(|s| !s.is_finite()) {
                out.push(InvalidRegion { node: id, region });
            }
        }
        for child in &node.children {
            self.collect_invalid_regions(*child, out);
        }
    }

    // --- internals ---

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.get(id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Local transform of a live node; panics if `id` is stale.
    pub(crate) fn local_transform(&self, id: NodeId) -> Affine {
        self.node(id).local.local_transform
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
