// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking: resolve a point to the [`Trail`] of the topmost node under it.
//!
//! ## Traversal
//!
//! Depth-first from the given root. At each node:
//!
//! 1. Invisible nodes prune their subtree.
//! 2. Input picks (any area flag or [`PickFlags::PICKABLE_AWARE`]) prune [`Pickable::No`] subtrees.
//! 3. The point is mapped into node-local space through the inverse local transform.
//! 4. A clip that does not contain the local point prunes the subtree.
//! 5. Children are tested from last to first (topmost first); the first hit wins.
//! 6. Otherwise the node tests itself: its own content, plus the requested pointer areas.
//!
//! The trail is assembled leaf-first while the recursion unwinds.
//!
//! Picking takes `&Tree`; it never mutates the tree and has no hidden state,
//! so repeated picks of the same point on an unchanged tree return equal trails.

use alloc::vec::Vec;
use kurbo::Point;

use crate::error::{InvalidRegion, PickError, RegionKind};
use crate::geometry::{Shape, contains_region, contains_self, invert};
use crate::trail::Trail;
use crate::tree::{Node, Tree};
use crate::types::{NodeId, PickFlags, Pickable};

impl Tree {
    /// Pick the topmost node under `pt`, given in `root`'s parent space.
    ///
    /// Returns `Ok(None)` when nothing is hit, including when `root` is stale
    /// or invisible. With [`PickFlags::SEEK_LISTENER`] the raw hit is resolved
    /// as described in [`Tree::pick_target`].
    ///
    /// # Errors
    ///
    /// [`PickError::DegenerateTransform`] if a visited node's transform is not invertible.
    pub fn pick(
        &self,
        root: NodeId,
        pt: Point,
        flags: PickFlags,
    ) -> Result<Option<Trail>, PickError> {
        if !self.is_alive(root) {
            return Ok(None);
        }
        let mut leaf_first = Vec::new();
        if !self.pick_node(root, pt, flags, &mut leaf_first)? {
            return Ok(None);
        }
        leaf_first.reverse();
        let trail = Trail::from_vec(leaf_first);
        if flags.contains(PickFlags::SEEK_LISTENER) {
            return Ok(self.seek_listener(trail));
        }
        Ok(Some(trail))
    }

    /// Pick the node that should receive an event at `pt`.
    ///
    /// Runs [`Tree::pick`] with [`PickFlags::SEEK_LISTENER`] added, then walks
    /// from the hit leaf toward the root to the nearest node with an input
    /// listener and truncates the trail there. If that node's first listener
    /// targets a node already on the trail above it, the trail is truncated at
    /// the target instead. Returns `Ok(None)` when no node on the hit trail has
    /// a listener.
    ///
    /// # Errors
    ///
    /// [`PickError::DegenerateTransform`] if a visited node's transform is not invertible.
    pub fn pick_target(
        &self,
        root: NodeId,
        pt: Point,
        flags: PickFlags,
    ) -> Result<Option<Trail>, PickError> {
        self.pick(root, pt, flags | PickFlags::SEEK_LISTENER)
    }

    /// Every trail under `pt` whose leaf hits itself, topmost first.
    ///
    /// Pruning works as in [`Tree::pick`]; the first entry is what `pick`
    /// returns without [`PickFlags::SEEK_LISTENER`]. Useful for inspection
    /// tools that show everything stacked under the pointer.
    ///
    /// # Errors
    ///
    /// [`PickError::DegenerateTransform`] if a visited node's transform is not invertible.
    pub fn pick_all(
        &self,
        root: NodeId,
        pt: Point,
        flags: PickFlags,
    ) -> Result<Vec<Trail>, PickError> {
        let mut out = Vec::new();
        if self.is_alive(root) {
            let mut prefix = Vec::new();
            self.pick_all_node(root, pt, flags, &mut prefix, &mut out)?;
        }
        Ok(out)
    }

    fn pick_node(
        &self,
        id: NodeId,
        parent_pt: Point,
        flags: PickFlags,
        leaf_first: &mut Vec<NodeId>,
    ) -> Result<bool, PickError> {
        let node = self.node(id);
        let Some(pt) = Self::enter_node(id, node, parent_pt, flags)? else {
            return Ok(false);
        };
        for &child in node.children.iter().rev() {
            if self.pick_node(child, pt, flags, leaf_first)? {
                leaf_first.push(id);
                return Ok(true);
            }
        }
        if Self::hits_self(id, node, pt, flags) {
            leaf_first.push(id);
            return Ok(true);
        }
        Ok(false)
    }

    fn pick_all_node(
        &self,
        id: NodeId,
        parent_pt: Point,
        flags: PickFlags,
        prefix: &mut Vec<NodeId>,
        out: &mut Vec<Trail>,
    ) -> Result<(), PickError> {
        let node = self.node(id);
        let Some(pt) = Self::enter_node(id, node, parent_pt, flags)? else {
            return Ok(());
        };
        prefix.push(id);
        for &child in node.children.iter().rev() {
            self.pick_all_node(child, pt, flags, prefix, out)?;
        }
        if Self::hits_self(id, node, pt, flags) {
            out.push(Trail::from_vec(prefix.clone()));
        }
        prefix.pop();
        Ok(())
    }

    /// Apply the pruning rules and map the point into local space.
    ///
    /// `Ok(None)` means the subtree is pruned.
    fn enter_node(
        id: NodeId,
        node: &Node,
        parent_pt: Point,
        flags: PickFlags,
    ) -> Result<Option<Point>, PickError> {
        if !node.local.visible {
            return Ok(None);
        }
        if flags.is_input() && node.local.pickable == Pickable::No {
            return Ok(None);
        }
        let inverse = invert(node.local.local_transform)
            .ok_or(PickError::DegenerateTransform { node: id })?;
        let pt = inverse * parent_pt;
        if let Some(clip) = &node.local.clip {
            match contains_region(clip, pt) {
                Some(true) => {}
                Some(false) => return Ok(None),
                None => {
                    report_invalid(InvalidRegion {
                        node: id,
                        region: RegionKind::Clip,
                    });
                    return Ok(None);
                }
            }
        }
        Ok(Some(pt))
    }

    fn hits_self(id: NodeId, node: &Node, pt: Point, flags: PickFlags) -> bool {
        if contains_self(&node.local.kind, pt) {
            return true;
        }
        let areas = [
            (
                PickFlags::USE_MOUSE_AREA,
                &node.local.mouse_area,
                RegionKind::MouseArea,
            ),
            (
                PickFlags::USE_TOUCH_AREA,
                &node.local.touch_area,
                RegionKind::TouchArea,
            ),
        ];
        areas.into_iter().any(|(flag, area, region)| {
            flags.contains(flag)
                && area
                    .as_ref()
                    .is_some_and(|area| area_contains(id, area, region, pt))
        })
    }

    fn seek_listener(&self, trail: Trail) -> Option<Trail> {
        let (idx, owner) = trail
            .iter()
            .enumerate()
            .rev()
            .find(|(_, id)| !self.node(*id).listeners.is_empty())?;
        let first = self.node(owner).listeners[0].1;
        if let Some(target) = first.target {
            match trail.index_of(target) {
                Some(target_idx) if target_idx <= idx => {
                    tracing::trace!(?owner, ?target, "listener redirects pick target");
                    return Some(trail.truncated(target_idx + 1));
                }
                _ => {
                    tracing::trace!(?owner, ?target, "listener target not on trail; ignored");
                }
            }
        }
        Some(trail.truncated(idx + 1))
    }
}

fn area_contains(id: NodeId, area: &Shape, region: RegionKind, pt: Point) -> bool {
    match contains_region(area, pt) {
        Some(hit) => hit,
        None => {
            report_invalid(InvalidRegion { node: id, region });
            false
        }
    }
}

fn report_invalid(invalid: InvalidRegion) {
    tracing::warn!(node = ?invalid.node, region = ?invalid.region, "{invalid}");
}
