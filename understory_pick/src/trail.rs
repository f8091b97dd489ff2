// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root-to-node paths through the tree.

use alloc::vec::Vec;

use kurbo::{Affine, Point};

use crate::error::PickError;
use crate::geometry::invert;
use crate::tree::Tree;
use crate::types::NodeId;

/// An immutable root→node path `[root, ..., leaf]`.
///
/// Each element is a child of the previous one. Equality and hashing are
/// structural over the sequence of ids; a trail carries no transform snapshot,
/// so transforms are always read from the tree at the time they are asked for.
///
/// Trails are produced by [`Tree::pick`] and [`Tree::trail_to`]. Operations
/// that "modify" a trail return a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Trail {
    nodes: Vec<NodeId>,
}

impl Trail {
    /// Build a trail from a root→leaf sequence the caller already knows to be an ancestor chain.
    pub(crate) fn from_vec(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// A trail holding just `root`.
    pub fn from_root(root: NodeId) -> Self {
        Self {
            nodes: alloc::vec![root],
        }
    }

    /// Number of nodes on the trail.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the trail has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node (the root), if any.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node (the leaf), if any.
    pub fn last_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// The nodes from root to leaf.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Node at depth `index` (the root is at `0`).
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Returns true if `node` is on the trail.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Depth of `node` on the trail.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| *n == node)
    }

    /// The prefix of this trail ending at `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not on the trail.
    #[must_use]
    pub fn subtrail_to(&self, node: NodeId) -> Self {
        let Some(idx) = self.index_of(node) else {
            panic!("subtrail_to: node {node:?} is not on the trail");
        };
        self.truncated(idx + 1)
    }

    /// This trail extended by `node`.
    ///
    /// The caller asserts that `node` is a child of [`Trail::last_node`];
    /// [`Trail::is_valid`] checks that against a tree.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already on the trail.
    #[must_use]
    pub fn add_descendant(&self, node: NodeId) -> Self {
        assert!(
            !self.contains(node),
            "add_descendant: node {node:?} is already on the trail"
        );
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Self { nodes }
    }

    /// Returns true if `prefix` is a (not necessarily strict) prefix of this trail.
    pub fn is_extension_of(&self, prefix: &Self) -> bool {
        self.nodes.starts_with(&prefix.nodes)
    }

    /// Length of the shared ancestry of two trails.
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.nodes
            .iter()
            .zip(&other.nodes)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Product of the local transforms of every node, root to leaf.
    ///
    /// Maps the leaf's local coordinates to the root's parent space.
    ///
    /// # Panics
    ///
    /// Panics if a node on the trail has been removed from `tree`.
    pub fn cumulative_transform(&self, tree: &Tree) -> Affine {
        self.nodes
            .iter()
            .fold(Affine::IDENTITY, |acc, id| acc * tree.local_transform(*id))
    }

    /// Map a point from the leaf's local space to the root's parent space.
    pub fn local_to_global_point(&self, tree: &Tree, pt: Point) -> Point {
        self.cumulative_transform(tree) * pt
    }

    /// Map a point from the root's parent space into the leaf's local space.
    ///
    /// Inverts each level in turn, the same way [`Tree::pick`] descends, and
    /// names the first node whose transform cannot be inverted.
    pub fn global_to_local_point(&self, tree: &Tree, pt: Point) -> Result<Point, PickError> {
        self.nodes.iter().try_fold(pt, |pt, id| {
            let inverse = invert(tree.local_transform(*id))
                .ok_or(PickError::DegenerateTransform { node: *id })?;
            Ok(inverse * pt)
        })
    }

    /// Returns true if every node is alive in `tree` and each is the parent of the next.
    pub fn is_valid(&self, tree: &Tree) -> bool {
        if !self.nodes.iter().all(|id| tree.is_alive(*id)) {
            return false;
        }
        self.nodes
            .windows(2)
            .all(|w| tree.parent(w[1]) == Some(w[0]))
    }

    /// Iterate from root to leaf.
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, NodeId>> {
        self.nodes.iter().copied()
    }

    pub(crate) fn truncated(&self, len: usize) -> Self {
        Self {
            nodes: self.nodes[..len].to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = NodeId;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
