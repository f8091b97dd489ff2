// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by picking.

use core::fmt;

use crate::types::NodeId;

/// A pick could not be completed.
///
/// These are construction bugs upstream; the pick aborts rather than report
/// a wrong hit or a wrong miss.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PickError {
    /// The node's local transform (or a trail's cumulative transform) has no inverse.
    DegenerateTransform {
        /// Node whose transform is degenerate.
        node: NodeId,
    },
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTransform { node } => {
                write!(f, "non-invertible local transform on node {node:?}")
            }
        }
    }
}

impl core::error::Error for PickError {}

/// Which region of a node was found to be invalid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegionKind {
    /// [`LocalNode::clip`](crate::LocalNode::clip).
    Clip,
    /// [`LocalNode::mouse_area`](crate::LocalNode::mouse_area).
    MouseArea,
    /// [`LocalNode::touch_area`](crate::LocalNode::touch_area).
    TouchArea,
}

/// A clip or pointer area with NaN or infinite coordinates.
///
/// Picking never fails on these. An invalid clip excludes everything under it
/// and an invalid pointer area is ignored; each occurrence is logged.
/// [`Tree::invalid_regions`](crate::Tree::invalid_regions) lists them up front.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InvalidRegion {
    /// Node carrying the region.
    pub node: NodeId,
    /// Which of its regions is invalid.
    pub region: RegionKind,
}

impl fmt::Display for InvalidRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.region {
            RegionKind::Clip => "clip",
            RegionKind::MouseArea => "mouse area",
            RegionKind::TouchArea => "touch area",
        };
        write!(f, "{what} of node {:?} has non-finite coordinates", self.node)
    }
}

impl core::error::Error for InvalidRegion {}
