// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pick --heading-base-level=0

//! Understory Pick: Kurbo-native pointer picking over a retained 2D scene tree.
//!
//! Every interactive view needs to answer "what is under the pointer?".
//! This crate answers it for a tree of nodes with local transforms, clips,
//! pointer areas, and input listeners, and returns the answer as a [`Trail`]:
//! the root→node path of the hit.
//!
//! - Represents a hierarchy of nodes with local affine transforms, paint-ordered children,
//!   visibility and pickability, self content, clips, and mouse/touch areas.
//! - Picks deterministically: the last-added (topmost) child is tested first and the first hit wins.
//! - Supports a visual pick ("what is drawn here") and input picks ("who gets this event"),
//!   including resolution to the nearest listener-owning ancestor.
//!
//! ## Where this fits
//!
//! - Scene tree and picking: this crate.
//! - Hover tracking: `understory_hover` diffs successive trails into enter/exit events.
//! - Rendering and event dispatch: your toolkit. Picking reads paint *intent* only and never touches pixels.
//!
//! ## Pick modes
//!
//! [`PickFlags`] selects the mode:
//! - [`PickFlags::VISUAL`]: ignores [`Pickable`] and pointer areas. Used by inspectors and
//!   placement checks.
//! - [`PickFlags::MOUSE`] / [`PickFlags::TOUCH`] (or [`PickFlags::for_pointer`]): prune
//!   [`Pickable::No`] subtrees and extend each node's self hit with its mouse or touch area.
//! - [`PickFlags::SEEK_LISTENER`] (or [`Tree::pick_target`]): resolve the hit to the node that
//!   should receive the event.
//!
//! ## Errors
//!
//! A non-invertible local transform on a visited node aborts the pick with
//! [`PickError::DegenerateTransform`]. Clips and pointer areas with non-finite
//! coordinates are not errors: clips exclude everything and areas are ignored,
//! each occurrence is logged through `tracing`, and [`Tree::invalid_regions`]
//! lists them.
//!
//! ## API overview
//!
//! - [`Tree`]: node storage, structure edits, and picking.
//! - [`LocalNode`]: per-node data (transform, visibility, pickability, kind, clip, areas).
//! - [`NodeKind`], [`PathNode`], [`Shape`], [`Paint`], [`FillRule`]: self content.
//! - [`Trail`]: immutable root→node path with transform helpers.
//! - [`NodeId`]: generational handle of a node.
//!
//! Key operations:
//! - [`Tree::insert`](Tree::insert) → [`NodeId`]
//! - [`Tree::pick`](Tree::pick) → `Result<Option<Trail>, PickError>`
//! - [`Tree::pick_target`](Tree::pick_target) and [`Tree::pick_all`](Tree::pick_all)
//! - [`Trail::cumulative_transform`] and [`Trail::global_to_local_point`]
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_pick::{LocalNode, NodeKind, PathNode, PickFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::default());
//! let a = tree.insert(
//!     Some(root),
//!     LocalNode {
//!         kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, 10.0, 10.0))),
//!         ..Default::default()
//!     },
//! );
//! let b = tree.insert(
//!     Some(root),
//!     LocalNode {
//!         kind: NodeKind::Path(PathNode::filled(Rect::new(5.0, 5.0, 15.0, 15.0))),
//!         ..Default::default()
//!     },
//! );
//!
//! // The later sibling is on top.
//! let hit = tree.pick(root, Point::new(7.0, 7.0), PickFlags::VISUAL).unwrap().unwrap();
//! assert_eq!(hit.nodes(), &[root, b]);
//! let hit = tree.pick(root, Point::new(2.0, 2.0), PickFlags::VISUAL).unwrap().unwrap();
//! assert_eq!(hit.nodes(), &[root, a]);
//! assert!(tree.pick(root, Point::new(20.0, 20.0), PickFlags::VISUAL).unwrap().is_none());
//! ```
//!
//! ### Event targets
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_pick::{
//!     InputListener, LocalNode, NodeKind, PathNode, PickFlags, Pickable, Shape, Tree,
//! };
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, LocalNode::default());
//! let slider = tree.insert(Some(root), LocalNode::default());
//! let thumb = tree.insert(
//!     Some(slider),
//!     LocalNode {
//!         kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, 8.0, 8.0))),
//!         // Fingers are fat.
//!         touch_area: Some(Shape::Rect(Rect::new(-8.0, -8.0, 16.0, 16.0))),
//!         ..Default::default()
//!     },
//! );
//! tree.add_input_listener(slider, InputListener::new());
//!
//! let near = Point::new(-4.0, 4.0);
//! assert!(tree.pick_target(root, near, PickFlags::MOUSE).unwrap().is_none());
//! let target = tree.pick_target(root, near, PickFlags::TOUCH).unwrap().unwrap();
//! assert_eq!(target.last_node(), Some(slider));
//!
//! // Disabled controls stop receiving input but are still drawn.
//! tree.set_pickable(slider, Pickable::No);
//! assert!(tree.pick(root, Point::new(4.0, 4.0), PickFlags::MOUSE).unwrap().is_none());
//! let drawn = tree.pick(root, Point::new(4.0, 4.0), PickFlags::VISUAL).unwrap().unwrap();
//! assert_eq!(drawn.last_node(), Some(thumb));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
pub mod geometry;
mod pick;
mod trail;
mod tree;
mod types;
mod util;

pub use error::{InvalidRegion, PickError, RegionKind};
pub use geometry::{FillRule, NodeKind, Paint, PathNode, Shape};
pub use trail::Trail;
pub use tree::Tree;
pub use types::{
    InputListener, ListenerKey, LocalNode, NodeId, PickFlags, Pickable, PointerKind,
};
