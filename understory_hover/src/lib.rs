// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hover --heading-base-level=0

//! Understory Hover: deterministic, `no_std` hover tracking for UI.
//!
//! ## Overview
//!
//! This crate turns a stream of picked trails into enter/exit transitions.
//! It does not pick.
//! Instead, feed it the [`Trail`](understory_pick::Trail) returned by
//! [`understory_pick::Tree::pick`] once per pointer-move frame, and it emits
//! the minimal transition from the previous trail.
//!
//! ## Ordering
//!
//! The shared ancestry of the old and new trails (their common prefix) is left alone.
//! Nodes after it on the old trail exit from inner-most to outer-most, then nodes
//! after it on the new trail enter from outer-most to inner-most.
//! An unchanged trail produces no events.
//!
//! ## State ownership
//!
//! There is no global hover state. Each pointer stream owns a
//! [`HoverTracker`](crate::HoverTracker); [`PointerHover`](crate::PointerHover)
//! keeps one per [`PointerId`](crate::PointerId) for multi-touch.
//!
//! ## Workflow
//!
//! 1) Pick: [`Tree::pick`](understory_pick::Tree::pick) with the pointer's flags.
//! 2) Hover: pass the result to [`HoverTracker::update`](crate::HoverTracker::update) and
//!    deliver the returned events in order.
//! 3) Leave: call [`HoverTracker::clear`](crate::HoverTracker::clear) when the pointer leaves
//!    the viewport and you still want exits, or [`HoverTracker::reset`](crate::HoverTracker::reset)
//!    when the root is detached.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hover;
pub mod pointers;

pub use hover::{HoverEvent, HoverTracker};
pub use pointers::{PointerHover, PointerId};
