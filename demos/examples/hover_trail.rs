// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions from a pointer path.
//!
//! This example moves a mouse across two nested cards and a sibling, picking
//! at every step and printing the enter/exit events derived from successive
//! trails. A second pointer shows that touch hover is tracked separately.
//!
//! Run:
//! - `cargo run -p understory_examples --example hover_trail`

use kurbo::{Affine, Point, Rect};
use understory_hover::{HoverTracker, PointerHover, PointerId};
use understory_pick::{LocalNode, NodeKind, PathNode, PickError, PickFlags, Tree};

fn card(at: (f64, f64), w: f64, h: f64) -> LocalNode {
    LocalNode {
        local_transform: Affine::translate(at),
        kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, w, h))),
        ..Default::default()
    }
}

fn main() -> Result<(), PickError> {
    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::default());
    let outer = tree.insert(Some(root), card((0.0, 0.0), 100.0, 100.0));
    let inner = tree.insert(Some(outer), card((20.0, 20.0), 40.0, 40.0));
    let side = tree.insert(Some(root), card((120.0, 0.0), 50.0, 50.0));
    println!("outer={outer:?} inner={inner:?} side={side:?}");

    let path = [
        Point::new(-10.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(30.0, 30.0),
        Point::new(35.0, 35.0),
        Point::new(90.0, 90.0),
        Point::new(130.0, 10.0),
        Point::new(200.0, 200.0),
    ];

    let mut mouse = HoverTracker::new();
    for pt in path {
        let hit = tree.pick(root, pt, PickFlags::MOUSE)?;
        let events = mouse.update(hit.as_ref());
        println!("mouse at {pt:?}: {events:?}");
    }

    let mut pointers = PointerHover::new();
    let finger = PointerId(1);
    let hit = tree.pick(root, Point::new(25.0, 25.0), PickFlags::TOUCH)?;
    println!("touch down: {:?}", pointers.update(finger, hit.as_ref()));
    println!("inner hovered: {}", pointers.is_hovered(inner));
    println!("touch up: {:?}", pointers.remove(finger));
    Ok(())
}
