// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving a hit to the node that should receive the event.
//!
//! A list row owns a click listener; its label and icon do not. Picking with
//! [`Tree::pick_target`](understory_pick::Tree::pick_target) walks up from the
//! hit leaf to the row. A second listener on the toolbar button redirects its
//! events to the toolbar that contains it.
//!
//! Run:
//! - `cargo run -p understory_examples --example listener_target`

use kurbo::{Affine, Point, Rect};
use understory_pick::{
    InputListener, LocalNode, NodeKind, PathNode, PickError, PickFlags, Shape, Tree,
};

fn filled(at: (f64, f64), w: f64, h: f64) -> LocalNode {
    LocalNode {
        local_transform: Affine::translate(at),
        kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, w, h))),
        ..Default::default()
    }
}

fn main() -> Result<(), PickError> {
    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::default());

    let row = tree.insert(Some(root), filled((0.0, 0.0), 300.0, 40.0));
    let icon = tree.insert(Some(row), filled((8.0, 8.0), 24.0, 24.0));
    let label = tree.insert(Some(row), filled((40.0, 10.0), 120.0, 20.0));
    tree.add_input_listener(row, InputListener::new());

    let toolbar = tree.insert(Some(root), filled((0.0, 50.0), 300.0, 30.0));
    let button = tree.insert(
        Some(toolbar),
        LocalNode {
            mouse_area: Some(Shape::Rect(Rect::new(-4.0, -4.0, 28.0, 28.0))),
            ..filled((4.0, 4.0), 24.0, 22.0)
        },
    );
    tree.add_input_listener(button, InputListener::targeting(toolbar));

    println!("row={row:?} icon={icon:?} label={label:?} toolbar={toolbar:?} button={button:?}");

    for pt in [
        Point::new(12.0, 12.0),
        Point::new(60.0, 20.0),
        Point::new(250.0, 20.0),
        Point::new(10.0, 60.0),
        Point::new(1.0, 51.0),
        Point::new(250.0, 60.0),
    ] {
        let raw = tree.pick(root, pt, PickFlags::MOUSE)?;
        let target = tree.pick_target(root, pt, PickFlags::MOUSE)?;
        println!(
            "{pt:?}: hit {:?} -> target {:?}",
            raw.and_then(|t| t.last_node()),
            target.and_then(|t| t.last_node()),
        );
    }
    Ok(())
}
