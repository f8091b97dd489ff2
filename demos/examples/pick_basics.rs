// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking basics: paint order, transforms, clips, and pick modes.
//!
//! This example builds a small scene, then picks a few points in visual and
//! mouse mode and prints the resulting trails along with the hit point in the
//! leaf's local coordinates.
//!
//! Run:
//! - `cargo run -p understory_examples --example pick_basics`

use kurbo::{Affine, Circle, Point, Rect};
use understory_pick::{
    LocalNode, NodeKind, PathNode, PickError, PickFlags, Pickable, Shape, Tree,
};

fn main() -> Result<(), PickError> {
    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::default());

    // A panel moved to (100, 100), clipped to its 200x100 frame.
    let panel = tree.insert(
        Some(root),
        LocalNode {
            local_transform: Affine::translate((100.0, 100.0)),
            clip: Some(Shape::Rect(Rect::new(0.0, 0.0, 200.0, 100.0))),
            kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, 200.0, 100.0))),
            ..Default::default()
        },
    );
    // A button inside the panel, partly hanging outside the clip.
    let button = tree.insert(
        Some(panel),
        LocalNode {
            local_transform: Affine::translate((150.0, 60.0)),
            kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, 80.0, 30.0))),
            ..Default::default()
        },
    );
    // A decorative badge drawn over the button that should not catch input.
    let badge = tree.insert(
        Some(panel),
        LocalNode {
            local_transform: Affine::translate((160.0, 65.0)),
            pickable: Pickable::No,
            kind: NodeKind::Path(PathNode::filled(Circle::new((0.0, 0.0), 6.0))),
            ..Default::default()
        },
    );

    println!("root={root:?} panel={panel:?} button={button:?} badge={badge:?}");

    let probes = [
        ("inside button", Point::new(270.0, 170.0)),
        ("on badge", Point::new(260.0, 165.0)),
        ("button outside clip", Point::new(320.0, 180.0)),
        ("panel body", Point::new(110.0, 110.0)),
        ("empty space", Point::new(10.0, 10.0)),
    ];

    for (label, pt) in probes {
        for (mode, flags) in [("visual", PickFlags::VISUAL), ("mouse", PickFlags::MOUSE)] {
            match tree.pick(root, pt, flags)? {
                Some(trail) => {
                    let local = trail.global_to_local_point(&tree, pt)?;
                    println!(
                        "{label:>20} [{mode:>6}] -> {:?} at local {local:?}",
                        trail.nodes()
                    );
                }
                None => println!("{label:>20} [{mode:>6}] -> nothing"),
            }
        }
    }

    // Everything stacked under the badge, topmost first.
    let stacked = tree.pick_all(root, Point::new(260.0, 165.0), PickFlags::VISUAL)?;
    println!("stacked under badge: {}", stacked.len());
    for trail in &stacked {
        println!("  {:?}", trail.last_node());
    }
    Ok(())
}
