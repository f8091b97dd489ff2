// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect};
use understory_pick::{
    InputListener, LocalNode, NodeId, NodeKind, PathNode, PickFlags, Shape, Tree,
};

fn cell(x: f64, y: f64, size: f64) -> LocalNode {
    LocalNode {
        local_transform: Affine::translate((x, y)),
        kind: NodeKind::Path(PathNode::filled(Rect::new(0.0, 0.0, size, size))),
        ..Default::default()
    }
}

/// `n * n` siblings laid out on a grid under a single root.
fn wide_tree(n: usize, size: f64) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::default());
    for y in 0..n {
        for x in 0..n {
            let _ = tree.insert(Some(root), cell(x as f64 * size, y as f64 * size, size));
        }
    }
    (tree, root)
}

/// A chain of `depth` nested nodes, each offset and clipped, with a listener at the top.
fn deep_tree(depth: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(None, LocalNode::default());
    tree.add_input_listener(root, InputListener::new());
    let mut parent = root;
    for _ in 0..depth {
        parent = tree.insert(
            Some(parent),
            LocalNode {
                clip: Some(Shape::Rect(Rect::new(0.0, 0.0, 1000.0, 1000.0))),
                ..cell(1.0, 1.0, 1000.0)
            },
        );
    }
    (tree, root)
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_wide");
    for n in [16_usize, 64] {
        let (tree, root) = wide_tree(n, 10.0);
        let extent = n as f64 * 10.0;
        // Bottom-left cells are tested last.
        let far = Point::new(5.0, 5.0);
        let miss = Point::new(extent + 5.0, extent + 5.0);
        group.bench_with_input(BenchmarkId::new("first_cell", n * n), &far, |b, pt| {
            b.iter(|| black_box(tree.pick(root, *pt, PickFlags::VISUAL)));
        });
        group.bench_with_input(BenchmarkId::new("miss", n * n), &miss, |b, pt| {
            b.iter(|| black_box(tree.pick(root, *pt, PickFlags::MOUSE)));
        });
        group.bench_with_input(BenchmarkId::new("pick_all", n * n), &far, |b, pt| {
            b.iter(|| black_box(tree.pick_all(root, *pt, PickFlags::VISUAL)));
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_deep");
    for depth in [16_usize, 128] {
        let (tree, root) = deep_tree(depth);
        let pt = Point::new(depth as f64 + 5.0, depth as f64 + 5.0);
        group.bench_with_input(BenchmarkId::new("pick", depth), &pt, |b, pt| {
            b.iter(|| black_box(tree.pick(root, *pt, PickFlags::MOUSE)));
        });
        group.bench_with_input(BenchmarkId::new("pick_target", depth), &pt, |b, pt| {
            b.iter(|| black_box(tree.pick_target(root, *pt, PickFlags::MOUSE)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep);
criterion_main!(benches);
