// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame passes and traversal over populated scenes.

use std::hint::black_box;

use bower_benches::{NullCanvas, populated_scene};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const SHAPES: [(usize, usize); 3] = [(8, 8), (64, 4), (16, 32)];

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for (breadth, depth) in SHAPES {
        let mut scene = populated_scene(breadth, depth);
        let root = scene.root();
        group.bench_function(BenchmarkId::from_parameter(format!("{breadth}x{depth}")), |b| {
            b.iter(|| {
                scene.update(root);
                scene.render(root, &mut NullCanvas);
            });
        });
    }
    group.finish();
}

fn bench_global_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_bounding_box");
    for (breadth, depth) in SHAPES {
        let scene = populated_scene(breadth, depth);
        let nodes: Vec<_> =
            std::iter::successors(Some(scene.root()), |&n| scene.next_depth_first(n)).collect();
        group.bench_function(BenchmarkId::from_parameter(format!("{breadth}x{depth}")), |b| {
            b.iter(|| {
                for &node in &nodes {
                    black_box(scene.global_bounding_box(node));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frame, bench_global_bounds);
criterion_main!(benches);
