// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking, measuring and drawing of text runs.

use std::hint::black_box;

use bower_benches::{NullCanvas, paragraph};
use bower_text::{Monospace, TextPaint, TextRun, TextStyle};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurbo::Rect;

fn bench_measure(c: &mut Criterion) {
    let font = Monospace::default();
    let mut group = c.benchmark_group("measure_height");
    for words in [16, 128, 1024] {
        let text = paragraph(words);
        for word_wrap in [true, false] {
            let style = TextStyle {
                word_wrap,
                ..TextStyle::default()
            };
            let run = TextRun::new(&font, text.as_bytes(), style);
            let label = if word_wrap { "wrap" } else { "nowrap" };
            group.bench_with_input(BenchmarkId::new(label, words), &run, |b, run| {
                b.iter(|| black_box(run.measure_height(black_box(240.0))));
            });
        }
    }
    group.finish();
}

fn bench_natural(c: &mut Criterion) {
    let font = Monospace::default();
    let text = paragraph(256);
    let run = TextRun::new(&font, text.as_bytes(), TextStyle::default());
    c.bench_function("measure_natural/256", |b| {
        b.iter(|| black_box(run.measure_natural()));
    });
}

fn bench_draw(c: &mut Criterion) {
    let font = Monospace::default();
    let text = paragraph(256);
    let run = TextRun::new(&font, text.as_bytes(), TextStyle::default());
    let paint = TextPaint::default();
    let mut group = c.benchmark_group("draw");
    for height in [60.0, f64::INFINITY] {
        let bounds = Rect::new(0.0, 0.0, 240.0, height);
        group.bench_with_input(BenchmarkId::from_parameter(height), &bounds, |b, bounds| {
            b.iter(|| run.draw(&mut NullCanvas, *bounds, &paint));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_measure, bench_natural, bench_draw);
criterion_main!(benches);
