// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Support code for the Bower demos: a canvas that logs instead of drawing.
//!
//! Run a demo with `RUST_LOG` set to see its output, e.g.
//! `RUST_LOG=info cargo run -p bower_demos --example text_box`.

use bower_scene::{Canvas, Scene};
use bower_text::{Color, Font, GlyphId, TextCanvas};
use kurbo::{Point, Rect};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// A [`Canvas`] that reports draw calls as tracing events.
///
/// Shapes log at `info`; glyphs log at `debug` and are summarized per frame.
#[derive(Debug, Default)]
pub struct LogCanvas {
    glyphs: usize,
    text: String,
}

impl LogCanvas {
    /// Logs the glyphs drawn since the last call and resets the counter.
    pub fn finish_frame(&mut self, frame: usize) {
        info!(frame, glyphs = self.glyphs, text = %self.text, "frame done");
        self.glyphs = 0;
        self.text.clear();
    }
}

impl TextCanvas for LogCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        info!(?rect, ?color, "fill_rect");
    }

    fn draw_glyph(
        &mut self,
        _font: &dyn Font,
        _glyph: GlyphId,
        codepoint: char,
        origin: Point,
        font_size: f64,
        _color: Color,
    ) {
        debug!(%codepoint, x = origin.x, y = origin.y, font_size, "glyph");
        self.glyphs += 1;
        self.text.push(codepoint);
    }
}

impl Canvas for LogCanvas {
    fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        debug!(?rect, thickness, ?color, "stroke_rect");
    }

    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f64, color: Color) {
        info!(?rect, roundness, ?color, "fill_rounded_rect");
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        info!(?center, radius, ?color, "fill_circle");
    }
}

/// Logs every node of `scene` in depth-first order with its global bounds.
pub fn dump(scene: &Scene) {
    let mut next = Some(scene.root());
    while let Some(node) = next {
        info!(
            ?node,
            position = ?scene.global_position(node),
            bounds = ?scene.global_bounding_box(node),
            "node"
        );
        next = scene.next_depth_first(node);
    }
}
