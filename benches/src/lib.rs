// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the Bower benchmarks.

use bower_scene::{Canvas, CircleShape, NodeDesc, RectShape, Scene, TextShape};
use bower_text::{Color, Font, GlyphId, TextCanvas};
use kurbo::{Point, Rect};

/// A canvas that drops every draw call, so benchmarks time layout only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCanvas;

impl TextCanvas for NullCanvas {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_glyph(
        &mut self,
        _font: &dyn Font,
        _glyph: GlyphId,
        _codepoint: char,
        _origin: Point,
        _font_size: f64,
        _color: Color,
    ) {
    }
}

impl Canvas for NullCanvas {
    fn stroke_rect(&mut self, _rect: Rect, _thickness: f64, _color: Color) {}

    fn fill_rounded_rect(&mut self, _rect: Rect, _roundness: f64, _color: Color) {}

    fn fill_circle(&mut self, _center: Point, _radius: f64, _color: Color) {}
}

/// `words` words of mixed length, separated by spaces with a newline every
/// twelfth word and an occasional multi-byte codepoint.
pub fn paragraph(words: usize) -> String {
    const WORDS: [&str; 8] = [
        "lorem", "ipsum", "dolor", "sit", "amet", "caf\u{e9}", "adipiscing", "elit",
    ];
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            text.push(if i % 12 == 0 { '\n' } else { ' ' });
        }
        text.push_str(WORDS[i % WORDS.len()]);
    }
    text
}

/// A scene with `breadth` panels under the root, each holding `depth` nested
/// nodes that alternate between rectangles, circles and short labels.
pub fn populated_scene(breadth: usize, depth: usize) -> Scene {
    let mut scene = Scene::new();
    let root = scene.root();
    for b in 0..breadth {
        #[allow(clippy::cast_precision_loss, reason = "Fixture sizes are small.")]
        let x = b as f64 * 40.0;
        let Ok(mut parent) = scene.spawn(root, NodeDesc::new().at((x, 0.0))) else {
            continue;
        };
        for d in 0..depth {
            let desc = NodeDesc::new().at((2.0, 2.0));
            let desc = match d % 3 {
                0 => desc.with_shape(RectShape::new(Rect::new(0.0, 0.0, 30.0, 10.0))),
                1 => desc.with_shape(CircleShape::new(4.0)),
                _ => desc.with_shape(TextShape::new("label").boxed(36.0, None)),
            };
            match scene.spawn(parent, desc) {
                Ok(child) => parent = child,
                Err(_) => break,
            }
        }
    }
    scene.init(root);
    scene
}
