// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A canvas that records draw calls, for tests.

use alloc::vec::Vec;

use bower_text::{Color, Font, GlyphId, TextCanvas};
use kurbo::{Point, Rect};

use crate::canvas::Canvas;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Fill(Rect, Color),
    RoundedFill(Rect, f64, Color),
    Stroke(Rect, f64, Color),
    Circle(Point, f64, Color),
    Glyph(char, Point, Color),
}

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) ops: Vec<Op>,
}

impl Recorder {
    /// Codepoints blitted so far, in order.
    pub(crate) fn glyphs(&self) -> Vec<char> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Glyph(c, ..) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

impl TextCanvas for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(Op::Fill(rect, color));
    }

    fn draw_glyph(
        &mut self,
        _font: &dyn Font,
        _glyph: GlyphId,
        codepoint: char,
        origin: Point,
        _font_size: f64,
        color: Color,
    ) {
        self.ops.push(Op::Glyph(codepoint, origin, color));
    }
}

impl Canvas for Recorder {
    fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: Color) {
        self.ops.push(Op::Stroke(rect, thickness, color));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f64, color: Color) {
        self.ops.push(Op::RoundedFill(rect, roundness, color));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.ops.push(Op::Circle(center, radius, color));
    }
}
