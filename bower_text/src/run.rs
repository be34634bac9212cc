// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text runs: a byte string, the font it is set in, and its style.

use kurbo::{Point, Rect, Size};

use crate::font::Font;
use crate::glyphs::Glyphs;
use crate::sink::{DrawSink, GlyphSink, MeasureSink, TextCanvas, TextPaint};

/// How a run is set: size, tracking and wrapping policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Requested font size in pixels.
    pub font_size: f64,
    /// Extra horizontal space added after every glyph except the last one of the run.
    pub spacing: f64,
    /// Break lines at whitespace when possible. When off, only newlines and
    /// overflow break lines.
    pub word_wrap: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            spacing: 1.0,
            word_wrap: true,
        }
    }
}

impl TextStyle {
    /// Height of one glyph box: the font size.
    #[must_use]
    pub fn glyph_height(&self) -> f64 {
        self.font_size
    }

    /// Vertical distance between consecutive lines: one and a half glyph boxes.
    #[must_use]
    pub fn line_advance(&self) -> f64 {
        self.font_size * 1.5
    }
}

/// A byte string set in a font with a [`TextStyle`].
///
/// All layout entry points hang off this type and share one line breaker,
/// [`TextRun::glyphs`], so drawn text and measured text always agree on where
/// lines break.
///
/// ```rust
/// use bower_text::{Monospace, TextRun, TextStyle};
///
/// let font = Monospace::new(10.0, 10.0);
/// let style = TextStyle { font_size: 10.0, spacing: 0.0, word_wrap: true };
/// let run = TextRun::new(&font, b"hello brave world", style);
///
/// // "hello " fits in 60px, so each word lands on its own line.
/// assert_eq!(run.measure_height(60.0), 40.0);
/// ```
#[derive(Clone, Copy)]
pub struct TextRun<'a> {
    /// Font used for glyph lookup and metrics.
    pub font: &'a dyn Font,
    /// Possibly malformed UTF-8 bytes.
    pub text: &'a [u8],
    /// Size, spacing and wrapping.
    pub style: TextStyle,
}

impl core::fmt::Debug for TextRun<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextRun")
            .field("text_len", &self.text.len())
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl<'a> TextRun<'a> {
    /// Creates a run.
    pub fn new(font: &'a dyn Font, text: &'a [u8], style: TextStyle) -> Self {
        Self { font, text, style }
    }

    /// The same run with word wrapping disabled, as used by unconstrained text.
    #[must_use]
    pub fn unwrapped(self) -> Self {
        Self {
            style: TextStyle {
                word_wrap: false,
                ..self.style
            },
            ..self
        }
    }

    /// Breaks the run into lines no wider than `max_width` and yields every
    /// codepoint with its position relative to the run origin.
    pub fn glyphs(&self, max_width: f64) -> Glyphs<'a> {
        Glyphs::new(*self, max_width)
    }

    /// Feeds every positioned glyph to `sink` until it asks to stop.
    pub fn layout<S: GlyphSink + ?Sized>(&self, max_width: f64, sink: &mut S) {
        for glyph in self.glyphs(max_width) {
            if sink.glyph(&glyph).is_break() {
                break;
            }
        }
    }

    /// Height of the tightest box enclosing every visible glyph when the run is
    /// broken at `max_width`. Blank lines at the end do not count.
    pub fn measure_height(&self, max_width: f64) -> f64 {
        let mut sink = MeasureSink::new(self.style.glyph_height());
        self.layout(max_width, &mut sink);
        sink.height()
    }

    /// Natural extent of the run with no width constraint: lines break only at
    /// newlines, width is the widest line.
    ///
    /// Every newline adds a line advance to the height, trailing ones included,
    /// so `"abc\n"` is one glyph box plus one line advance tall. Empty text
    /// measures zero.
    pub fn measure_natural(&self) -> Size {
        let mut width = 0.0_f64;
        let mut newlines = 0_u32;
        let mut any = false;
        for glyph in self.unwrapped().glyphs(f64::INFINITY) {
            any = true;
            if glyph.codepoint == '\n' {
                newlines += 1;
            } else {
                width = width.max(glyph.origin.x + glyph.advance);
            }
        }
        if !any {
            return Size::ZERO;
        }
        let height = self.style.glyph_height() + f64::from(newlines) * self.style.line_advance();
        Size::new(width, height)
    }

    /// Draws the run inside `bounds`, wrapping at its width and truncating at its height.
    ///
    /// `bounds` may have an infinite height.
    pub fn draw<C: TextCanvas + ?Sized>(&self, canvas: &mut C, bounds: Rect, paint: &TextPaint) {
        let mut sink = DrawSink::new(canvas, self, bounds.origin(), bounds.height(), paint);
        self.layout(bounds.width(), &mut sink);
    }

    /// Draws the run at `origin` with no width or height constraint.
    pub fn draw_natural<C: TextCanvas + ?Sized>(
        &self,
        canvas: &mut C,
        origin: Point,
        paint: &TextPaint,
    ) {
        let bounds = Rect::from_origin_size(origin, (f64::INFINITY, f64::INFINITY));
        self.unwrapped().draw(canvas, bounds, paint);
    }
}
