// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Consumers of positioned glyphs: one that measures and one that draws.

use core::ops::{ControlFlow, Range};

use kurbo::{Point, Rect};

use crate::color::Color;
use crate::font::{Font, GlyphId};
use crate::glyphs::PositionedGlyph;
use crate::run::TextRun;

/// Something that consumes the output of the line breaker.
pub trait GlyphSink {
    /// Receives the next glyph. Returning [`ControlFlow::Break`] stops layout.
    fn glyph(&mut self, glyph: &PositionedGlyph) -> ControlFlow<()>;
}

/// Drawing primitives text needs from the rendering backend.
pub trait TextCanvas {
    /// Fills `rect`, given in canvas coordinates.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blits one glyph with its top-left corner at `origin`, scaled to `font_size`.
    fn draw_glyph(
        &mut self,
        font: &dyn Font,
        glyph: GlyphId,
        codepoint: char,
        origin: Point,
        font_size: f64,
        color: Color,
    );
}

/// A highlighted range of codepoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Half-open range of codepoint indices.
    pub range: Range<usize>,
    /// Tint of selected glyphs.
    pub tint: Color,
    /// Fill drawn behind selected glyphs.
    pub background: Color,
}

impl Selection {
    /// Whether the codepoint at `index` is selected.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }
}

/// Colors used to draw a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextPaint {
    /// Tint of unselected glyphs.
    pub tint: Color,
    /// Optional highlighted range.
    pub selection: Option<Selection>,
}

impl TextPaint {
    /// Plain text in one tint.
    #[must_use]
    pub fn solid(tint: Color) -> Self {
        Self {
            tint,
            selection: None,
        }
    }
}

/// Tracks the lowest edge of any visible glyph.
#[derive(Clone, Copy, Debug)]
pub struct MeasureSink {
    glyph_height: f64,
    height: f64,
}

impl MeasureSink {
    /// Creates a sink for glyph boxes `glyph_height` tall.
    #[must_use]
    pub fn new(glyph_height: f64) -> Self {
        Self {
            glyph_height,
            height: 0.0,
        }
    }

    /// The tightest height enclosing every visible glyph seen so far.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

impl GlyphSink for MeasureSink {
    fn glyph(&mut self, glyph: &PositionedGlyph) -> ControlFlow<()> {
        if glyph.is_visible() {
            self.height = self.height.max(glyph.origin.y + self.glyph_height);
        }
        ControlFlow::Continue(())
    }
}

/// Draws glyphs and selection backgrounds onto a [`TextCanvas`].
///
/// Glyphs whose box would extend past `max_height` end drawing; the rest of the
/// run is dropped.
pub struct DrawSink<'a, C: TextCanvas + ?Sized> {
    canvas: &'a mut C,
    font: &'a dyn Font,
    origin: Point,
    max_height: f64,
    font_size: f64,
    paint: &'a TextPaint,
}

impl<C: TextCanvas + ?Sized> core::fmt::Debug for DrawSink<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DrawSink")
            .field("origin", &self.origin)
            .field("max_height", &self.max_height)
            .field("font_size", &self.font_size)
            .field("paint", &self.paint)
            .finish_non_exhaustive()
    }
}

impl<'a, C: TextCanvas + ?Sized> DrawSink<'a, C> {
    /// Creates a sink drawing `run` with its top-left corner at `origin`.
    pub fn new(
        canvas: &'a mut C,
        run: &TextRun<'a>,
        origin: Point,
        max_height: f64,
        paint: &'a TextPaint,
    ) -> Self {
        Self {
            canvas,
            font: run.font,
            origin,
            max_height,
            font_size: run.style.font_size,
            paint,
        }
    }
}

impl<C: TextCanvas + ?Sized> GlyphSink for DrawSink<'_, C> {
    fn glyph(&mut self, glyph: &PositionedGlyph) -> ControlFlow<()> {
        if glyph.codepoint == '\n' {
            return ControlFlow::Continue(());
        }
        if glyph.origin.y + self.font_size > self.max_height {
            tracing::trace!(
                index = glyph.index,
                max_height = self.max_height,
                "text truncated at its height limit"
            );
            return ControlFlow::Break(());
        }
        let origin = self.origin + glyph.origin.to_vec2();
        let selected = self
            .paint
            .selection
            .as_ref()
            .filter(|selection| selection.contains(glyph.index));
        if let Some(selection) = selected
            && glyph.advance > 0.0
        {
            // Flush with the glyph origin, not one pixel to its left, so the
            // background never spills outside the text box.
            let background = Rect::from_origin_size(origin, (glyph.advance, self.font_size));
            self.canvas.fill_rect(background, selection.background);
        }
        if glyph.is_visible() {
            let tint = selected.map_or(self.paint.tint, |selection| selection.tint);
            self.canvas.draw_glyph(
                self.font,
                glyph.glyph,
                glyph.codepoint,
                origin,
                self.font_size,
                tint,
            );
        }
        ControlFlow::Continue(())
    }
}
