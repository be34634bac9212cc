// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font contract consumed by layout, plus a fixed-metric fallback font.

/// Index of a glyph inside a [`Font`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphId(pub u32);

/// Horizontal metrics of one glyph, in font units (at [`Font::base_size`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Pen advance reported by the font. Zero for some bitmap fonts.
    pub advance: f64,
    /// Width of the glyph's bitmap rectangle.
    pub bitmap_width: f64,
}

impl GlyphMetrics {
    /// The advance used for layout: the reported advance, or the bitmap width
    /// when the font reports no advance.
    #[must_use]
    pub fn effective_advance(&self) -> f64 {
        if self.advance == 0.0 {
            self.bitmap_width
        } else {
            self.advance
        }
    }
}

/// Glyph lookup and metrics supplied by the font backend.
///
/// Loading and rasterizing fonts is the backend's business; layout only needs
/// to map codepoints to glyphs and ask how wide they are.
pub trait Font {
    /// Size, in pixels, that the metrics returned by [`Font::glyph_metrics`] are expressed at.
    fn base_size(&self) -> f64;

    /// Looks up the glyph for `codepoint`. Fonts map missing codepoints to a fallback glyph.
    fn glyph_index(&self, codepoint: char) -> GlyphId;

    /// Returns the metrics of `glyph`.
    fn glyph_metrics(&self, glyph: GlyphId) -> GlyphMetrics;

    /// Ratio between a requested font size and [`Font::base_size`].
    fn scale_for(&self, font_size: f64) -> f64 {
        let base = self.base_size();
        if base > 0.0 { font_size / base } else { 1.0 }
    }
}

/// A font where every glyph has the same advance.
///
/// This is the fallback used when a text node names no font, and a convenient
/// font for terminals and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Monospace {
    base_size: f64,
    advance: f64,
}

impl Monospace {
    /// Creates a font with the given base size and per-glyph advance.
    #[must_use]
    pub const fn new(base_size: f64, advance: f64) -> Self {
        Self { base_size, advance }
    }

    /// Advance of every glyph at the base size.
    #[must_use]
    pub const fn advance(&self) -> f64 {
        self.advance
    }
}

impl Default for Monospace {
    /// A 10px font with 6px cells.
    fn default() -> Self {
        Self::new(10.0, 6.0)
    }
}

impl Font for Monospace {
    fn base_size(&self) -> f64 {
        self.base_size
    }

    fn glyph_index(&self, codepoint: char) -> GlyphId {
        GlyphId(u32::from(codepoint))
    }

    fn glyph_metrics(&self, _glyph: GlyphId) -> GlyphMetrics {
        GlyphMetrics {
            advance: self.advance,
            bitmap_width: self.advance,
        }
    }
}
