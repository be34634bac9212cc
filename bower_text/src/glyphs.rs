// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The line breaker shared by drawing and measuring.
//!
//! [`Glyphs`] works one output line at a time. It first *measures*: it scans
//! forward from the line start, accumulating advances, until the line is full,
//! the text ends, or (without word wrap) a newline ends the line. It then
//! rewinds to the line start and *emits* the same span, yielding each codepoint
//! with its final position. Both phases place glyphs through the same
//! pen, so the emitted positions are exactly the ones that were measured.

use kurbo::Point;

use crate::decode::decode_at;
use crate::font::GlyphId;
use crate::run::TextRun;

/// A codepoint placed by the line breaker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Ordinal of the codepoint within the run (not a byte offset).
    pub index: usize,
    /// Byte offset of the codepoint within the run.
    pub byte_offset: usize,
    /// The decoded codepoint.
    pub codepoint: char,
    /// Glyph the font maps the codepoint to.
    pub glyph: GlyphId,
    /// Zero-based output line.
    pub line: usize,
    /// Top-left of the glyph box, relative to the run origin.
    pub origin: Point,
    /// Horizontal room the glyph takes on its line, including spacing.
    /// Zero for newlines and suppressed leading blanks.
    pub advance: f64,
}

impl PositionedGlyph {
    /// Whether the glyph leaves ink: spaces, tabs and newlines do not.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !is_break_candidate(self.codepoint)
    }
}

/// Space or tab.
pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Codepoints a wrapped line may end after.
pub(crate) fn is_break_candidate(ch: char) -> bool {
    is_blank(ch) || ch == '\n'
}

/// Horizontal cursor of the line being measured or emitted.
#[derive(Clone, Copy, Debug, Default)]
struct Pen {
    x: f64,
}

impl Pen {
    /// A blank met while the pen is at the line start takes no room and is never drawn.
    fn suppresses(&self, ch: char) -> bool {
        self.x == 0.0 && is_blank(ch)
    }

    fn fits(&self, advance: f64, max_width: f64) -> bool {
        self.x + advance <= max_width
    }

    /// Places a glyph and returns the room it took.
    fn place(&mut self, ch: char, advance: f64) -> f64 {
        if self.suppresses(ch) {
            0.0
        } else {
            self.x += advance;
            advance
        }
    }
}

/// Iterator over the positioned glyphs of a [`TextRun`].
///
/// Created by [`TextRun::glyphs`]. Every codepoint of the run is yielded exactly
/// once, in order, so glyph indices can be matched against selections.
#[derive(Clone, Debug)]
pub struct Glyphs<'a> {
    run: TextRun<'a>,
    scale: f64,
    max_width: f64,
    /// Byte offset of the next codepoint to emit.
    at: usize,
    /// Exclusive byte offset where the current line ends.
    line_end: usize,
    index: usize,
    line: usize,
    started: bool,
    pen: Pen,
}

impl<'a> Glyphs<'a> {
    pub(crate) fn new(run: TextRun<'a>, max_width: f64) -> Self {
        Self {
            scale: run.font.scale_for(run.style.font_size),
            run,
            max_width,
            at: 0,
            line_end: 0,
            index: 0,
            line: 0,
            started: false,
            pen: Pen::default(),
        }
    }

    /// Advance of `ch`, which ends at byte `end`.
    fn advance_of(&self, ch: char, end: usize) -> f64 {
        if ch == '\n' {
            return 0.0;
        }
        let glyph = self.run.font.glyph_index(ch);
        let width = self.run.font.glyph_metrics(glyph).effective_advance() * self.scale;
        if end < self.run.text.len() {
            width + self.run.style.spacing
        } else {
            width
        }
    }

    /// Measure phase: finds the exclusive byte offset where the line starting at
    /// `start` ends. The next line starts right there.
    fn measure_line(&self, start: usize) -> usize {
        let text = self.run.text;
        let wrap = self.run.style.word_wrap;
        let mut pen = Pen::default();
        let mut candidate = None;
        let mut at = start;
        while let Some((ch, len)) = decode_at(text, at) {
            let advance = self.advance_of(ch, at + len);
            if pen.suppresses(ch) {
                at += len;
                continue;
            }
            if !pen.fits(advance, self.max_width) {
                if pen.x == 0.0 {
                    // Nothing placed yet: a glyph wider than the box gets a line to itself.
                    return at + len;
                }
                if is_blank(ch) {
                    // Leads the next line, where it is suppressed.
                    return at;
                }
                return match candidate {
                    Some(end) if wrap => end,
                    _ => at,
                };
            }
            pen.place(ch, advance);
            at += len;
            if ch == '\n' && !wrap {
                return at;
            }
            if wrap && is_break_candidate(ch) {
                candidate = Some(at);
            }
        }
        text.len()
    }
}

impl Iterator for Glyphs<'_> {
    type Item = PositionedGlyph;

    fn next(&mut self) -> Option<PositionedGlyph> {
        if self.at >= self.line_end {
            if self.at >= self.run.text.len() {
                return None;
            }
            if self.started {
                self.line += 1;
            }
            self.started = true;
            self.line_end = self.measure_line(self.at);
            self.pen = Pen::default();
        }

        // Emit phase: re-walk the measured span.
        let (ch, len) = decode_at(self.run.text, self.at)?;
        let byte_offset = self.at;
        let x = self.pen.x;
        let advance = self.pen.place(ch, self.advance_of(ch, byte_offset + len));
        #[allow(
            clippy::cast_precision_loss,
            reason = "Line counts stay far below 2^52."
        )]
        let y = self.line as f64 * self.run.style.line_advance();
        let glyph = PositionedGlyph {
            index: self.index,
            byte_offset,
            codepoint: ch,
            glyph: self.run.font.glyph_index(ch),
            line: self.line,
            origin: Point::new(x, y),
            advance,
        };
        self.at += len;
        self.index += 1;
        Some(glyph)
    }
}
