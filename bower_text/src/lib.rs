// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bower Text: word-wrapping text layout over a pluggable font backend.
//!
//! Text layout has two clients that must never disagree: the code that draws
//! glyphs, and the code that reports how tall the text is so containers can
//! size themselves around it. This crate gives both the same line breaker.
//!
//! - [`TextRun`] bundles a byte string, a [`Font`], and a [`TextStyle`].
//! - [`TextRun::glyphs`] breaks the run into lines and yields every codepoint as
//!   a [`PositionedGlyph`]. Lines wrap at the last space, tab or newline that
//!   fit, and hard-break inside words that do not fit at all.
//! - [`MeasureSink`] and [`DrawSink`] consume those glyphs. The first only
//!   tracks the lowest visible glyph box; the second blits glyphs and selection
//!   backgrounds onto a [`TextCanvas`] and truncates at a height limit.
//!
//! Input is bytes, not `&str`: malformed UTF-8 decodes to one `?` per bad byte
//! (see [`decode_at`]) instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use bower_text::{Monospace, TextRun, TextStyle};
//!
//! let font = Monospace::new(10.0, 10.0);
//! let style = TextStyle { font_size: 10.0, spacing: 0.0, word_wrap: true };
//! let run = TextRun::new(&font, b"ab cd ef", style);
//!
//! // "ab cd" is exactly 50px wide, so "ef" moves to a second line.
//! let second_line: Vec<char> = run
//!     .glyphs(50.0)
//!     .filter(|g| g.line == 1 && g.is_visible())
//!     .map(|g| g.codepoint)
//!     .collect();
//! assert_eq!(second_line, ['e', 'f']);
//! assert_eq!(run.measure_height(50.0), 25.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod color;
mod decode;
mod font;
mod glyphs;
mod run;
mod sink;

pub use color::Color;
pub use decode::{Codepoints, REPLACEMENT, decode_at};
pub use font::{Font, GlyphId, GlyphMetrics, Monospace};
pub use glyphs::{Glyphs, PositionedGlyph};
pub use run::{TextRun, TextStyle};
pub use sink::{DrawSink, GlyphSink, MeasureSink, Selection, TextCanvas, TextPaint};
