// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing backend contract.

use bower_text::{Color, TextCanvas};
use kurbo::{Point, Rect};

/// Drawing primitives supplied by the rendering backend.
///
/// All coordinates are global. Glyph blitting and plain rectangle fills come
/// from the [`TextCanvas`] supertrait.
pub trait Canvas: TextCanvas {
    /// Outlines `rect` with lines `thickness` wide.
    fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: Color);

    /// Fills `rect` with rounded corners. `roundness` runs from `0.0` (square)
    /// to `1.0` (fully rounded short side).
    fn fill_rounded_rect(&mut self, rect: Rect, roundness: f64, color: Color);

    /// Fills a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
}
