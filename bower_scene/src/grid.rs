// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grids of equal cells, and anchoring nodes onto their lattice.

use kurbo::{Point, Rect, Size};

use crate::canvas::Canvas;
use crate::fonts::FontBook;
use crate::shape::{Extent, PaintCx};
use crate::types::NodeId;

/// A `columns` × `rows` grid of `cell_size` cells, drawn as cell outlines.
///
/// Cell `(x, y)` spans from lattice point `(x, y)` to `(x + 1, y + 1)`. Lattice
/// points run from `(0, 0)` to `(columns, rows)` inclusive.
///
/// ```rust
/// use bower_scene::GridShape;
/// use kurbo::{Point, Size};
///
/// let grid = GridShape::new(4, 3, Size::new(10.0, 10.0));
/// assert_eq!(grid.point(2, 1), Point::new(20.0, 10.0));
/// assert_eq!(grid.point_clamped(9, -2), Point::new(40.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridShape {
    /// Number of cells across.
    pub columns: i32,
    /// Number of cells down.
    pub rows: i32,
    /// Size of one cell.
    pub cell_size: Size,
}

impl Default for GridShape {
    fn default() -> Self {
        Self::new(1, 1, Size::new(10.0, 10.0))
    }
}

impl GridShape {
    /// Creates a grid.
    pub fn new(columns: i32, rows: i32, cell_size: Size) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }

    /// The rectangle of cell `(x, y)` in grid space. Coordinates are not clamped.
    pub fn cell_rect(&self, x: i32, y: i32) -> Rect {
        Rect::from_origin_size(self.point(x, y), self.cell_size)
    }

    /// Lattice point `(x, y)` in grid space. Coordinates are not clamped.
    pub fn point(&self, x: i32, y: i32) -> Point {
        Point::new(
            f64::from(x) * self.cell_size.width,
            f64::from(y) * self.cell_size.height,
        )
    }

    /// Clamps `(x, y)` to an existing cell.
    pub fn clamp_cell(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.min(self.columns - 1).max(0),
            y.min(self.rows - 1).max(0),
        )
    }

    /// Clamps `(x, y)` to an existing lattice point.
    pub fn clamp_point(&self, x: i32, y: i32) -> (i32, i32) {
        (x.min(self.columns).max(0), y.min(self.rows).max(0))
    }

    /// Lattice point `(x, y)` after [`clamp_point`](Self::clamp_point).
    pub fn point_clamped(&self, x: i32, y: i32) -> Point {
        let (x, y) = self.clamp_point(x, y);
        self.point(x, y)
    }
}

impl Extent for GridShape {
    fn local_bounds(&self, _fonts: &FontBook) -> Rect {
        let (columns, rows) = self.clamp_point(self.columns, self.rows);
        Rect::from_origin_size(Point::ZERO, self.point(columns, rows).to_vec2().to_size())
    }

    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        let offset = cx.origin.to_vec2();
        for y in 0..self.rows {
            for x in 0..self.columns {
                canvas.stroke_rect(self.cell_rect(x, y) + offset, 1.0, cx.tint);
            }
        }
    }
}

/// Pins a node to a lattice point of a grid node.
///
/// The grid may live anywhere in the scene; the anchored node is placed so its
/// global position equals the grid's global position plus the lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridAnchor {
    /// The node carrying the [`GridShape`].
    pub grid: NodeId,
    /// Lattice column.
    pub x: i32,
    /// Lattice row.
    pub y: i32,
}
