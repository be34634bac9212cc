// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable shapes and the capability they implement.
//!
//! Every shape works in the node's own space: `(0, 0)` is the node's position.
//! [`Extent::local_bounds`] reports the shape's extent there, and
//! [`Extent::paint`] draws it once the scene has resolved where that origin
//! lands on the canvas.

use alloc::vec::Vec;

use bower_text::{Color, Selection, TextPaint, TextRun, TextStyle};
use kurbo::{Point, Rect};

use crate::canvas::Canvas;
use crate::fonts::{FontBook, FontId};
use crate::grid::GridShape;

/// What a shape needs to know to draw itself.
#[derive(Clone, Copy, Debug)]
pub struct PaintCx<'a> {
    /// Global position of the node's origin.
    pub origin: Point,
    /// Tint of the node's [`Renderable`].
    pub tint: Color,
    /// Fonts of the scene being drawn.
    pub fonts: &'a FontBook,
}

/// Geometry and drawing for one kind of shape.
pub trait Extent {
    /// Extent of the shape in the node's own space.
    fn local_bounds(&self, fonts: &FontBook) -> Rect;

    /// Draws the shape with its origin at `cx.origin`.
    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas);
}

/// Drawable capability of a node: a tint and a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Renderable {
    /// Color applied to the shape. Defaults to white.
    pub tint: Color,
    /// The shape supplying bounds and paint.
    pub shape: Shape,
}

impl Renderable {
    /// A white `shape`.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            tint: Color::WHITE,
            shape: shape.into(),
        }
    }
}

/// The shape kinds a node can carry.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A filled rectangle.
    Rect(RectShape),
    /// A filled circle centered on the node.
    Circle(CircleShape),
    /// A run of text.
    Text(TextShape),
    /// A rectangle that wraps its children.
    Container(ContainerShape),
    /// Outlined grid cells.
    Grid(GridShape),
}

impl Extent for Shape {
    fn local_bounds(&self, fonts: &FontBook) -> Rect {
        match self {
            Self::Rect(s) => s.local_bounds(fonts),
            Self::Circle(s) => s.local_bounds(fonts),
            Self::Text(s) => s.local_bounds(fonts),
            Self::Container(s) => s.local_bounds(fonts),
            Self::Grid(s) => s.local_bounds(fonts),
        }
    }

    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        match self {
            Self::Rect(s) => s.paint(cx, canvas),
            Self::Circle(s) => s.paint(cx, canvas),
            Self::Text(s) => s.paint(cx, canvas),
            Self::Container(s) => s.paint(cx, canvas),
            Self::Grid(s) => s.paint(cx, canvas),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Self::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(
    Rect(RectShape),
    Circle(CircleShape),
    Text(TextShape),
    Container(ContainerShape),
    Grid(GridShape),
);

fn fill(rect: Rect, rounding: f64, tint: Color, canvas: &mut dyn Canvas) {
    if rounding > 0.0 {
        canvas.fill_rounded_rect(rect, rounding, tint);
    } else {
        canvas.fill_rect(rect, tint);
    }
}

/// A filled rectangle in node space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectShape {
    /// The rectangle, relative to the node's position.
    pub rect: Rect,
    /// Corner roundness in `0.0..=1.0`. Only affects drawing.
    pub rounding: f64,
}

impl RectShape {
    /// A square-cornered rectangle.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            rounding: 0.0,
        }
    }

    /// The same rectangle with rounded corners.
    #[must_use]
    pub fn rounded(self, rounding: f64) -> Self {
        Self { rounding, ..self }
    }
}

impl Extent for RectShape {
    fn local_bounds(&self, _fonts: &FontBook) -> Rect {
        self.rect
    }

    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        fill(self.rect + cx.origin.to_vec2(), self.rounding, cx.tint, canvas);
    }
}

/// A filled circle centered on the node's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleShape {
    /// Radius in pixels.
    pub radius: f64,
}

impl Default for CircleShape {
    fn default() -> Self {
        Self { radius: 5.0 }
    }
}

impl CircleShape {
    /// A circle of `radius`.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Extent for CircleShape {
    fn local_bounds(&self, _fonts: &FontBook) -> Rect {
        let r = self.radius;
        Rect::new(-r, -r, r, r)
    }

    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        canvas.fill_circle(cx.origin, self.radius, cx.tint);
    }
}

/// A run of text, either at its natural size or flowed into a box.
///
/// Setting [`max_width`](Self::max_width) switches the text into box mode: lines
/// wrap at that width and the height is the measured height, clamped to
/// [`max_height`](Self::max_height) when present. Without it, lines break only
/// at newlines.
#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    /// Content bytes. Malformed UTF-8 draws as `?`.
    pub text: Vec<u8>,
    /// Font to set the text in; `None` uses the scene's fallback font.
    pub font: Option<FontId>,
    /// Font size in pixels.
    pub font_size: f64,
    /// Extra space after each glyph.
    pub spacing: f64,
    /// Prefer breaking at whitespace in box mode.
    pub word_wrap: bool,
    /// Box width; enables box mode.
    pub max_width: Option<f64>,
    /// Box height limit in box mode. Lines past it are not drawn.
    pub max_height: Option<f64>,
    /// Optional highlighted codepoint range.
    pub selection: Option<Selection>,
}

impl Default for TextShape {
    fn default() -> Self {
        let style = TextStyle::default();
        Self {
            text: Vec::new(),
            font: None,
            font_size: style.font_size,
            spacing: style.spacing,
            word_wrap: style.word_wrap,
            max_width: None,
            max_height: None,
            selection: None,
        }
    }
}

impl TextShape {
    /// Text at its natural size in the default style.
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Flows the text into a box `width` wide, optionally limited in height.
    #[must_use]
    pub fn boxed(self, width: f64, max_height: Option<f64>) -> Self {
        Self {
            max_width: Some(width),
            max_height,
            ..self
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(self, font_size: f64) -> Self {
        Self { font_size, ..self }
    }

    /// Sets the font.
    #[must_use]
    pub fn with_font(self, font: FontId) -> Self {
        Self {
            font: Some(font),
            ..self
        }
    }

    /// The layout style this shape uses.
    pub fn style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size,
            spacing: self.spacing,
            word_wrap: self.word_wrap,
        }
    }

    fn run<'a>(&'a self, fonts: &'a FontBook) -> TextRun<'a> {
        TextRun::new(fonts.resolve(self.font), &self.text, self.style())
    }
}

impl Extent for TextShape {
    fn local_bounds(&self, fonts: &FontBook) -> Rect {
        let run = self.run(fonts);
        match self.max_width {
            Some(width) => {
                let mut height = run.measure_height(width);
                if let Some(max_height) = self.max_height {
                    height = height.min(max_height);
                }
                Rect::new(0.0, 0.0, width, height)
            }
            None => run.measure_natural().to_rect(),
        }
    }

    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        let run = self.run(cx.fonts);
        let paint = TextPaint {
            tint: cx.tint,
            selection: self.selection.clone(),
        };
        match self.max_width {
            Some(width) => {
                let height = self.max_height.unwrap_or(f64::INFINITY);
                run.draw(canvas, Rect::from_origin_size(cx.origin, (width, height)), &paint);
            }
            None => run.draw_natural(canvas, cx.origin, &paint),
        }
    }
}

/// Placement intent along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Leading edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Trailing edge.
    End,
}

/// A rectangle that grows to wrap its children plus padding.
///
/// Every update pins direct children to [`anchor`](Self::anchor).
/// [`Scene::local_bounds`](crate::Scene::local_bounds) measures a container
/// from its children, and every render stores that measure in
/// [`rect`](Self::rect) before painting it.
///
/// The alignment fields are recorded for callers but do not move children.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerShape {
    /// Horizontal padding on each side.
    pub padding_x: f64,
    /// Vertical padding on each side.
    pub padding_y: f64,
    /// Horizontal alignment intent.
    pub align_x: Alignment,
    /// Vertical alignment intent.
    pub align_y: Alignment,
    /// Corner roundness in `0.0..=1.0`.
    pub rounding: f64,
    /// The rectangle painted at the last render.
    pub rect: Rect,
}

impl ContainerShape {
    /// A container with the given padding.
    pub fn new(padding_x: f64, padding_y: f64) -> Self {
        Self {
            padding_x,
            padding_y,
            ..Self::default()
        }
    }

    /// Where children are pinned, in the container's space.
    pub fn anchor(&self) -> Point {
        Point::new(self.padding_x, self.padding_y)
    }

    /// The rectangle wrapping `content` with padding on every side.
    pub fn fit(&self, content: Rect) -> Rect {
        content.inflate(self.padding_x, self.padding_y)
    }
}

impl Extent for ContainerShape {
    /// The stored rectangle; a scene measures containers from their children.
    fn local_bounds(&self, _fonts: &FontBook) -> Rect {
        self.rect
    }

    fn paint(&self, cx: &PaintCx<'_>, canvas: &mut dyn Canvas) {
        fill(self.rect + cx.origin.to_vec2(), self.rounding, cx.tint, canvas);
    }
}
