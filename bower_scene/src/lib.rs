// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bower Scene: a retained tree of positioned, drawable nodes.
//!
//! A [`Scene`] owns every node in a generational arena and hands out
//! [`NodeId`]s. Nodes are positioned relative to their parent and carry three
//! lifecycle flags (initialized, active, visible) that gate the per-frame
//! passes:
//!
//! - [`Scene::init`] runs one-time setup, top-down, at most once per node.
//! - [`Scene::update`] runs per-frame logic on active nodes.
//! - [`Scene::render`] draws visible nodes onto a [`Canvas`].
//!
//! What a node draws comes from its optional [`Renderable`]: a tint plus a
//! [`Shape`] (rectangle, circle, text, container or grid). Shapes report their
//! extent through [`Extent`], which the scene composes into parent and global
//! space. What a node *does* comes from its optional [`Behavior`].
//!
//! Text shapes are laid out by [`bower_text`], so a container sized around a
//! label always agrees with the glyphs that get drawn.
//!
//! ## Example
//!
//! ```rust
//! use bower_scene::{ContainerShape, NodeDesc, Scene, TextShape};
//! use kurbo::{Point, Rect};
//!
//! let mut scene = Scene::new();
//! let panel = scene
//!     .spawn(
//!         scene.root(),
//!         NodeDesc::new()
//!             .at((20.0, 20.0))
//!             .with_shape(ContainerShape::new(4.0, 4.0)),
//!     )
//!     .unwrap();
//! let label = scene
//!     .spawn(panel, NodeDesc::new().with_shape(TextShape::new("ok")))
//!     .unwrap();
//!
//! scene.init(scene.root());
//! scene.update(scene.root());
//!
//! // The container pins its children to its padding.
//! assert_eq!(scene.position(label), Some(Point::new(4.0, 4.0)));
//!
//! // Rendering refits the container around its content.
//! # struct Discard;
//! # impl bower_text::TextCanvas for Discard {
//! #     fn fill_rect(&mut self, _: Rect, _: bower_text::Color) {}
//! #     fn draw_glyph(&mut self, _: &dyn bower_text::Font, _: bower_text::GlyphId, _: char,
//! #         _: Point, _: f64, _: bower_text::Color) {}
//! # }
//! # impl bower_scene::Canvas for Discard {
//! #     fn stroke_rect(&mut self, _: Rect, _: f64, _: bower_text::Color) {}
//! #     fn fill_rounded_rect(&mut self, _: Rect, _: f64, _: bower_text::Color) {}
//! #     fn fill_circle(&mut self, _: Point, _: f64, _: bower_text::Color) {}
//! # }
//! scene.render(scene.root(), &mut Discard);
//! let content = scene.children_bounding_box(panel);
//! assert_eq!(scene.local_bounds(panel), Some(content.inflate(4.0, 4.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod behavior;
mod canvas;
mod error;
mod fonts;
mod grid;
mod scene;
mod shape;
mod types;

#[cfg(test)]
mod testing;

pub use behavior::Behavior;
pub use canvas::Canvas;
pub use error::TreeError;
pub use fonts::{FontBook, FontId};
pub use grid::{GridAnchor, GridShape};
pub use scene::Scene;
pub use shape::{
    Alignment, CircleShape, ContainerShape, Extent, PaintCx, RectShape, Renderable, Shape,
    TextShape,
};
pub use types::{NodeDesc, NodeFlags, NodeId, PaintOrder};
