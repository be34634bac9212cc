// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, and node descriptions.

use kurbo::Point;

use crate::grid::GridAnchor;
use crate::shape::{Renderable, Shape};
use bower_text::Color;

/// Identifier for a node in the scene (generational).
///
/// An id stays valid until its node is destroyed. A destroyed node's slot may
/// be reused, but with a newer generation, so old ids never alias new nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Lifecycle flags of a node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node's init has run. Set once, never cleared.
        const INITIALIZED = 0b0000_0001;
        /// The node takes part in update passes.
        const ACTIVE      = 0b0000_0010;
        /// The node takes part in render passes.
        const VISIBLE     = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::ACTIVE | Self::VISIBLE
    }
}

/// Whether a node draws itself before or after its children.
///
/// Later draws cover earlier ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintOrder {
    /// Draw the node, then its children on top.
    #[default]
    SelfFirst,
    /// Draw the children, then the node on top.
    ChildrenFirst,
}

/// Everything needed to create a node, short of its behavior.
///
/// ```rust
/// use bower_scene::{CircleShape, NodeDesc};
/// use bower_text::Color;
///
/// let desc = NodeDesc::new()
///     .at((40.0, 30.0))
///     .with_shape(CircleShape::new(8.0))
///     .with_tint(Color::BLUE);
/// assert_eq!(desc.renderable.unwrap().tint, Color::BLUE);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NodeDesc {
    /// Position relative to the parent.
    pub position: Point,
    /// Paint order relative to children.
    pub paint_order: PaintOrder,
    /// Optional drawable capability.
    pub renderable: Option<Renderable>,
    /// Optional grid anchor; applied as soon as the node is attached.
    pub anchor: Option<GridAnchor>,
}

impl NodeDesc {
    /// An invisible, shapeless node at the parent's origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position relative to the parent.
    #[must_use]
    pub fn at(mut self, position: impl Into<Point>) -> Self {
        self.position = position.into();
        self
    }

    /// Makes the node renderable with `shape`, keeping any tint already set.
    #[must_use]
    pub fn with_shape(mut self, shape: impl Into<Shape>) -> Self {
        let tint = self.renderable.as_ref().map_or(Color::WHITE, |r| r.tint);
        self.renderable = Some(Renderable {
            tint,
            shape: shape.into(),
        });
        self
    }

    /// Sets the tint. Has no effect until the node has a shape.
    #[must_use]
    pub fn with_tint(mut self, tint: Color) -> Self {
        if let Some(renderable) = &mut self.renderable {
            renderable.tint = tint;
        }
        self
    }

    /// Sets the paint order.
    #[must_use]
    pub fn with_paint_order(mut self, paint_order: PaintOrder) -> Self {
        self.paint_order = paint_order;
        self
    }

    /// Anchors the node to cell coordinates of a grid node.
    #[must_use]
    pub fn anchored(mut self, grid: NodeId, x: i32, y: i32) -> Self {
        self.anchor = Some(GridAnchor { grid, x, y });
        self
    }
}
