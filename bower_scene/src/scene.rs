// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene arena: structure, lifecycle passes, geometry queries.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use bower_text::Font;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::behavior::Behavior;
use crate::canvas::Canvas;
use crate::error::TreeError;
use crate::fonts::{FontBook, FontId};
use crate::grid::GridAnchor;
use crate::shape::{Extent, PaintCx, Renderable, Shape};
use crate::types::{NodeDesc, NodeFlags, NodeId, PaintOrder};

/// Child lists are copied into this before a pass recurses, so hooks may edit
/// the scene mid-pass without invalidating the iteration.
type Snapshot = SmallVec<[NodeId; 8]>;

/// A retained tree of positioned nodes.
///
/// Nodes live in a generational arena. Every node but the root is created by
/// [`Scene::spawn`], which attaches it under a parent straight away. Positions
/// are relative to the parent; global positions sum every ancestor.
///
/// A frame is one [`Scene::update`] followed by one [`Scene::render`], usually
/// both on [`Scene::root`]. Call [`Scene::init`] once before the first frame.
///
/// ## Example
///
/// ```rust
/// use bower_scene::{NodeDesc, RectShape, Scene};
/// use kurbo::{Point, Rect};
///
/// let mut scene = Scene::new();
/// let panel = scene.spawn(scene.root(), NodeDesc::new().at((10.0, 10.0))).unwrap();
/// let swatch = scene
///     .spawn(
///         panel,
///         NodeDesc::new()
///             .at((5.0, 5.0))
///             .with_shape(RectShape::new(Rect::new(0.0, 0.0, 4.0, 4.0))),
///     )
///     .unwrap();
///
/// assert_eq!(scene.global_position(swatch), Some(Point::new(15.0, 15.0)));
/// assert_eq!(
///     scene.global_bounding_box(swatch),
///     Some(Rect::new(15.0, 15.0, 19.0, 19.0))
/// );
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    fonts: FontBook,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len())
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Point,
    flags: NodeFlags,
    paint_order: PaintOrder,
    renderable: Option<Renderable>,
    anchor: Option<GridAnchor>,
    behavior: Option<Box<dyn Behavior>>,
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("generation", &self.generation)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("position", &self.position)
            .field("flags", &self.flags)
            .field("has_behavior", &self.behavior.is_some())
            .finish_non_exhaustive()
    }
}

impl Node {
    fn new(generation: u32, desc: NodeDesc, behavior: Option<Box<dyn Behavior>>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            position: desc.position,
            flags: NodeFlags::default(),
            paint_order: desc.paint_order,
            renderable: desc.renderable,
            anchor: desc.anchor,
            behavior,
        }
    }
}

impl Scene {
    /// Creates a scene holding only a root node, with [`Monospace`] as the
    /// fallback font.
    ///
    /// [`Monospace`]: bower_text::Monospace
    pub fn new() -> Self {
        Self::with_font_book(FontBook::default())
    }

    /// Creates a scene whose text falls back to `font`.
    pub fn with_default_font(font: Arc<dyn Font>) -> Self {
        Self::with_font_book(FontBook::new(font))
    }

    fn with_font_book(fonts: FontBook) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            fonts,
        };
        scene.root = scene.alloc(NodeDesc::default(), None);
        scene
    }

    /// The node created with the scene.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Registers a font text shapes can name.
    pub fn add_font(&mut self, font: Arc<dyn Font>) -> FontId {
        self.fonts.insert(font)
    }

    /// Fonts known to the scene.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Whether every node, root included, has been destroyed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, desc: NodeDesc, behavior: Option<Box<dyn Behavior>>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, desc, behavior));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId holds 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, desc, behavior)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId holds 32-bit slot indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    // --- structure ---

    /// Creates a node from `desc` and attaches it under `parent`.
    ///
    /// Attaching follows [`Scene::attach`]: an initialized parent initializes
    /// the new node on the spot.
    pub fn spawn(&mut self, parent: NodeId, desc: NodeDesc) -> Result<NodeId, TreeError> {
        self.spawn_boxed(parent, desc, None)
    }

    /// Like [`Scene::spawn`], with a behavior driving the node.
    pub fn spawn_with(
        &mut self,
        parent: NodeId,
        desc: NodeDesc,
        behavior: impl Behavior + 'static,
    ) -> Result<NodeId, TreeError> {
        self.spawn_boxed(parent, desc, Some(Box::new(behavior)))
    }

    fn spawn_boxed(
        &mut self,
        parent: NodeId,
        desc: NodeDesc,
        behavior: Option<Box<dyn Behavior>>,
    ) -> Result<NodeId, TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        let id = self.alloc(desc, behavior);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// A grid anchor on `child` is applied once it is linked. If `parent` is
    /// initialized, the child's subtree is initialized; if `parent` is active
    /// or visible, the subtree becomes so too. Flags that are off on `parent`
    /// are left alone on the subtree.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        for id in [parent, child] {
            if !self.is_alive(id) {
                return Err(TreeError::StaleNode(id));
            }
        }
        if let Some(owner) = self.parent_of(child) {
            return Err(TreeError::AlreadyAttached { child, owner });
        }
        if self.is_self_or_ancestor(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }

        self.link_parent(child, parent);
        tracing::debug!(?parent, ?child, "attached node");
        if let Some(anchor) = self.node(child).anchor {
            self.place_on_grid(child, anchor);
        }

        let flags = self.node(parent).flags;
        if flags.contains(NodeFlags::INITIALIZED) {
            self.init(child);
        }
        if flags.contains(NodeFlags::ACTIVE) {
            self.set_active(child, true);
        }
        if flags.contains(NodeFlags::VISIBLE) {
            self.set_visible(child, true);
        }
        Ok(())
    }

    /// Removes `child` from the children of `parent`.
    ///
    /// The child keeps its own subtree and stays alive as an orphan until it is
    /// attached again or destroyed.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        for id in [parent, child] {
            if !self.is_alive(id) {
                return Err(TreeError::StaleNode(id));
            }
        }
        if self.parent_of(child) != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.unlink_parent(child, parent);
        tracing::debug!(?parent, ?child, "detached node");
        Ok(())
    }

    /// Detaches `id` from its owner, if it has one.
    pub fn remove_self(&mut self, id: NodeId) {
        match self.parent_of(id) {
            Some(parent) => {
                self.unlink_parent(id, parent);
                tracing::debug!(?parent, child = ?id, "node removed itself");
            }
            None => tracing::trace!(node = ?id, "remove_self without an owner"),
        }
    }

    /// Detaches `id` and frees it with its whole subtree.
    ///
    /// Every id in the subtree becomes stale.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            tracing::trace!(node = ?id, "destroy on a stale node");
            return;
        }
        if let Some(parent) = self.parent_of(id) {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
        tracing::debug!(node = ?id, "destroyed subtree");
    }

    /// Destroys every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children: Snapshot = self.children_of(id).iter().copied().collect();
        for child in children {
            self.destroy(child);
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    // --- passes ---

    /// Runs one-time initialization for `id` and its subtree.
    ///
    /// The node's behavior runs first and may spawn children; those are then
    /// initialized with the rest. Nodes already initialized are skipped, so
    /// each node's init hook runs at most once.
    pub fn init(&mut self, id: NodeId) {
        let Some(node) = self.node_opt_mut(id) else {
            tracing::trace!(node = ?id, "init on a stale node");
            return;
        };
        if node.flags.contains(NodeFlags::INITIALIZED) {
            tracing::trace!(node = ?id, "already initialized");
            return;
        }
        if let Some(mut behavior) = node.behavior.take() {
            behavior.init(self, id);
            self.restore_behavior(id, behavior);
        }
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.flags.insert(NodeFlags::INITIALIZED);
        let children: Snapshot = node.children.iter().copied().collect();
        for child in children {
            self.init(child);
        }
    }

    /// Runs one frame of logic for `id` and its subtree.
    ///
    /// Does nothing unless the node is active. Otherwise runs the node's
    /// behavior, pins the children of a container to its padding, then updates
    /// the children in order.
    pub fn update(&mut self, id: NodeId) {
        if !self.is_active(id) {
            return;
        }
        if let Some(mut behavior) = self.node_mut(id).behavior.take() {
            behavior.update(self, id);
            self.restore_behavior(id, behavior);
        }
        let Some(node) = self.get(id) else {
            return;
        };
        let children: Snapshot = node.children.iter().copied().collect();
        let anchor = match &node.renderable {
            Some(Renderable {
                shape: Shape::Container(container),
                ..
            }) => Some(container.anchor()),
            _ => None,
        };
        if let Some(anchor) = anchor {
            for &child in &children {
                if let Some(child) = self.node_opt_mut(child) {
                    child.position = anchor;
                }
            }
        }
        for child in children {
            self.update(child);
        }
    }

    /// Draws `id` and its subtree onto `canvas`.
    ///
    /// Does nothing unless the node is visible. A container first refits its
    /// painted rectangle to its children. The node's shape and behavior paint before or
    /// after the children according to its [`PaintOrder`].
    pub fn render(&mut self, id: NodeId, canvas: &mut dyn Canvas) {
        if !self.is_visible(id) {
            return;
        }
        self.fit_container(id);
        let node = self.node(id);
        let paint_order = node.paint_order;
        let children: Snapshot = node.children.iter().copied().collect();
        if paint_order == PaintOrder::SelfFirst {
            self.paint_self(id, canvas);
        }
        for child in children {
            self.render(child, canvas);
        }
        if paint_order == PaintOrder::ChildrenFirst {
            self.paint_self(id, canvas);
        }
    }

    fn fit_container(&mut self, id: NodeId) {
        if !matches!(
            self.node(id).renderable,
            Some(Renderable {
                shape: Shape::Container(_),
                ..
            })
        ) {
            return;
        }
        let Some(fitted) = self.local_bounds(id) else {
            return;
        };
        if let Some(Renderable {
            shape: Shape::Container(container),
            ..
        }) = &mut self.node_mut(id).renderable
        {
            container.rect = fitted;
        }
    }

    fn paint_self(&mut self, id: NodeId, canvas: &mut dyn Canvas) {
        if let Some(renderable) = &self.node(id).renderable {
            let cx = PaintCx {
                origin: self.origin(id),
                tint: renderable.tint,
                fonts: &self.fonts,
            };
            renderable.shape.paint(&cx, canvas);
        }
        if let Some(node) = self.node_opt_mut(id)
            && let Some(mut behavior) = node.behavior.take()
        {
            behavior.render(self, id, canvas);
            self.restore_behavior(id, behavior);
        }
    }

    fn restore_behavior(&mut self, id: NodeId, behavior: Box<dyn Behavior>) {
        if let Some(node) = self.node_opt_mut(id)
            && node.behavior.is_none()
        {
            node.behavior = Some(behavior);
        }
    }

    /// Sets or clears `ACTIVE` on `id` and its whole subtree.
    pub fn set_active(&mut self, id: NodeId, active: bool) {
        self.set_subtree_flag(id, NodeFlags::ACTIVE, active);
    }

    /// Sets or clears `VISIBLE` on `id` and its whole subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.set_subtree_flag(id, NodeFlags::VISIBLE, visible);
    }

    fn set_subtree_flag(&mut self, id: NodeId, flag: NodeFlags, value: bool) {
        let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
        stack.push(id);
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node_opt_mut(id) {
                node.flags.set(flag, value);
                stack.extend(node.children.iter().copied());
            }
        }
    }

    // --- geometry ---

    /// Position of `id` relative to its parent.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.get(id).map(|n| n.position)
    }

    /// Moves `id` relative to its parent.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(node) = self.node_opt_mut(id) {
            node.position = position;
        }
    }

    /// Position of `id` in global space: its own position plus that of every
    /// ancestor.
    pub fn global_position(&self, id: NodeId) -> Option<Point> {
        let mut position = self.get(id)?.position;
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            position += self.node(parent).position.to_vec2();
            current = self.parent_of(parent);
        }
        Some(position)
    }

    /// Maps a point in the space of `id` to global space.
    pub fn to_global(&self, id: NodeId, local: Point) -> Option<Point> {
        Some(self.global_position(id)? + local.to_vec2())
    }

    /// Maps a rectangle in the space of `id` to global space.
    pub fn global_rect(&self, id: NodeId, local: Rect) -> Option<Rect> {
        Some(local + self.global_position(id)?.to_vec2())
    }

    fn origin(&self, id: NodeId) -> Point {
        self.global_position(id).unwrap_or_default()
    }

    /// Extent of the shape of `id` in its own space, if it has one.
    ///
    /// A container is measured from its current children, so nested
    /// containers agree with their content before anything renders.
    pub fn local_bounds(&self, id: NodeId) -> Option<Rect> {
        match &self.get(id)?.renderable.as_ref()?.shape {
            Shape::Container(container) => Some(container.fit(self.children_bounding_box(id))),
            shape => Some(shape.local_bounds(&self.fonts)),
        }
    }

    /// Extent of the shape of `id` in its parent's space.
    pub fn bounding_box(&self, id: NodeId) -> Option<Rect> {
        Some(self.local_bounds(id)? + self.node(id).position.to_vec2())
    }

    /// Extent of the shape of `id` in global space.
    pub fn global_bounding_box(&self, id: NodeId) -> Option<Rect> {
        self.global_rect(id, self.local_bounds(id)?)
    }

    /// Union of the bounding boxes of the renderable children of `id`, in the
    /// space of `id`.
    ///
    /// Children without a shape are skipped. Returns [`Rect::ZERO`] when no
    /// child has a shape.
    pub fn children_bounding_box(&self, id: NodeId) -> Rect {
        self.children_of(id)
            .iter()
            .filter_map(|&child| self.bounding_box(child))
            .reduce(|acc, rect| acc.union(rect))
            .unwrap_or(Rect::ZERO)
    }

    /// Center of the bounding box of `id`, in its parent's space.
    pub fn center(&self, id: NodeId) -> Option<Point> {
        self.bounding_box(id).map(|rect| rect.center())
    }

    // --- components ---

    /// The drawable capability of `id`.
    pub fn renderable(&self, id: NodeId) -> Option<&Renderable> {
        self.get(id)?.renderable.as_ref()
    }

    /// Mutable access to the drawable capability of `id`.
    pub fn renderable_mut(&mut self, id: NodeId) -> Option<&mut Renderable> {
        self.node_opt_mut(id)?.renderable.as_mut()
    }

    /// Replaces the drawable capability of `id`.
    pub fn set_renderable(&mut self, id: NodeId, renderable: Option<Renderable>) {
        if let Some(node) = self.node_opt_mut(id) {
            node.renderable = renderable;
        }
    }

    /// Replaces the behavior of `id`.
    pub fn set_behavior(&mut self, id: NodeId, behavior: Option<Box<dyn Behavior>>) {
        if let Some(node) = self.node_opt_mut(id) {
            node.behavior = behavior;
        }
    }

    /// Sets whether `id` paints before or after its children.
    pub fn set_paint_order(&mut self, id: NodeId, paint_order: PaintOrder) {
        if let Some(node) = self.node_opt_mut(id) {
            node.paint_order = paint_order;
        }
    }

    /// The grid anchor of `id`.
    pub fn anchor(&self, id: NodeId) -> Option<GridAnchor> {
        self.get(id)?.anchor
    }

    /// Anchors `id` to a grid and moves it onto the anchored lattice point.
    ///
    /// `None` removes the anchor and leaves the node where it is.
    pub fn set_grid_anchor(&mut self, id: NodeId, anchor: Option<GridAnchor>) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.anchor = anchor;
        if let Some(anchor) = anchor {
            self.place_on_grid(id, anchor);
        }
    }

    /// Moves an anchored node to lattice point `(x, y)` of its grid.
    pub fn set_grid_position(&mut self, id: NodeId, x: i32, y: i32) {
        let Some(anchor) = self.anchor(id) else {
            tracing::trace!(node = ?id, "set_grid_position on a node without an anchor");
            return;
        };
        self.set_grid_anchor(id, Some(GridAnchor { x, y, ..anchor }));
    }

    fn place_on_grid(&mut self, id: NodeId, anchor: GridAnchor) {
        let grid = match self.renderable(anchor.grid) {
            Some(Renderable {
                shape: Shape::Grid(grid),
                ..
            }) => *grid,
            _ => {
                tracing::trace!(node = ?id, grid = ?anchor.grid, "anchor does not name a live grid");
                return;
            }
        };
        let target = self.origin(anchor.grid) + grid.point(anchor.x, anchor.y).to_vec2();
        let parent_origin = self
            .parent_of(id)
            .map_or(Point::ZERO, |parent| self.origin(parent));
        self.set_position(id, target - parent_origin.to_vec2());
    }

    // --- flags & structure queries ---

    /// The lifecycle flags of `id`.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.get(id).map(|n| n.flags)
    }

    /// Whether `id` has been initialized.
    pub fn is_initialized(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::INITIALIZED)
    }

    /// Whether `id` takes part in update passes.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::ACTIVE)
    }

    /// Whether `id` takes part in render passes.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.has_flag(id, NodeFlags::VISIBLE)
    }

    fn has_flag(&self, id: NodeId, flag: NodeFlags) -> bool {
        self.flags(id).is_some_and(|flags| flags.contains(flag))
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the owner of a node, or `None` for orphans, the root and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.filter(|&parent| self.is_alive(parent))
    }

    /// Get the children of a node in paint order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Get the next node in depth-first (pre-order) traversal order.
    ///
    /// Returns `None` at the end of the tree holding `current`, or if
    /// `current` is stale.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        let node = self.get(current)?;
        if let Some(&first_child) = node.children.first()
            && self.is_alive(first_child)
        {
            return Some(first_child);
        }

        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn is_self_or_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    // --- internals ---

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.get(id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridShape;
    use crate::shape::{CircleShape, ContainerShape, RectShape, TextShape};
    use crate::testing::{Op, Recorder};
    use alloc::rc::Rc;
    use alloc::vec;
    use bower_text::{Color, Monospace};
    use core::cell::Cell;
    use kurbo::Size;

    #[derive(Clone, Default)]
    struct Counter {
        inits: Rc<Cell<u32>>,
        updates: Rc<Cell<u32>>,
    }

    impl Behavior for Counter {
        fn init(&mut self, _scene: &mut Scene, _node: NodeId) {
            self.inits.set(self.inits.get() + 1);
        }

        fn update(&mut self, _scene: &mut Scene, _node: NodeId) {
            self.updates.set(self.updates.get() + 1);
        }
    }

    /// Spawns a counted child the first time it is initialized.
    struct Spawner(Counter);

    impl Behavior for Spawner {
        fn init(&mut self, scene: &mut Scene, node: NodeId) {
            scene
                .spawn_with(node, NodeDesc::new(), self.0.clone())
                .unwrap();
        }
    }

    fn boxed_text(s: &str) -> TextShape {
        TextShape {
            font_size: 10.0,
            spacing: 0.0,
            ..TextShape::new(s)
        }
    }

    fn rect(w: f64, h: f64) -> RectShape {
        RectShape::new(Rect::new(0.0, 0.0, w, h))
    }

    #[test]
    fn attach_and_detach_resolve_parent() {
        let mut scene = Scene::new();
        let root = scene.root();
        let p = scene.spawn(root, NodeDesc::new()).unwrap();
        let c = scene.spawn(root, NodeDesc::new()).unwrap();

        scene.detach(root, c).unwrap();
        assert_eq!(scene.parent_of(c), None);
        scene.attach(p, c).unwrap();
        assert_eq!(scene.parent_of(c), Some(p));
        assert_eq!(scene.children_of(p), &[c]);

        scene.detach(p, c).unwrap();
        assert_eq!(scene.parent_of(c), None);
        assert!(scene.children_of(p).is_empty());
        assert_eq!(
            scene.detach(p, c),
            Err(TreeError::NotAChild { parent: p, child: c })
        );
    }

    #[test]
    fn global_position_sums_ancestors() {
        let mut scene = Scene::new();
        let a = scene.spawn(scene.root(), NodeDesc::new()).unwrap();
        let b = scene.spawn(a, NodeDesc::new().at((10.0, 10.0))).unwrap();
        let c = scene.spawn(b, NodeDesc::new().at((5.0, 5.0))).unwrap();
        assert_eq!(scene.global_position(c), Some(Point::new(15.0, 15.0)));
        assert_eq!(
            scene.global_rect(c, Rect::new(1.0, 1.0, 3.0, 3.0)),
            Some(Rect::new(16.0, 16.0, 18.0, 18.0))
        );
        assert_eq!(
            scene.to_global(c, Point::new(-5.0, 0.0)),
            Some(Point::new(10.0, 15.0))
        );

        scene.set_position(a, Point::new(100.0, 0.0));
        assert_eq!(scene.global_position(c), Some(Point::new(115.0, 15.0)));

        // Orphans only count themselves and their remaining ancestors.
        scene.detach(a, b).unwrap();
        assert_eq!(scene.global_position(b), Some(Point::new(10.0, 10.0)));
        assert_eq!(scene.global_position(c), Some(Point::new(15.0, 15.0)));
    }

    #[test]
    fn deactivating_a_subtree_stops_updates() {
        let mut scene = Scene::new();
        let counter = Counter::default();
        let a = scene
            .spawn_with(scene.root(), NodeDesc::new(), counter.clone())
            .unwrap();
        let b = scene.spawn_with(a, NodeDesc::new(), counter.clone()).unwrap();
        let c = scene.spawn_with(b, NodeDesc::new(), counter.clone()).unwrap();

        scene.set_active(a, false);
        for id in [a, b, c] {
            assert!(!scene.is_active(id));
            assert!(scene.is_visible(id));
        }
        scene.update(a);
        scene.update(c);
        assert_eq!(counter.updates.get(), 0);

        scene.set_active(a, true);
        scene.update(scene.root());
        assert_eq!(counter.updates.get(), 3);
    }

    #[test]
    fn init_runs_each_hook_once() {
        let mut scene = Scene::new();
        let counter = Counter::default();
        let a = scene
            .spawn_with(scene.root(), NodeDesc::new(), counter.clone())
            .unwrap();
        let b = scene.spawn_with(a, NodeDesc::new(), counter.clone()).unwrap();
        assert!(!scene.is_initialized(b));

        scene.init(scene.root());
        scene.init(scene.root());
        scene.init(a);
        assert_eq!(counter.inits.get(), 2);
        assert!(scene.is_initialized(b));

        // Attaching under an initialized parent initializes straight away.
        let _late = scene.spawn_with(b, NodeDesc::new(), counter.clone()).unwrap();
        assert_eq!(counter.inits.get(), 3);
    }

    #[test]
    fn children_spawned_by_init_are_initialized_once() {
        let mut scene = Scene::new();
        let counter = Counter::default();
        let spawner = scene
            .spawn_with(scene.root(), NodeDesc::new(), Spawner(counter.clone()))
            .unwrap();
        scene.init(scene.root());
        assert_eq!(counter.inits.get(), 1);
        assert_eq!(scene.children_of(spawner).len(), 1);
        assert!(scene.is_initialized(scene.children_of(spawner)[0]));
    }

    #[test]
    fn attach_restores_active_and_visible() {
        let mut scene = Scene::new();
        let root = scene.root();
        let orphan = scene.spawn(root, NodeDesc::new()).unwrap();
        let leaf = scene.spawn(orphan, NodeDesc::new()).unwrap();
        scene.detach(root, orphan).unwrap();
        scene.set_visible(orphan, false);
        scene.set_active(orphan, false);

        scene.attach(root, orphan).unwrap();
        assert!(scene.is_visible(leaf));
        assert!(scene.is_active(leaf));
    }

    #[test]
    fn attach_rejects_bad_edges() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(root, NodeDesc::new()).unwrap();
        let b = scene.spawn(a, NodeDesc::new()).unwrap();

        assert_eq!(
            scene.attach(b, a),
            Err(TreeError::AlreadyAttached { child: a, owner: root })
        );
        scene.detach(root, a).unwrap();
        assert_eq!(
            scene.attach(b, a),
            Err(TreeError::WouldCycle { parent: b, child: a })
        );
        assert_eq!(
            scene.attach(a, a),
            Err(TreeError::WouldCycle { parent: a, child: a })
        );

        scene.destroy(b);
        assert_eq!(scene.attach(b, a), Err(TreeError::StaleNode(b)));
        assert_eq!(scene.spawn(b, NodeDesc::new()), Err(TreeError::StaleNode(b)));
        assert!(scene.children_of(a).is_empty());
    }

    #[test]
    fn remove_self_without_owner_is_a_no_op() {
        let mut scene = Scene::new();
        let a = scene.spawn(scene.root(), NodeDesc::new()).unwrap();
        scene.remove_self(a);
        assert_eq!(scene.parent_of(a), None);
        assert!(scene.children_of(scene.root()).is_empty());

        scene.remove_self(a);
        assert!(scene.is_alive(a));
    }

    #[test]
    fn destroy_frees_the_subtree() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.spawn(root, NodeDesc::new()).unwrap();
        let b = scene.spawn(a, NodeDesc::new()).unwrap();
        assert_eq!(scene.len(), 3);

        scene.destroy(a);
        assert!(!scene.is_alive(a));
        assert!(!scene.is_alive(b));
        assert_eq!(scene.len(), 1);
        assert!(scene.children_of(root).is_empty());
        assert_eq!(scene.position(b), None);

        let c = scene.spawn(root, NodeDesc::new()).unwrap();
        assert!(scene.is_alive(c));
        assert!(!scene.is_alive(a));
        if c.0 == a.0 {
            assert!(c.1 > a.1, "generation must increase on reuse");
        }

        let _ = scene.spawn(c, NodeDesc::new()).unwrap();
        scene.clear_children(c);
        assert!(scene.children_of(c).is_empty());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn children_bounding_box_skips_shapeless_children() {
        let mut scene = Scene::new();
        let holder = scene
            .spawn(scene.root(), NodeDesc::new().at((50.0, 50.0)))
            .unwrap();
        assert_eq!(scene.children_bounding_box(holder), Rect::ZERO);

        scene.spawn(holder, NodeDesc::new().at((-40.0, -40.0))).unwrap();
        assert_eq!(scene.children_bounding_box(holder), Rect::ZERO);

        scene
            .spawn(holder, NodeDesc::new().at((10.0, 20.0)).with_shape(rect(5.0, 5.0)))
            .unwrap();
        scene
            .spawn(
                holder,
                NodeDesc::new()
                    .at((30.0, 0.0))
                    .with_shape(CircleShape::new(2.0)),
            )
            .unwrap();
        assert_eq!(
            scene.children_bounding_box(holder),
            Rect::new(10.0, -2.0, 32.0, 25.0)
        );
    }

    #[test]
    fn circle_bounds_center_on_position() {
        let mut scene = Scene::new();
        let parent = scene
            .spawn(scene.root(), NodeDesc::new().at((100.0, 0.0)))
            .unwrap();
        let c = scene
            .spawn(
                parent,
                NodeDesc::new()
                    .at((40.0, 30.0))
                    .with_shape(CircleShape::new(8.0)),
            )
            .unwrap();
        assert_eq!(scene.bounding_box(c), Some(Rect::new(32.0, 22.0, 48.0, 38.0)));
        assert_eq!(scene.center(c), Some(Point::new(40.0, 30.0)));
        assert_eq!(
            scene.global_bounding_box(c),
            Some(Rect::new(132.0, 22.0, 148.0, 38.0))
        );
        assert_eq!(scene.bounding_box(parent), None);
    }

    #[test]
    fn container_wraps_content() {
        let mut scene = Scene::with_default_font(Arc::new(Monospace::new(10.0, 10.0)));
        let container = scene
            .spawn(
                scene.root(),
                NodeDesc::new()
                    .at((20.0, 20.0))
                    .with_shape(ContainerShape::new(4.0, 2.0)),
            )
            .unwrap();
        let label = scene
            .spawn(
                container,
                NodeDesc::new()
                    .at((99.0, 99.0))
                    .with_shape(boxed_text("hi")),
            )
            .unwrap();
        assert_eq!(
            scene.bounding_box(container),
            Some(Rect::new(115.0, 117.0, 143.0, 131.0))
        );

        scene.update(scene.root());
        assert_eq!(scene.position(label), Some(Point::new(4.0, 2.0)));

        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);
        assert_eq!(
            scene.local_bounds(container),
            Some(Rect::new(0.0, 0.0, 28.0, 14.0))
        );
        assert_eq!(
            canvas.ops[0],
            Op::Fill(Rect::new(20.0, 20.0, 48.0, 34.0), Color::WHITE)
        );
        assert_eq!(canvas.glyphs(), ['h', 'i']);
        assert_eq!(
            canvas.ops[1],
            Op::Glyph('h', Point::new(24.0, 22.0), Color::WHITE)
        );

        if let Some(Renderable {
            shape: Shape::Text(text),
            ..
        }) = scene.renderable_mut(label)
        {
            text.text = "hello".into();
        }
        assert_eq!(
            scene.local_bounds(container),
            Some(Rect::new(0.0, 0.0, 58.0, 14.0))
        );
        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);
        assert_eq!(
            canvas.ops[0],
            Op::Fill(Rect::new(20.0, 20.0, 78.0, 34.0), Color::WHITE)
        );
    }

    #[test]
    fn nested_containers_fit_in_the_first_frame() {
        let mut scene = Scene::new();
        let outer = scene
            .spawn(
                scene.root(),
                NodeDesc::new().with_shape(ContainerShape::new(5.0, 5.0)),
            )
            .unwrap();
        let inner = scene
            .spawn(outer, NodeDesc::new().with_shape(ContainerShape::new(5.0, 5.0)))
            .unwrap();
        scene
            .spawn(inner, NodeDesc::new().with_shape(rect(40.0, 20.0)))
            .unwrap();

        scene.init(scene.root());
        scene.update(scene.root());
        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);

        assert_eq!(scene.local_bounds(inner), Some(Rect::new(0.0, 0.0, 50.0, 30.0)));
        assert_eq!(scene.local_bounds(outer), Some(Rect::new(0.0, 0.0, 60.0, 40.0)));
        assert_eq!(
            canvas.ops[..2],
            [
                Op::Fill(Rect::new(0.0, 0.0, 60.0, 40.0), Color::WHITE),
                Op::Fill(Rect::new(5.0, 5.0, 55.0, 35.0), Color::WHITE),
            ]
        );
    }

    #[test]
    fn paint_order_and_visibility() {
        let mut scene = Scene::new();
        let a = scene
            .spawn(
                scene.root(),
                NodeDesc::new().with_shape(rect(10.0, 10.0)).with_tint(Color::RED),
            )
            .unwrap();
        let b = scene
            .spawn(
                a,
                NodeDesc::new()
                    .at((1.0, 1.0))
                    .with_shape(rect(2.0, 2.0))
                    .with_tint(Color::BLUE),
            )
            .unwrap();
        let outer = Op::Fill(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        let inner = Op::Fill(Rect::new(1.0, 1.0, 3.0, 3.0), Color::BLUE);

        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);
        assert_eq!(canvas.ops, [outer.clone(), inner.clone()]);

        scene.set_paint_order(a, PaintOrder::ChildrenFirst);
        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);
        assert_eq!(canvas.ops, [inner, outer.clone()]);

        scene.set_visible(b, false);
        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);
        assert_eq!(canvas.ops, [outer]);

        scene.set_visible(scene.root(), false);
        let mut canvas = Recorder::default();
        scene.render(scene.root(), &mut canvas);
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn anchors_place_nodes_on_the_lattice() {
        let mut scene = Scene::new();
        let root = scene.root();
        let board = scene
            .spawn(
                root,
                NodeDesc::new()
                    .at((100.0, 50.0))
                    .with_shape(GridShape::new(4, 4, Size::new(10.0, 10.0))),
            )
            .unwrap();
        let holder = scene.spawn(root, NodeDesc::new().at((30.0, 0.0))).unwrap();
        let piece = scene
            .spawn(
                holder,
                NodeDesc::new()
                    .anchored(board, 2, 3)
                    .with_shape(CircleShape::new(3.0)),
            )
            .unwrap();
        assert_eq!(scene.global_position(piece), Some(Point::new(120.0, 80.0)));
        assert_eq!(scene.position(piece), Some(Point::new(90.0, 80.0)));

        scene.set_grid_position(piece, 4, 0);
        assert_eq!(scene.global_position(piece), Some(Point::new(140.0, 50.0)));
        assert_eq!(scene.anchor(piece).map(|a| (a.x, a.y)), Some((4, 0)));

        // Anchoring to something that is not a grid leaves the node in place.
        scene.set_grid_anchor(
            piece,
            Some(GridAnchor {
                grid: holder,
                x: 0,
                y: 0,
            }),
        );
        assert_eq!(scene.global_position(piece), Some(Point::new(140.0, 50.0)));
    }

    #[test]
    fn depth_first_traversal() {
        let mut scene = Scene::new();
        // root -> [a -> [c, d], b]
        let root = scene.root();
        let a = scene.spawn(root, NodeDesc::new()).unwrap();
        let b = scene.spawn(root, NodeDesc::new()).unwrap();
        let c = scene.spawn(a, NodeDesc::new()).unwrap();
        let d = scene.spawn(a, NodeDesc::new()).unwrap();

        let order: Vec<NodeId> =
            core::iter::successors(Some(root), |&n| scene.next_depth_first(n)).collect();
        assert_eq!(order, vec![root, a, c, d, b]);

        scene.destroy(a);
        assert!(scene.next_depth_first(a).is_none());
        assert_eq!(scene.next_depth_first(root), Some(b));
    }
}
