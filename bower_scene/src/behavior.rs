// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node application logic.

use crate::canvas::Canvas;
use crate::scene::Scene;
use crate::types::NodeId;

/// Hooks the scene runs for a node during its passes.
///
/// While a hook runs, the behavior is taken out of its node, so the hook may
/// freely edit the scene, including spawning children under `node`.
pub trait Behavior {
    /// Runs once, the first time the node is initialized, before its children.
    fn init(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// Runs every update pass while the node is active, before its children.
    fn update(&mut self, _scene: &mut Scene, _node: NodeId) {}

    /// Runs every render pass while the node is visible, right after its shape
    /// is drawn.
    fn render(&mut self, _scene: &Scene, _node: NodeId, _canvas: &mut dyn Canvas) {}
}
