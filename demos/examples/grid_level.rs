// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny grid level driven by behaviors.
//!
//! The level spawns its grid, a player and a satellite when initialized. The
//! player walks a scripted path across the lattice, clamped to the grid, and
//! the level hides the satellite once the player reaches it.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p bower_demos --example grid_level`

use bower_demos::{LogCanvas, init_tracing};
use bower_scene::{
    Behavior, CircleShape, GridShape, NodeDesc, NodeId, RectShape, Renderable, Scene, Shape,
};
use bower_text::Color;
use kurbo::{Rect, Size};
use tracing::info;

const PATH: [(i32, i32); 6] = [(1, 0), (1, 0), (0, 1), (0, 1), (1, 0), (5, 5)];

/// Moves its node one step along [`PATH`] per update.
struct Player {
    grid: GridShape,
    step: usize,
}

impl Behavior for Player {
    fn update(&mut self, scene: &mut Scene, node: NodeId) {
        let Some((dx, dy)) = PATH.get(self.step).copied() else {
            return;
        };
        self.step += 1;
        if let Some(anchor) = scene.anchor(node) {
            let (x, y) = self.grid.clamp_point(anchor.x + dx, anchor.y + dy);
            scene.set_grid_position(node, x, y);
            info!(x, y, "player moved");
        }
    }
}

#[derive(Default)]
struct Level {
    player: Option<NodeId>,
    satellite: Option<NodeId>,
}

impl Behavior for Level {
    fn init(&mut self, scene: &mut Scene, node: NodeId) {
        let grid = GridShape::new(4, 4, Size::new(10.0, 10.0));
        let Ok(board) = scene.spawn(
            node,
            NodeDesc::new()
                .at((20.0, 20.0))
                .with_shape(grid)
                .with_tint(Color::LIGHT_GRAY),
        ) else {
            return;
        };
        self.player = scene
            .spawn_with(
                node,
                NodeDesc::new()
                    .anchored(board, 0, 0)
                    .with_shape(CircleShape::default())
                    .with_tint(Color::BLUE),
                Player { grid, step: 0 },
            )
            .ok();
        self.satellite = scene
            .spawn(
                node,
                NodeDesc::new()
                    .anchored(board, 2, 2)
                    .with_shape(RectShape::new(Rect::new(-3.0, -3.0, 3.0, 3.0)))
                    .with_tint(Color::YELLOW),
            )
            .ok();
    }

    fn update(&mut self, scene: &mut Scene, _node: NodeId) {
        let (Some(player), Some(satellite)) = (self.player, self.satellite) else {
            return;
        };
        let reached = scene.anchor(player).map(|a| (a.x, a.y))
            == scene.anchor(satellite).map(|a| (a.x, a.y));
        if reached && scene.is_visible(satellite) {
            scene.set_visible(satellite, false);
            if let Some(Renderable {
                shape: Shape::Circle(circle),
                ..
            }) = scene.renderable_mut(player)
            {
                circle.radius *= 2.0;
            }
            info!("satellite collected");
        }
    }
}

fn main() {
    init_tracing();

    let mut scene = Scene::new();
    let root = scene.root();
    scene
        .spawn_with(root, NodeDesc::new(), Level::default())
        .expect("root is live");
    scene.init(root);

    let mut canvas = LogCanvas::default();
    for frame in 0..PATH.len() + 1 {
        scene.update(root);
        scene.render(root, &mut canvas);
        canvas.finish_frame(frame);
    }
}
