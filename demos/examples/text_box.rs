// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A padded panel wrapped around word-wrapped text.
//!
//! The panel grows to fit the label, including after the label is edited, and
//! the selection highlights one word.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p bower_demos --example text_box`

use bower_demos::{LogCanvas, dump, init_tracing};
use bower_scene::{ContainerShape, NodeDesc, Renderable, Scene, Shape, TextShape};
use bower_text::{Color, Selection};
use tracing::info;

fn main() {
    init_tracing();

    let mut scene = Scene::new();
    let root = scene.root();

    let panel = scene
        .spawn(
            root,
            NodeDesc::new()
                .at((40.0, 40.0))
                .with_shape(ContainerShape {
                    rounding: 0.2,
                    ..ContainerShape::new(8.0, 6.0)
                })
                .with_tint(Color::LIGHT_GRAY),
        )
        .expect("root is live");

    let label = scene
        .spawn(
            panel,
            NodeDesc::new()
                .with_shape(TextShape {
                    selection: Some(Selection {
                        range: 4..9,
                        tint: Color::WHITE,
                        background: Color::BLUE,
                    }),
                    ..TextShape::new("The quick brown fox jumps over the lazy dog").boxed(120.0, None)
                })
                .with_tint(Color::BLACK),
        )
        .expect("panel is live");

    scene.init(root);

    let mut canvas = LogCanvas::default();
    for frame in 0..3 {
        if frame == 1
            && let Some(Renderable {
                shape: Shape::Text(text),
                ..
            }) = scene.renderable_mut(label)
        {
            text.text.extend_from_slice(b"\nand then naps in the sun");
            info!("label grew");
        }

        scene.update(root);
        scene.render(root, &mut canvas);
        info!(frame, panel = ?scene.global_bounding_box(panel), "panel bounds");
        canvas.finish_frame(frame);
    }

    dump(&scene);
}
