//! Gizmo rendering of the engine state.
//!
//! | System                    | Schedule | Purpose                                  |
//! |---------------------------|----------|------------------------------------------|
//! | `body_outline_system`     | Update   | Closed outline + position cross per body |
//! | `pointer_overlay_system`  | Update   | Ring around the pointer while held       |
//!
//! Both read the [`Engine`] resource after it has ticked and never write to it.

use bevy::prelude::*;
use rigid2d::engine::Engine;
use rigid2d::simulation::sim_to_world;

const CROSS_HALF: f32 = 3.0;

fn dynamic_color() -> Color {
    Color::WHITE
}

fn static_color() -> Color {
    Color::srgb(0.45, 0.45, 0.5)
}

fn marker_color() -> Color {
    Color::srgb(1.0, 0.35, 0.2)
}

pub fn body_outline_system(mut gizmos: Gizmos, engine: Option<Res<Engine>>) {
    let Some(engine) = engine else {
        return;
    };

    for body in engine.bodies() {
        let color = if body.is_mass_infinite() {
            static_color()
        } else {
            dynamic_color()
        };

        let vertices = body.polygon().transformed_vertices();
        for i in 0..vertices.len() {
            let p1 = sim_to_world(vertices[i]);
            let p2 = sim_to_world(vertices[(i + 1) % vertices.len()]);
            gizmos.line_2d(p1, p2, color);
        }

        let pos = sim_to_world(body.position());
        gizmos.line_2d(
            pos - Vec2::X * CROSS_HALF,
            pos + Vec2::X * CROSS_HALF,
            marker_color(),
        );
        gizmos.line_2d(
            pos - Vec2::Y * CROSS_HALF,
            pos + Vec2::Y * CROSS_HALF,
            marker_color(),
        );
    }
}

pub fn pointer_overlay_system(mut gizmos: Gizmos, engine: Option<Res<Engine>>) {
    let Some(pointer) = engine.and_then(|e| e.pointer()) else {
        return;
    };
    gizmos.circle_2d(sim_to_world(pointer), 6.0, marker_color());
}
