use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use rigid2d::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use rigid2d::engine::Engine;
use rigid2d::math::Vector2;
use rigid2d::simulation::SimulationPlugin;

mod graphics;
mod rendering;

/// Injects the cursor as the engine pointer while the left button is held.
///
/// Window cursor coordinates are already Y-down from the top-left corner,
/// which is simulation space.
fn pointer_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    engine: Option<ResMut<Engine>>,
) {
    let Some(mut engine) = engine else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    let pointer = if buttons.pressed(MouseButton::Left) {
        window.cursor_position().map(Vector2::from)
    } else {
        None
    };
    if pointer != engine.pointer() {
        engine.set_pointer(pointer);
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rigid Body Simulation".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(SimulationPlugin)
        .add_systems(Startup, graphics::setup_camera)
        .add_systems(
            Update,
            (
                // Pointer first so this frame's tick sees it.
                pointer_input_system.before(rigid2d::simulation::engine_update_system),
                rendering::body_outline_system.after(rigid2d::simulation::engine_update_system),
                rendering::pointer_overlay_system,
            ),
        )
        .run();
}
