//! Simulation plugin and systems for Bevy ECS

use crate::config::{load_engine_config, EngineConfig};
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::engine::Engine;
use crate::math::Vector2;
use bevy::prelude::*;

/// Loads the config, builds the [`Engine`] resource and drives it once per frame.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .add_systems(Startup, (load_engine_config, initialize_engine).chain())
            .add_systems(Update, engine_update_system);
    }
}

/// Startup system: build the engine from the final config and insert it.
///
/// A scene that cannot be built is logged and leaves no `Engine` resource;
/// the update system then idles.
pub fn initialize_engine(mut commands: Commands, config: Res<EngineConfig>) {
    let engine = Engine::from_config(config.clone()).and_then(|mut engine| {
        engine.initialize()?;
        Ok(engine)
    });
    match engine {
        Ok(engine) => commands.insert_resource(engine),
        Err(e) => error!("Engine initialisation failed: {e}"),
    }
}

/// Feed the frame delta into the fixed-step accumulator.
pub fn engine_update_system(time: Res<Time>, engine: Option<ResMut<Engine>>) {
    let Some(mut engine) = engine else {
        return;
    };
    engine.update(time.delta_secs());
}

/// Simulation space (Y-down, origin top-left of the window) to Bevy world
/// space (Y-up, origin at the window centre).
pub fn sim_to_world(point: Vector2) -> Vec2 {
    Vec2::new(
        point.x.0 - WINDOW_WIDTH / 2.0,
        WINDOW_HEIGHT / 2.0 - point.y.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn world_with_engine() -> World {
        let mut world = World::new();
        world.insert_resource(EngineConfig::default());
        let mut schedule = Schedule::default();
        schedule.add_systems(initialize_engine);
        schedule.run(&mut world);
        world
    }

    #[test]
    fn initialize_engine_inserts_resource() {
        let world = world_with_engine();
        let engine = world.resource::<Engine>();
        assert_eq!(engine.bodies().len(), 2);
    }

    #[test]
    fn broken_scene_leaves_no_engine() {
        let mut world = World::new();
        world.insert_resource(EngineConfig {
            iterations: 0,
            ..EngineConfig::default()
        });
        let mut schedule = Schedule::default();
        schedule.add_systems(initialize_engine);
        schedule.run(&mut world);
        assert!(world.get_resource::<Engine>().is_none());
    }

    #[test]
    fn update_system_ticks_on_large_frame() {
        let mut world = world_with_engine();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_millis(20));
        world.insert_resource(time);

        let mut schedule = Schedule::default();
        schedule.add_systems(engine_update_system);
        schedule.run(&mut world);

        assert_eq!(world.resource::<Engine>().ticks(), 1);
    }

    #[test]
    fn update_system_idles_without_engine() {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        let mut schedule = Schedule::default();
        schedule.add_systems(engine_update_system);
        schedule.run(&mut world);
        assert!(world.get_resource::<Engine>().is_none());
    }

    #[test]
    fn window_corners_map_to_world_corners() {
        assert_eq!(sim_to_world(Vector2::ZERO), Vec2::new(-500.0, 400.0));
        assert_eq!(
            sim_to_world(Vector2::new(1000.0, 800.0)),
            Vec2::new(500.0, -400.0)
        );
        assert_eq!(sim_to_world(Vector2::new(500.0, 400.0)), Vec2::ZERO);
    }
}
