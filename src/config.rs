//! Runtime engine configuration loaded from `assets/engine.toml`.
//!
//! [`EngineConfig`] is a Bevy `Resource` whose defaults mirror
//! [`crate::constants`]. At startup, [`load_engine_config`] reads
//! `assets/engine.toml` and replaces the defaults with whatever the file sets.
//! Missing keys fall back to the compile-time defaults, so a minimal TOML can
//! override just the values you care about.
//!
//! The configuration is read once; the engine copies what it needs at
//! construction and never looks at the resource again.
//!
//! ## Example
//!
//! ```toml
//! ticks_per_second = 120
//! gravity_magnitude = 250.0
//!
//! [[bodies]]
//! shape = { type = "rectangle", width = 200.0, height = 20.0 }
//! mass = 1e18
//! position = { x = 400.0, y = 400.0 }
//! ```

use crate::body::{Body, BodyCapabilities, BodyId};
use crate::constants::*;
use crate::emitter::EmitterConfig;
use crate::error::*;
use crate::math::{Scalar, Vector2};
use crate::polygon::Polygon;
use crate::shapes;
use bevy::log::{info, warn};
use bevy::prelude::{ResMut, Resource};
use serde::Deserialize;
use std::path::Path;

/// Where the binary looks for its configuration, relative to the working directory.
pub const ENGINE_CONFIG_PATH: &str = "assets/engine.toml";

/// Which force a `follows_cursor` body feels while the pointer is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorForce {
    #[default]
    Spring,
    Attraction,
}

/// Polygon recipe, tagged by `type` in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
    Rectangle { width: f32, height: f32 },
    Triangle { side: f32 },
    IsoTriangle { width: f32, height: f32 },
    Circle { radius: f32, sides: usize },
    Custom { vertices: Vec<Vector2> },
}

impl ShapeConfig {
    pub fn build(&self) -> SimResult<Polygon> {
        match self {
            ShapeConfig::Rectangle { width, height } => shapes::rectangle(*width, *height),
            ShapeConfig::Triangle { side } => shapes::triangle(*side),
            ShapeConfig::IsoTriangle { width, height } => shapes::iso_triangle(*width, *height),
            ShapeConfig::Circle { radius, sides } => shapes::circle(*radius, *sides),
            ShapeConfig::Custom { vertices } => Polygon::new(vertices.clone()),
        }
    }
}

/// One body placed in the scene at initialisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub shape: ShapeConfig,
    /// `<= 0` or `>= 1e10` makes the body static.
    pub mass: f32,
    pub position: Vector2,
    pub velocity: Vector2,
    pub angular_velocity: f32,
    pub restitution: f32,
    /// Seconds; negative is immortal.
    pub lifetime: f32,
    pub receives_gravity: bool,
    pub receives_attraction: bool,
    pub follows_cursor: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            shape: ShapeConfig::Rectangle {
                width: 20.0,
                height: 20.0,
            },
            mass: 1.0,
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
            angular_velocity: 0.0,
            restitution: 1.0,
            lifetime: IMMORTAL,
            receives_gravity: false,
            receives_attraction: false,
            follows_cursor: false,
        }
    }
}

impl BodyConfig {
    pub fn capabilities(&self) -> BodyCapabilities {
        BodyCapabilities {
            receives_gravity: self.receives_gravity,
            receives_attraction: self.receives_attraction,
            follows_cursor: self.follows_cursor,
        }
    }

    pub fn build(&self, id: BodyId) -> SimResult<Body> {
        Ok(Body::new(id, self.shape.build()?, self.mass, self.position)?
            .with_velocity(self.velocity)
            .with_angular_velocity(self.angular_velocity)
            .with_restitution(self.restitution)
            .with_lifetime(self.lifetime)
            .with_capabilities(self.capabilities()))
    }
}

/// Runtime-tunable engine configuration.
///
/// All scalar fields default to the corresponding constant in
/// `src/constants.rs`; `bodies` and `emitters` default to the demo scene
/// (a box bouncing on a static platform next to a particle fountain).
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // ── Timing ────────────────────────────────────────────────────────────────
    pub ticks_per_second: u32,
    pub iterations: u32,
    pub speed: f32,

    // ── Integration ───────────────────────────────────────────────────────────
    pub damping: f32,

    // ── Forces ────────────────────────────────────────────────────────────────
    pub gravity_magnitude: f32,
    pub gravity_direction: Vector2,
    pub gravitational_constant: f32,
    pub min_attraction_distance: f32,
    pub spring_damping: f32,

    // ── Cursor ────────────────────────────────────────────────────────────────
    pub cursor_force: CursorForce,
    pub cursor_spring_constant: f32,
    pub cursor_rest_length: f32,
    pub cursor_strength: f32,

    // ── Collision ─────────────────────────────────────────────────────────────
    pub broad_phase: bool,
    pub grid_cell_size: f32,
    /// Collision impulses also change angular velocity.
    pub angular_impulse: bool,
    pub position_correction: f32,
    pub penetration_slop: f32,

    // ── Scene ─────────────────────────────────────────────────────────────────
    /// Seeds every emitter's RNG; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
    pub bodies: Vec<BodyConfig>,
    pub emitters: Vec<EmitterConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            iterations: ITERATIONS,
            speed: SPEED,
            damping: DAMPING,
            gravity_magnitude: GRAVITY_MAGNITUDE,
            gravity_direction: Vector2::DOWN,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            min_attraction_distance: MIN_ATTRACTION_DISTANCE,
            spring_damping: SPRING_DAMPING,
            cursor_force: CursorForce::Spring,
            cursor_spring_constant: CURSOR_SPRING_CONSTANT,
            cursor_rest_length: CURSOR_REST_LENGTH,
            cursor_strength: CURSOR_STRENGTH,
            broad_phase: false,
            grid_cell_size: GRID_CELL_SIZE,
            angular_impulse: ANGULAR_IMPULSE,
            position_correction: POSITION_CORRECTION,
            penetration_slop: PENETRATION_SLOP,
            rng_seed: None,
            bodies: default_bodies(),
            emitters: default_emitters(),
        }
    }
}

fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig {
            shape: ShapeConfig::Rectangle {
                width: 200.0,
                height: 20.0,
            },
            mass: 1e18,
            position: Vector2::new(400.0, 400.0),
            ..BodyConfig::default()
        },
        BodyConfig {
            mass: 10.0,
            position: Vector2::new(500.0, 0.0),
            receives_gravity: true,
            ..BodyConfig::default()
        },
    ]
}

fn default_emitters() -> Vec<EmitterConfig> {
    vec![EmitterConfig {
        position: Vector2::new(500.0, 100.0),
        amount: 40,
        ..EmitterConfig::default()
    }]
}

impl EngineConfig {
    /// A config with the same tunables but nothing in the scene.
    pub fn empty() -> Self {
        Self {
            bodies: Vec::new(),
            emitters: Vec::new(),
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| SimError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> SimResult<()> {
        validate_positive("ticks_per_second", self.ticks_per_second as f32)?;
        validate_positive("iterations", self.iterations as f32)?;
        validate_positive("speed", self.speed)?;
        validate_damping(self.damping)?;
        validate_positive("min_attraction_distance", self.min_attraction_distance)?;
        validate_positive("grid_cell_size", self.grid_cell_size)?;
        validate_unit_interval("position_correction", self.position_correction)?;
        if self.penetration_slop < 0.0 {
            return Err(SimError::UnsafeConstant {
                name: "penetration_slop",
                value: self.penetration_slop,
                safe_range: "[0.0, ∞)",
            });
        }
        for body in &self.bodies {
            validate_unit_interval("body.restitution", body.restitution)?;
        }
        for emitter in &self.emitters {
            emitter.validate()?;
        }
        Ok(())
    }

    /// Seconds of simulated time per tick: `1 / ticks_per_second / iterations * speed`.
    pub fn time_step(&self) -> Scalar {
        Scalar(1.0 / self.ticks_per_second as f32 / self.iterations as f32 * self.speed)
    }
}

/// Startup system: attempt to load `assets/engine.toml` and replace the
/// `EngineConfig` resource with it.
///
/// A missing file keeps the compiled defaults. A file that fails to parse or
/// validate is reported and also leaves the defaults in place.
pub fn load_engine_config(mut config: ResMut<EngineConfig>) {
    match EngineConfig::load(ENGINE_CONFIG_PATH) {
        Ok(loaded) => {
            *config = loaded;
            info!("Loaded engine config from {ENGINE_CONFIG_PATH}");
        }
        Err(SimError::ConfigIo { .. }) => {
            info!("No {ENGINE_CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("Failed to load {ENGINE_CONFIG_PATH}: {e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.ticks_per_second, TICKS_PER_SECOND);
        assert_eq!(config.damping, DAMPING);
        assert_eq!(config.gravity_direction, Vector2::DOWN);
        assert_eq!(config.bodies.len(), 2, "platform and box");
        assert_eq!(config.emitters.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_time_step_is_one_sixtieth() {
        assert_eq!(EngineConfig::default().time_step(), Scalar(1.0 / 60.0));
    }

    #[test]
    fn time_step_divides_by_iterations_and_scales_by_speed() {
        let config = EngineConfig {
            ticks_per_second: 50,
            iterations: 2,
            speed: 4.0,
            ..EngineConfig::empty()
        };
        assert_eq!(config.time_step(), Scalar(0.04));
    }

    #[test]
    fn default_scene_platform_is_static() {
        let config = EngineConfig::default();
        let platform = config.bodies[0].build(BodyId(0)).unwrap();
        let falling = config.bodies[1].build(BodyId(1)).unwrap();
        assert!(platform.is_mass_infinite());
        assert!(!falling.is_mass_infinite());
        assert!(falling.capabilities.receives_gravity);
    }

    // ── parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config = EngineConfig::from_toml_str(
            r#"
            ticks_per_second = 120
            cursor_force = "attraction"
            gravity_direction = { x = 1.0, y = 0.0 }
            angular_impulse = true
            "#,
        )
        .unwrap();
        assert_eq!(config.ticks_per_second, 120);
        assert!(config.angular_impulse);
        assert!(!EngineConfig::default().angular_impulse);
        assert_eq!(config.cursor_force, CursorForce::Attraction);
        assert_eq!(config.gravity_direction, Vector2::RIGHT);
        assert_eq!(config.speed, SPEED);
    }

    #[test]
    fn tagged_shapes_parse() {
        let config = EngineConfig::from_toml_str(
            r#"
            [[bodies]]
            shape = { type = "circle", radius = 15.0, sides = 12 }
            mass = 3.0
            receives_attraction = true

            [[bodies]]
            shape = { type = "custom", vertices = [{ x = 0.0, y = 0.0 }, { x = 10.0, y = 0.0 }, { x = 0.0, y = 10.0 }] }

            [[emitters]]
            position = { x = 10.0, y = 20.0 }
            amount = 5
            shape = { type = "triangle", side = 8.0 }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.bodies[0].shape,
            ShapeConfig::Circle {
                radius: 15.0,
                sides: 12
            }
        );
        assert!(config.bodies[0].capabilities().receives_attraction);
        assert_eq!(config.bodies[1].shape.build().unwrap().vertices().len(), 3);
        assert_eq!(config.emitters[0].amount, 5);
        assert_eq!(config.emitters[0].shape, ShapeConfig::Triangle { side: 8.0 });
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("ticks_per_second = [").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }), "got {err:?}");
    }

    // ── validation ────────────────────────────────────────────────────────────

    #[test]
    fn unsafe_values_are_rejected() {
        for doc in [
            "ticks_per_second = 0",
            "iterations = 0",
            "speed = -1.0",
            "damping = 1.5",
            "grid_cell_size = 0.0",
            "position_correction = 2.0",
            "penetration_slop = -0.1",
        ] {
            let err = EngineConfig::from_toml_str(doc).unwrap_err();
            assert!(
                matches!(err, SimError::UnsafeConstant { .. }),
                "{doc} should be unsafe, got {err:?}"
            );
        }
    }

    #[test]
    fn body_restitution_out_of_range_is_rejected() {
        let err = EngineConfig::from_toml_str(
            r#"
            [[bodies]]
            restitution = 1.5
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SimError::UnsafeConstant {
                name: "body.restitution",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, SimError::ConfigIo { .. }));
    }
}
