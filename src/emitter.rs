//! Body emitters.
//!
//! An [`Emitter`] spawns at most one body per call at a fixed location until
//! its running count reaches `amount`. Reaping an emitted body hands its slot
//! back through [`Emitter::release`], so a capped emitter keeps a steady
//! population of short-lived bodies.

use crate::body::{Body, BodyCapabilities, BodyId};
use crate::config::ShapeConfig;
use crate::constants::*;
use crate::error::{validate_range, validate_unit_interval, SimResult};
use crate::math::{Scalar, Vector2};
use bevy::log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    pub position: Vector2,
    /// Maximum number of live bodies from this emitter.
    pub amount: usize,
    pub shape: ShapeConfig,
    pub mass: f32,
    /// Draw lifetime and velocity from the ranges below instead of the fixed values.
    pub random: bool,
    pub lifetime: f32,
    pub min_lifetime: f32,
    pub max_lifetime: f32,
    pub velocity: Vector2,
    pub min_velocity: f32,
    pub max_velocity: f32,
    pub restitution: f32,
    pub capabilities: BodyCapabilities,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            amount: 10,
            shape: ShapeConfig::IsoTriangle {
                width: 30.0,
                height: 30.0,
            },
            mass: 1.0,
            random: true,
            lifetime: IMMORTAL,
            min_lifetime: EMITTER_MIN_LIFETIME,
            max_lifetime: EMITTER_MAX_LIFETIME,
            velocity: Vector2::ZERO,
            min_velocity: EMITTER_MIN_VELOCITY,
            max_velocity: EMITTER_MAX_VELOCITY,
            restitution: 1.0,
            capabilities: BodyCapabilities::GRAVITY,
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> SimResult<()> {
        validate_range("emitter.lifetime", self.min_lifetime, self.max_lifetime)?;
        validate_range("emitter.velocity", self.min_velocity, self.max_velocity)?;
        validate_unit_interval("emitter.restitution", self.restitution)
    }
}

#[derive(Debug, Clone)]
pub struct Emitter {
    index: usize,
    config: EmitterConfig,
    prototype: Body,
    count: usize,
    rng: StdRng,
}

impl Emitter {
    /// Builds the emitter's body template up front, so a bad shape fails here
    /// rather than mid-tick. `seed = None` draws from OS entropy.
    pub fn new(index: usize, config: EmitterConfig, seed: Option<u64>) -> SimResult<Self> {
        config.validate()?;
        let prototype = Body::new(BodyId(0), config.shape.build()?, config.mass, config.position)?
            .with_restitution(config.restitution)
            .with_capabilities(config.capabilities)
            .with_emitter(index);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            index,
            config,
            prototype,
            count: 0,
            rng,
        })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.config.amount
    }

    /// Spawns one body, or `None` once the cap is reached.
    pub fn emit(&mut self, next_id: BodyId) -> Option<Body> {
        if self.is_full() {
            return None;
        }

        let (lifetime, velocity) = if self.config.random {
            let lifetime = sample(&mut self.rng, self.config.min_lifetime, self.config.max_lifetime);
            let velocity = Vector2::new(
                sample(&mut self.rng, self.config.min_velocity, self.config.max_velocity),
                sample(&mut self.rng, self.config.min_velocity, self.config.max_velocity),
            );
            (Scalar(lifetime), velocity)
        } else {
            (Scalar(self.config.lifetime), self.config.velocity)
        };

        self.count += 1;
        debug!(
            "emitter {} spawned {:?} ({}/{})",
            self.index, next_id, self.count, self.config.amount
        );

        Some(
            self.prototype
                .clone()
                .with_id(next_id)
                .with_lifetime(lifetime)
                .with_velocity(velocity),
        )
    }

    /// Frees one slot after an emitted body is reaped.
    pub fn release(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

/// Uniform draw from `[min, max)`; a collapsed range yields `min`.
fn sample(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
