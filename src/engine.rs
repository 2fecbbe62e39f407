//! Fixed-step simulation engine.
//!
//! [`Engine`] owns every live body and emitter. The host calls
//! [`Engine::update`] once per frame with the wall-clock delta; deltas
//! accumulate until they exceed one time step, at which point exactly one
//! tick runs (no catch-up loop):
//!
//! 1. **Emit**: each emitter may add one body.
//! 2. **Physics**: every movable body receives its global forces, then is
//!    tested against every other body (or its grid candidates) and collisions
//!    are resolved with impulses.
//! 3. **Integrate**: every body advances; bodies that age out are queued.
//! 4. **Reap**: queued bodies leave the live list; emitters get their slot back.
//!
//! Pairwise work happens in list order, so earlier bodies see their
//! neighbours' velocities before later ones do.

use crate::body::{Body, BodyId};
use crate::collision;
use crate::config::{CursorForce, EngineConfig};
use crate::emitter::{Emitter, EmitterConfig};
use crate::error::SimResult;
use crate::forces;
use crate::impulse::{apply_impulse, Correction};
use crate::math::{Scalar, Vector2};
use crate::spatial_partition::SpatialGrid;
use bevy::log::{debug, info};
use bevy::prelude::Resource;

#[derive(Resource, Debug)]
pub struct Engine {
    config: EngineConfig,
    time_step: Scalar,
    bodies: Vec<Body>,
    emitters: Vec<Emitter>,
    pending_removal: Vec<BodyId>,
    timer: Scalar,
    runtime: Scalar,
    ticks: u64,
    next_id: u64,
    pointer: Option<Vector2>,
    grid: Option<SpatialGrid>,
}

impl Engine {
    /// Validates `config` and returns an engine with an empty scene. Call
    /// [`Engine::initialize`] to populate it.
    pub fn from_config(config: EngineConfig) -> SimResult<Self> {
        config.validate()?;
        let grid = config
            .broad_phase
            .then(|| SpatialGrid::new(config.grid_cell_size));
        Ok(Self {
            time_step: config.time_step(),
            config,
            bodies: Vec::new(),
            emitters: Vec::new(),
            pending_removal: Vec::new(),
            timer: Scalar::ZERO,
            runtime: Scalar::ZERO,
            ticks: 0,
            next_id: 0,
            pointer: None,
            grid,
        })
    }

    /// Builds the configured bodies and emitters, replacing any existing scene.
    pub fn initialize(&mut self) -> SimResult<()> {
        self.bodies.clear();
        self.emitters.clear();
        self.pending_removal.clear();
        self.timer = Scalar::ZERO;
        self.runtime = Scalar::ZERO;
        self.ticks = 0;

        for body_config in self.config.bodies.clone() {
            let body = body_config.build(BodyId(self.next_id))?;
            self.add_body(body);
        }
        for emitter_config in self.config.emitters.clone() {
            self.add_emitter(emitter_config)?;
        }

        info!(
            "Engine initialised: {} bodies, {} emitters, time step {}s",
            self.bodies.len(),
            self.emitters.len(),
            self.time_step
        );
        Ok(())
    }

    /// Adds `body` under a fresh id and returns that id.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = self.allocate_id();
        self.bodies.push(body.with_id(id));
        id
    }

    /// Returns the new emitter's index.
    pub fn add_emitter(&mut self, config: EmitterConfig) -> SimResult<usize> {
        let index = self.emitters.len();
        let seed = self.config.rng_seed.map(|s| s.wrapping_add(index as u64));
        self.emitters.push(Emitter::new(index, config, seed)?);
        Ok(index)
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── accessors ─────────────────────────────────────────────────────────────

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id() == id)
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bodies that aged out this tick and have not been reaped yet.
    pub fn pending_removal(&self) -> &[BodyId] {
        &self.pending_removal
    }

    /// Simulated seconds elapsed.
    pub fn runtime(&self) -> Scalar {
        self.runtime
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn time_step(&self) -> Scalar {
        self.time_step
    }

    pub fn pointer(&self) -> Option<Vector2> {
        self.pointer
    }

    /// Live pointer position in simulation space, or `None` when released.
    pub fn set_pointer(&mut self, pointer: Option<Vector2>) {
        self.pointer = pointer;
    }

    // ── loop ──────────────────────────────────────────────────────────────────

    /// Accumulates `dt` seconds and runs one tick once the accumulator passes
    /// the time step. Returns whether a tick ran.
    pub fn update(&mut self, dt: impl Into<Scalar>) -> bool {
        self.timer += dt.into();
        if self.timer <= self.time_step {
            return false;
        }
        self.timer = Scalar::ZERO;
        self.step();
        true
    }

    /// Runs one full tick regardless of the accumulator.
    pub fn step(&mut self) {
        self.runtime += self.time_step;
        self.ticks += 1;
        self.emit();
        self.physics_tick();
        self.integrate();
        self.reap();
    }

    pub fn emit(&mut self) {
        for index in 0..self.emitters.len() {
            let id = BodyId(self.next_id);
            if let Some(body) = self.emitters[index].emit(id) {
                self.next_id += 1;
                self.bodies.push(body);
            }
        }
    }

    pub fn physics_tick(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.rebuild(&self.bodies);
        }
        let angular = self.config.angular_impulse;
        let correction = Correction {
            percent: Scalar(self.config.position_correction),
            slop: Scalar(self.config.penetration_slop),
        };

        for i in 0..self.bodies.len() {
            if self.bodies[i].is_mass_infinite() {
                continue;
            }

            let force = self.external_force(i);
            self.bodies[i].impose(force);

            for j in self.collision_candidates(i) {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if let Some(mtv) = collision::resolve(a.polygon(), b.polygon()) {
                    apply_impulse(a, b, &mtv, angular, correction);
                }
            }
        }
    }

    fn collision_candidates(&self, index: usize) -> Vec<usize> {
        match &self.grid {
            Some(grid) => grid.candidates(index),
            None => (0..self.bodies.len()).filter(|&j| j != index).collect(),
        }
    }

    /// Sum of the global forces body `index` opted into.
    fn external_force(&self, index: usize) -> Vector2 {
        let config = &self.config;
        let body = &self.bodies[index];
        let capabilities = body.capabilities;
        let mut force = Vector2::ZERO;

        if capabilities.receives_gravity {
            force += forces::gravity(config.gravity_magnitude, config.gravity_direction)
                * body.mass();
        }

        if capabilities.receives_attraction {
            let g = Scalar(config.gravitational_constant);
            let floor = Scalar(config.min_attraction_distance);
            force += self
                .bodies
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != index)
                .map(|(_, other)| forces::attraction(body, other, g, floor))
                .sum::<Vector2>();
        }

        if capabilities.follows_cursor {
            if let Some(pointer) = self.pointer {
                force += match config.cursor_force {
                    CursorForce::Spring => forces::cursor_spring(
                        body,
                        pointer,
                        Scalar(config.cursor_spring_constant),
                        Scalar(config.cursor_rest_length),
                        Scalar(config.spring_damping),
                    ),
                    CursorForce::Attraction => forces::cursor_attraction(
                        body,
                        pointer,
                        Scalar(config.cursor_strength),
                        Scalar(config.gravitational_constant),
                        Scalar(config.min_attraction_distance),
                    ),
                };
            }
        }

        force
    }

    pub fn integrate(&mut self) {
        let damping = Scalar(self.config.damping);
        for body in &mut self.bodies {
            if body.integrate(self.time_step, damping) {
                self.pending_removal.push(body.id());
            }
        }
    }

    /// Drops every queued body and returns how many were removed.
    pub fn reap(&mut self) -> usize {
        if self.pending_removal.is_empty() {
            return 0;
        }

        let pending = std::mem::take(&mut self.pending_removal);
        let before = self.bodies.len();
        let emitters = &mut self.emitters;
        self.bodies.retain(|body| {
            if !pending.contains(&body.id()) {
                return true;
            }
            if let Some(emitter) = body.emitter().and_then(|i| emitters.get_mut(i)) {
                emitter.release();
            }
            false
        });

        let removed = before - self.bodies.len();
        debug!("tick {}: reaped {} bodies", self.ticks, removed);
        removed
    }
}

/// Two distinct mutable bodies out of one slice.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
