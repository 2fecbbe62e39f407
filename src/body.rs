//! Simulated rigid bodies.
//!
//! A [`Body`] owns its [`Polygon`]; the polygon's pose *is* the body's pose,
//! so there is a single source of truth for position and rotation. Forces are
//! accumulated per tick through [`Body::impose`] and consumed (then zeroed) by
//! [`Body::integrate`], a semi-implicit Euler step.
//!
//! ## Lifecycle
//!
//! `Alive → Removed` once `age >= lifetime` with a non-negative lifetime.
//! The transition is reported exactly once by `integrate`; the engine then
//! drops the body at the end of the tick.

use crate::constants::{IMMORTAL, INFINITE_MASS};
use crate::error::SimResult;
use crate::math::{Scalar, Vector2};
use crate::polygon::{calculate_moment_of_inertia, Polygon};
use serde::Deserialize;

/// Stable identifier, unique within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Alive,
    Removed,
}

/// Which global forces a body receives. Decided at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct BodyCapabilities {
    pub receives_gravity: bool,
    pub receives_attraction: bool,
    pub follows_cursor: bool,
}

impl BodyCapabilities {
    pub const NONE: BodyCapabilities = BodyCapabilities {
        receives_gravity: false,
        receives_attraction: false,
        follows_cursor: false,
    };

    pub const GRAVITY: BodyCapabilities = BodyCapabilities {
        receives_gravity: true,
        receives_attraction: false,
        follows_cursor: false,
    };
}

#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    polygon: Polygon,
    mass: Scalar,
    inertia: Scalar,
    pub restitution: Scalar,
    pub velocity: Vector2,
    /// Radians per second.
    pub angular_velocity: Scalar,
    acceleration: Vector2,
    torque: Scalar,
    age: Scalar,
    lifetime: Scalar,
    state: BodyState,
    pub capabilities: BodyCapabilities,
    emitter: Option<usize>,
}

impl Body {
    /// Creates an immortal, motionless body whose polygon origin sits at
    /// `position`. Fails if the polygon cannot yield a moment of inertia.
    pub fn new(
        id: BodyId,
        mut polygon: Polygon,
        mass: impl Into<Scalar>,
        position: Vector2,
    ) -> SimResult<Self> {
        let mass = mass.into();
        let inertia = calculate_moment_of_inertia(polygon.vertices(), mass)?;
        polygon.set_position(position);
        Ok(Self {
            id,
            polygon,
            mass,
            inertia,
            restitution: Scalar::ONE,
            velocity: Vector2::ZERO,
            angular_velocity: Scalar::ZERO,
            acceleration: Vector2::ZERO,
            torque: Scalar::ZERO,
            age: Scalar::ZERO,
            lifetime: Scalar(IMMORTAL),
            state: BodyState::Alive,
            capabilities: BodyCapabilities::NONE,
            emitter: None,
        })
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: impl Into<Scalar>) -> Self {
        self.angular_velocity = angular_velocity.into();
        self
    }

    pub fn with_restitution(mut self, restitution: impl Into<Scalar>) -> Self {
        self.restitution = restitution.into();
        self
    }

    /// Negative lifetime means immortal.
    pub fn with_lifetime(mut self, lifetime: impl Into<Scalar>) -> Self {
        self.lifetime = lifetime.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: BodyCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub(crate) fn with_id(mut self, id: BodyId) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn with_emitter(mut self, emitter: usize) -> Self {
        self.emitter = Some(emitter);
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    /// Moment of inertia about the centroid, computed once at construction.
    #[inline]
    pub fn inertia(&self) -> Scalar {
        self.inertia
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.polygon.position()
    }

    #[inline]
    pub fn set_position(&mut self, position: Vector2) {
        self.polygon.set_position(position);
    }

    /// Radians.
    #[inline]
    pub fn rotation(&self) -> Scalar {
        self.polygon.rotation()
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: Scalar) {
        self.polygon.set_pose(self.polygon.position(), rotation);
    }

    /// World-space centre of mass (position + centroid; rotation pivots
    /// about the centroid so it stays put).
    #[inline]
    pub fn center(&self) -> Vector2 {
        self.polygon.world_centroid()
    }

    /// Moves the body so its centre of mass lands on `center`.
    pub fn set_center(&mut self, center: Vector2) {
        let offset = center - self.center();
        self.set_position(self.position() + offset);
    }

    #[inline]
    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    #[inline]
    pub fn torque(&self) -> Scalar {
        self.torque
    }

    #[inline]
    pub fn age(&self) -> Scalar {
        self.age
    }

    #[inline]
    pub fn lifetime(&self) -> Scalar {
        self.lifetime
    }

    #[inline]
    pub fn state(&self) -> BodyState {
        self.state
    }

    /// Index of the emitter that spawned this body, if any.
    #[inline]
    pub fn emitter(&self) -> Option<usize> {
        self.emitter
    }

    // ── mass model ────────────────────────────────────────────────────────────

    /// Non-positive mass and mass at or above `1e10` are both immovable.
    #[inline]
    pub fn is_mass_infinite(&self) -> bool {
        self.mass <= Scalar::ZERO || self.mass >= INFINITE_MASS
    }

    #[inline]
    pub fn inverse_mass(&self) -> Scalar {
        if self.is_mass_infinite() {
            Scalar::ZERO
        } else {
            Scalar::ONE / self.mass
        }
    }

    /// Zero for immovable bodies and for shapes without area.
    #[inline]
    pub fn inverse_inertia(&self) -> Scalar {
        if self.is_mass_infinite() || self.inertia <= Scalar::ZERO {
            Scalar::ZERO
        } else {
            Scalar::ONE / self.inertia
        }
    }

    // ── forces ────────────────────────────────────────────────────────────────

    /// Accumulates `force / mass` for this tick.
    ///
    /// Precondition: the body is not immovable. Zero mass divides by zero and
    /// leaves a non-finite acceleration; the engine only imposes on bodies
    /// with finite mass, and [`Body::integrate`] never applies acceleration
    /// to an immovable body.
    pub fn impose(&mut self, force: Vector2) {
        self.acceleration += force / self.mass;
    }

    /// Accumulates `torque / mass` for this tick. Same precondition as
    /// [`Body::impose`].
    pub fn impose_angular(&mut self, torque: impl Into<Scalar>) {
        self.torque += torque.into() / self.mass;
    }

    pub fn clear_accumulators(&mut self) {
        self.acceleration = Vector2::ZERO;
        self.torque = Scalar::ZERO;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime >= Scalar::ZERO && self.age >= self.lifetime
    }

    /// Advances one tick with semi-implicit Euler.
    ///
    /// Returns `true` exactly once: on the tick the body ages out. An expired
    /// body is not integrated on that tick or any later one.
    pub fn integrate(&mut self, dt: Scalar, damping: Scalar) -> bool {
        if self.state == BodyState::Removed {
            return false;
        }

        self.age += dt;
        if self.is_expired() {
            self.state = BodyState::Removed;
            return true;
        }

        if !self.is_mass_infinite() {
            self.velocity += self.acceleration * dt;
            self.angular_velocity += self.torque * dt;
            self.velocity *= damping;
            self.angular_velocity *= damping;
        }

        let position = self.position() + self.velocity * dt;
        let rotation = self.rotation() + self.angular_velocity * dt;
        self.polygon.set_pose(position, rotation);

        self.clear_accumulators();
        false
    }
}
