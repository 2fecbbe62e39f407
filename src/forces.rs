//! Force library.
//!
//! Every function here maps body state (plus parameters) to a force vector
//! and leaves its inputs untouched. The one exception is [`pendulum`], which
//! places the bob body on its arc; its angle state is an explicit
//! [`PendulumState`] value passed in and returned, never hidden.
//!
//! Positions are taken at each body's centre of mass ([`Body::center`]).
//! Cursor variants take the pointer position as an argument, read by the
//! host at call time.

use crate::body::Body;
use crate::constants::CURSOR_MASS_SCALE;
use crate::math::{Scalar, Vector2};

/// Uniform gravity: `magnitude * direction`.
#[inline]
pub fn gravity(magnitude: impl Into<Scalar>, direction: Vector2) -> Vector2 {
    direction * magnitude.into()
}

/// Newtonian attraction `G·m₁·m₂ / r²` pulling `body` towards `other`.
///
/// `r` is floored at `min_distance` so near-contact pairs stay finite.
pub fn attraction(
    body: &Body,
    other: &Body,
    gravitational_constant: Scalar,
    min_distance: Scalar,
) -> Vector2 {
    point_attraction(
        body,
        other.center(),
        other.mass(),
        gravitational_constant,
        min_distance,
    )
}

/// Pull of constant magnitude towards `other`, independent of distance.
pub fn fake_attraction(body: &Body, other: &Body, magnitude: impl Into<Scalar>) -> Vector2 {
    (other.center() - body.center()).normalize() * magnitude.into()
}

/// Attraction towards the pointer, treated as a point mass of
/// `strength * 1e15`.
pub fn cursor_attraction(
    body: &Body,
    pointer: Vector2,
    strength: Scalar,
    gravitational_constant: Scalar,
    min_distance: Scalar,
) -> Vector2 {
    point_attraction(
        body,
        pointer,
        strength * CURSOR_MASS_SCALE,
        gravitational_constant,
        min_distance,
    )
}

fn point_attraction(
    body: &Body,
    target: Vector2,
    target_mass: Scalar,
    gravitational_constant: Scalar,
    min_distance: Scalar,
) -> Vector2 {
    let delta = target - body.center();
    let r = delta.magnitude().max(min_distance);
    let magnitude = gravitational_constant * body.mass() * target_mass / (r * r);
    delta.normalize() * magnitude
}

/// Damped linear spring pulling `body` towards `anchor`:
/// `-(k/m)(stretch · n) - (d/m) v`, with `n` pointing from anchor to body.
pub fn spring(
    body: &Body,
    anchor: Vector2,
    spring_constant: Scalar,
    rest_length: Scalar,
    damping: Scalar,
) -> Vector2 {
    let p = body.center();
    let stretch = p.distance(anchor) - rest_length;
    let n = (p - anchor).normalize();
    let m = body.mass();
    -(spring_constant / m) * (n * stretch) - (damping / m) * body.velocity
}

/// Spring anchored on another body's centre of mass.
pub fn spring_to_body(
    body: &Body,
    other: &Body,
    spring_constant: Scalar,
    rest_length: Scalar,
    damping: Scalar,
) -> Vector2 {
    spring(body, other.center(), spring_constant, rest_length, damping)
}

/// Spring anchored on the live pointer position.
#[inline]
pub fn cursor_spring(
    body: &Body,
    pointer: Vector2,
    spring_constant: Scalar,
    rest_length: Scalar,
    damping: Scalar,
) -> Vector2 {
    spring(body, pointer, spring_constant, rest_length, damping)
}

// ── Pendulum ──────────────────────────────────────────────────────────────────

/// Angle state of a simple pendulum, owned by the caller.
///
/// `theta` is measured from straight down (Y-down world), radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendulumState {
    pub theta: Scalar,
    pub angular_velocity: Scalar,
}

impl PendulumState {
    pub fn new(theta: impl Into<Scalar>) -> Self {
        Self {
            theta: theta.into(),
            angular_velocity: Scalar::ZERO,
        }
    }

    /// One semi-implicit step of `θ'' = -(g/L) sin θ`, with the angular
    /// velocity scaled by `damping` (1.0 = undamped).
    pub fn step(self, gravity: Scalar, length: Scalar, damping: Scalar, dt: Scalar) -> Self {
        let angular_acceleration = -(gravity / length) * self.theta.sin();
        let angular_velocity = (self.angular_velocity + angular_acceleration * dt) * damping;
        Self {
            theta: self.theta + angular_velocity * dt,
            angular_velocity,
        }
    }

    pub fn bob_position(&self, anchor: Vector2, length: Scalar) -> Vector2 {
        anchor + Vector2::from_scalars(self.theta.sin(), self.theta.cos()) * length
    }

    /// Linear velocity of the bob along the arc.
    pub fn bob_velocity(&self, length: Scalar) -> Vector2 {
        Vector2::from_scalars(self.theta.cos(), -self.theta.sin()) * (self.angular_velocity * length)
    }
}

/// Advances `state` one step and moves `body` onto the arc around `anchor`.
///
/// Side effect: overwrites the body's position and velocity.
pub fn pendulum(
    body: &mut Body,
    anchor: Vector2,
    state: PendulumState,
    gravity: Scalar,
    length: Scalar,
    damping: Scalar,
    dt: Scalar,
) -> PendulumState {
    let next = state.step(gravity, length, damping, dt);
    body.set_center(next.bob_position(anchor, length));
    body.velocity = next.bob_velocity(length);
    next
}
