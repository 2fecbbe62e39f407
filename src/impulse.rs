//! Impulse-based collision response.
//!
//! [`apply_impulse`] turns one SAT contact into velocity changes on both
//! bodies, with restitution `min(e_a, e_b)`. Immovable bodies contribute
//! nothing to the denominator and are never written to.
//!
//! With `angular` set, the impulse also acts through the moment arms from
//! each centre of mass to the contact point, adding `(r × n)² / I` terms to
//! the denominator and changing angular velocity. The contact point is the
//! coarse SAT estimate, so this is opt-in.
//!
//! After the impulse, a small positional correction pushes the pair apart
//! along the MTV axis so resting contacts do not sink under gravity.

use crate::body::Body;
use crate::collision::Mtv;
use crate::constants::MIN_NORMAL_ALIGNMENT;
use crate::math::{Scalar, Vector2};

/// Tuning for the positional correction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    /// Fraction of the remaining penetration removed per contact.
    pub percent: Scalar,
    /// Penetration tolerated before any correction is applied.
    pub slop: Scalar,
}

impl Correction {
    pub const NONE: Correction = Correction {
        percent: Scalar::ZERO,
        slop: Scalar::ZERO,
    };
}

/// Contact normal: perpendicular of `b`'s edge nearest the contact point,
/// flipped to agree with the MTV axis (pointing from `a` towards `b`).
///
/// Falls back to the MTV axis when that edge is degenerate or runs
/// side-on to the axis (`|n · axis| < MIN_NORMAL_ALIGNMENT`).
pub fn contact_normal(b: &Body, mtv: &Mtv) -> Vector2 {
    let normal = b.polygon().edge_at_point(mtv.point).perpendicular().normalize();
    let alignment = normal.dot(mtv.axis);
    if alignment.abs() < Scalar(MIN_NORMAL_ALIGNMENT) {
        return mtv.axis;
    }
    if alignment < Scalar::ZERO {
        -normal
    } else {
        normal
    }
}

/// Resolves one contact between `a` and `b`.
///
/// Returns the impulse magnitude, or `None` when nothing was applied (both
/// bodies immovable, or already separating along the normal). `a` is the
/// receiving body: its force accumulators are zeroed once resolved.
pub fn apply_impulse(
    a: &mut Body,
    b: &mut Body,
    mtv: &Mtv,
    angular: bool,
    correction: Correction,
) -> Option<Scalar> {
    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    if inv_mass_a + inv_mass_b == Scalar::ZERO {
        return None;
    }

    let normal = contact_normal(b, mtv);
    let (r_a, r_b) = if angular {
        (mtv.point - a.center(), mtv.point - b.center())
    } else {
        (Vector2::ZERO, Vector2::ZERO)
    };

    let velocity_a = a.velocity + Vector2::cross_scalar(a.angular_velocity, r_a);
    let velocity_b = b.velocity + Vector2::cross_scalar(b.angular_velocity, r_b);
    let closing = (velocity_b - velocity_a).dot(normal);

    // Positive along a→b means b is already moving away from a.
    if closing > Scalar::ZERO {
        return None;
    }

    let inv_inertia_a = a.inverse_inertia();
    let inv_inertia_b = b.inverse_inertia();
    // Zero arms collapse this to the linear form.
    let arm_a = r_a.cross(normal);
    let arm_b = r_b.cross(normal);
    let denominator =
        inv_mass_a + inv_mass_b + arm_a * arm_a * inv_inertia_a + arm_b * arm_b * inv_inertia_b;

    let restitution = a.restitution.min(b.restitution);
    let j = -(Scalar::ONE + restitution) * closing / denominator;
    let impulse = normal * j;

    if !a.is_mass_infinite() {
        a.velocity -= impulse * inv_mass_a;
        a.angular_velocity -= r_a.cross(impulse) * inv_inertia_a;
    }
    if !b.is_mass_infinite() {
        b.velocity += impulse * inv_mass_b;
        b.angular_velocity += r_b.cross(impulse) * inv_inertia_b;
    }

    correct_positions(a, b, mtv, inv_mass_a, inv_mass_b, correction);
    a.clear_accumulators();
    Some(j)
}

fn correct_positions(
    a: &mut Body,
    b: &mut Body,
    mtv: &Mtv,
    inv_mass_a: Scalar,
    inv_mass_b: Scalar,
    correction: Correction,
) {
    let depth = (mtv.overlap - correction.slop).max(Scalar::ZERO);
    if depth == Scalar::ZERO || correction.percent == Scalar::ZERO {
        return;
    }
    let push = mtv.axis * (depth * correction.percent / (inv_mass_a + inv_mass_b));
    if !a.is_mass_infinite() {
        a.set_position(a.position() - push * inv_mass_a);
    }
    if !b.is_mass_infinite() {
        b.set_position(b.position() + push * inv_mass_b);
    }
}
