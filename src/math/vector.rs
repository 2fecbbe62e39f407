//! 2D vector over [`Scalar`] components.
//!
//! Simulation space is Y-down (screen convention): [`Vector2::DOWN`] is
//! `(0, 1)`. Equality inherits the [`Scalar`] tolerance component-wise.

use super::scalar::Scalar;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: Scalar,
    pub y: Scalar,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);
    pub const UP: Vector2 = Vector2::new(0.0, -1.0);
    pub const DOWN: Vector2 = Vector2::new(0.0, 1.0);
    pub const RIGHT: Vector2 = Vector2::new(1.0, 0.0);
    pub const LEFT: Vector2 = Vector2::new(-1.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x: Scalar(x),
            y: Scalar(y),
        }
    }

    #[inline]
    pub const fn from_scalars(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vector2) -> Scalar {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross).
    #[inline]
    pub fn cross(self, other: Vector2) -> Scalar {
        self.x * other.y - self.y * other.x
    }

    /// `ω × r` for a scalar angular velocity `ω` about the z axis.
    #[inline]
    pub fn cross_scalar(omega: Scalar, r: Vector2) -> Vector2 {
        Vector2::from_scalars(-omega * r.y, omega * r.x)
    }

    #[inline]
    pub fn sqr_magnitude(self) -> Scalar {
        self.dot(self)
    }

    #[inline]
    pub fn magnitude(self) -> Scalar {
        self.sqr_magnitude().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vector2) -> Scalar {
        (self - other).magnitude()
    }

    #[inline]
    pub fn distance_sqr(self, other: Vector2) -> Scalar {
        (self - other).sqr_magnitude()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[inline]
    pub fn normalize(self) -> Vector2 {
        let magnitude = self.magnitude();
        if magnitude == Scalar::ZERO {
            return Vector2::ZERO;
        }
        self / magnitude
    }

    #[inline]
    pub fn with_magnitude(self, magnitude: impl Into<Scalar>) -> Vector2 {
        self.normalize() * magnitude.into()
    }

    /// Rotates 90°: `(x, y) -> (y, -x)`.
    #[inline]
    pub fn perpendicular(self) -> Vector2 {
        Vector2::from_scalars(self.y, -self.x)
    }

    #[inline]
    pub fn lerp(self, target: Vector2, t: impl Into<Scalar>) -> Vector2 {
        self + (target - self) * t.into()
    }

    /// Component-wise clamp.
    #[inline]
    pub fn clamp(self, min: Vector2, max: Vector2) -> Vector2 {
        Vector2::from_scalars(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    /// Rotates counter-clockwise (in Y-up terms) by `angle` radians.
    #[inline]
    pub fn rotate(self, angle: impl Into<Scalar>) -> Vector2 {
        let angle = angle.into();
        let (sin, cos) = (angle.sin(), angle.cos());
        Vector2::from_scalars(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    pub fn abs(self) -> Vector2 {
        Vector2::from_scalars(self.x.abs(), self.y.abs())
    }

    #[inline]
    pub fn mul_elem(self, other: Vector2) -> Vector2 {
        Vector2::from_scalars(self.x * other.x, self.y * other.y)
    }

    #[inline]
    pub fn div_elem(self, other: Vector2) -> Vector2 {
        Vector2::from_scalars(self.x / other.x, self.y / other.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f32, f32)> for Vector2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Vector2::new(x, y)
    }
}

impl From<Vec2> for Vector2 {
    #[inline]
    fn from(v: Vec2) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    #[inline]
    fn from(v: Vector2) -> Self {
        Vec2::new(v.x.0, v.y.0)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Add for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::from_scalars(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::from_scalars(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::from_scalars(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector2) {
        *self = *self - rhs;
    }
}

impl Mul<Scalar> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Scalar) -> Vector2 {
        Vector2::from_scalars(self.x * rhs, self.y * rhs)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f32) -> Vector2 {
        self * Scalar(rhs)
    }
}

impl Mul<Vector2> for Scalar {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * self
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs * Scalar(self)
    }
}

impl MulAssign<Scalar> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl MulAssign<f32> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<Scalar> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: Scalar) -> Vector2 {
        Vector2::from_scalars(self.x / rhs, self.y / rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: f32) -> Vector2 {
        self / Scalar(rhs)
    }
}

impl Sum for Vector2 {
    fn sum<I: Iterator<Item = Vector2>>(iter: I) -> Vector2 {
        iter.fold(Vector2::ZERO, |acc, v| acc + v)
    }
}
