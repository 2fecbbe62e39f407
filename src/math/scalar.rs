//! Tolerant floating-point scalar.
//!
//! Every comparison in the simulation goes through [`Scalar`], so overlap
//! tests, infinite-mass checks and distance floors all share one notion of
//! "equal": two values compare equal when they differ by less than
//! [`EPSILON`]. Arithmetic is plain IEEE `f32` arithmetic; dividing by an
//! exact zero yields infinity or NaN rather than an error.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Absolute tolerance used by [`Scalar`] equality and ordering.
pub const EPSILON: f32 = 1e-6;

/// A float-backed number whose equality absorbs floating-point drift.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(pub f32);

impl Scalar {
    pub const ZERO: Scalar = Scalar(0.0);
    pub const ONE: Scalar = Scalar(1.0);
    pub const MAX: Scalar = Scalar(f32::MAX);
    pub const MIN: Scalar = Scalar(f32::MIN);
    pub const PI: Scalar = Scalar(std::f32::consts::PI);

    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        Self(self.0.sqrt())
    }

    #[inline]
    pub fn sin(self) -> Self {
        Self(self.0.sin())
    }

    #[inline]
    pub fn cos(self) -> Self {
        Self(self.0.cos())
    }

    #[inline]
    pub fn min(self, other: impl Into<Scalar>) -> Self {
        Self(self.0.min(other.into().0))
    }

    #[inline]
    pub fn max(self, other: impl Into<Scalar>) -> Self {
        Self(self.0.max(other.into().0))
    }

    #[inline]
    pub fn clamp(self, min: impl Into<Scalar>, max: impl Into<Scalar>) -> Self {
        self.max(min).min(max)
    }

    /// Degrees to radians.
    #[inline]
    pub fn radians(self) -> Self {
        Self(self.0.to_radians())
    }

    /// Radians to degrees.
    #[inline]
    pub fn degrees(self) -> Self {
        Self(self.0.to_degrees())
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f32> for Scalar {
    #[inline]
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl From<Scalar> for f32 {
    #[inline]
    fn from(value: Scalar) -> Self {
        value.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ── Comparison ────────────────────────────────────────────────────────────────

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        (self.0 - other.0).abs() < EPSILON
    }
}

impl PartialEq<f32> for Scalar {
    #[inline]
    fn eq(&self, other: &f32) -> bool {
        *self == Scalar(*other)
    }
}

impl PartialOrd for Scalar {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else {
            self.0.partial_cmp(&other.0)
        }
    }
}

impl PartialOrd<f32> for Scalar {
    #[inline]
    fn partial_cmp(&self, other: &f32) -> Option<Ordering> {
        self.partial_cmp(&Scalar(*other))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

macro_rules! scalar_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Scalar {
            type Output = Scalar;
            #[inline]
            fn $method(self, rhs: Scalar) -> Scalar {
                Scalar(self.0 $op rhs.0)
            }
        }

        impl $trait<f32> for Scalar {
            type Output = Scalar;
            #[inline]
            fn $method(self, rhs: f32) -> Scalar {
                Scalar(self.0 $op rhs)
            }
        }

        impl $trait<Scalar> for f32 {
            type Output = Scalar;
            #[inline]
            fn $method(self, rhs: Scalar) -> Scalar {
                Scalar(self $op rhs.0)
            }
        }

        impl $assign_trait for Scalar {
            #[inline]
            fn $assign_method(&mut self, rhs: Scalar) {
                self.0 = self.0 $op rhs.0;
            }
        }

        impl $assign_trait<f32> for Scalar {
            #[inline]
            fn $assign_method(&mut self, rhs: f32) {
                self.0 = self.0 $op rhs;
            }
        }
    };
}

scalar_binop!(Add, add, AddAssign, add_assign, +);
scalar_binop!(Sub, sub, SubAssign, sub_assign, -);
scalar_binop!(Mul, mul, MulAssign, mul_assign, *);
scalar_binop!(Div, div, DivAssign, div_assign, /);

impl Neg for Scalar {
    type Output = Scalar;
    #[inline]
    fn neg(self) -> Scalar {
        Scalar(-self.0)
    }
}

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Scalar {
        iter.fold(Scalar::ZERO, |acc, s| acc + s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_absorbs_drift_below_epsilon() {
        let a = Scalar(0.1) + Scalar(0.2);
        assert_eq!(a, Scalar(0.3));
        assert_eq!(Scalar(1.0), Scalar(1.0 + EPSILON * 0.5));
    }

    #[test]
    fn equality_rejects_differences_above_epsilon() {
        assert_ne!(Scalar(1.0), Scalar(1.0 + EPSILON * 10.0));
    }

    #[test]
    fn ordering_treats_near_values_as_equal() {
        let a = Scalar(0.0);
        let b = Scalar(EPSILON * 0.5);
        assert!(a <= b && a >= b, "values within epsilon must order as equal");
        assert!(Scalar(-1.0) < Scalar::ZERO);
        assert!(Scalar(2.0) > 1.0);
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        let inf = Scalar(1.0) / Scalar::ZERO;
        assert!(!inf.is_finite());
        assert!((Scalar::ZERO / Scalar::ZERO).0.is_nan());
    }

    #[test]
    fn mixed_f32_arithmetic() {
        let mut s = Scalar(3.0);
        s *= 2.0;
        s -= Scalar(1.0);
        assert_eq!(s, 5.0);
        assert_eq!(2.0 * Scalar(4.0), Scalar(8.0));
    }

    #[test]
    fn clamp_and_angle_conversion() {
        assert_eq!(Scalar(150.0).clamp(0.0, 100.0), Scalar(100.0));
        assert_eq!(Scalar(180.0).radians(), Scalar::PI);
        assert!((Scalar::PI.degrees().0 - 180.0).abs() < 1e-4);
    }
}
