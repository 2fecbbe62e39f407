//! Scalar and vector math shared by every simulation module.

mod scalar;
mod vector;

pub use scalar::{Scalar, EPSILON};
pub use vector::Vector2;
