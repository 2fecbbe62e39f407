//! Simulation error types.
//!
//! Only construction and setup can fail: building polygons and bodies,
//! computing inertia, loading configuration. A running tick never returns an
//! error; numerical edge cases inside the tick are recovered locally (zero
//! vector on normalize, distance floors, neutral projections).
//!
//! ## Usage
//!
//! ```rust
//! use rigid2d::error::{SimError, SimResult};
//! use rigid2d::math::Vector2;
//! use rigid2d::polygon::Polygon;
//!
//! fn build() -> SimResult<Polygon> {
//!     Polygon::new(vec![Vector2::ZERO, Vector2::new(10.0, 0.0), Vector2::new(0.0, 10.0)])
//! }
//! assert!(build().is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the simulator.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A polygon routine (area, centroid, inertia) received too few vertices.
    InvalidGeometry {
        /// Actual vertex count provided.
        vertex_count: usize,
        /// Minimum required.
        required: usize,
    },

    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// The configuration file could not be read.
    ConfigIo { path: String, message: String },

    /// The configuration file is not valid TOML for [`crate::config::EngineConfig`].
    ConfigParse { message: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidGeometry {
                vertex_count,
                required,
            } => write!(
                f,
                "polygon vertex count too low: got {}, need at least {}",
                vertex_count, required
            ),
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::ConfigIo { path, message } => {
                write!(f, "cannot read config '{}': {}", path, message)
            }
            SimError::ConfigParse { message } => write!(f, "invalid config: {}", message),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `vertex_count` reaches the triangle minimum.
pub fn require_polygon(vertex_count: usize) -> SimResult<()> {
    const REQUIRED: usize = 3;
    if vertex_count < REQUIRED {
        Err(SimError::InvalidGeometry {
            vertex_count,
            required: REQUIRED,
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `value` is not strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> SimResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if `value` lies outside `[0, 1]`.
pub fn validate_unit_interval(name: &'static str, value: f32) -> SimResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

/// Returns an error if `damping` lies outside `(0, 1]`.
///
/// Zero would freeze every body on its first tick; above one adds energy.
pub fn validate_damping(value: f32) -> SimResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "damping",
            value,
            safe_range: "(0.0, 1.0]",
        })
    }
}

/// Returns an error if a `[min, max)` range is inverted.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> SimResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value: min,
            safe_range: "min <= max",
        })
    }
}
