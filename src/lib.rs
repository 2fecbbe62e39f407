//! 2D rigid-body physics engine
//!
//! Convex polygon bodies advance on a fixed time step under gravity, pairwise
//! attraction and cursor forces. Collisions are detected with the Separating
//! Axis Theorem and resolved with restitution-weighted impulses.
//!
//! The core ([`engine::Engine`] and everything below it) is plain Rust state
//! with no ECS dependency; [`simulation::SimulationPlugin`] wraps it as a Bevy
//! resource driven once per frame.

pub mod body;
pub mod collision;
pub mod config;
pub mod constants;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod forces;
pub mod impulse;
pub mod math;
pub mod polygon;
pub mod shapes;
pub mod simulation;
pub mod spatial_partition;
