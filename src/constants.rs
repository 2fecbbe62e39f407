//! Centralised simulation constants.
//!
//! Every tuneable lives here and is mirrored by a field of
//! [`crate::config::EngineConfig`], whose `Default` reads these values.
//! `assets/engine.toml` can override any subset without recompiling.

// ── Timing ────────────────────────────────────────────────────────────────────

/// Logical simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Divisor applied to the tick length. Raising it shortens each tick without
/// adding sub-steps: one host frame still drives at most one tick.
pub const ITERATIONS: u32 = 1;

/// Multiplier on simulated time per tick. 2.0 runs twice as fast, at the cost
/// of larger integration steps.
pub const SPEED: f32 = 1.0;

// ── Integration ───────────────────────────────────────────────────────────────

/// Multiplicative velocity and angular-velocity damping applied every tick.
///
/// Tested range: 0.99–1.0. 1.0 disables damping entirely.
pub const DAMPING: f32 = 0.995;

/// Mass at or above which a body is immovable. Non-positive mass is also
/// treated as infinite.
pub const INFINITE_MASS: f32 = 1e10;

// ── Forces ────────────────────────────────────────────────────────────────────

/// Uniform gravity acceleration, in world units per second squared.
pub const GRAVITY_MAGNITUDE: f32 = 100.0;

/// Newtonian gravitational constant.
///
/// Attraction only becomes visible between bodies of roughly 1e17 kg or more.
pub const GRAVITATIONAL_CONSTANT: f32 = 6.674_30e-11;

/// Distance floor used in the inverse-square attraction to avoid
/// singularities at contact range.
pub const MIN_ATTRACTION_DISTANCE: f32 = 100.0;

/// Velocity damping factor inside the spring force.
pub const SPRING_DAMPING: f32 = 0.5;

/// Spring constant of the cursor-follow spring.
pub const CURSOR_SPRING_CONSTANT: f32 = 50.0;

/// Rest length of the cursor-follow spring.
pub const CURSOR_REST_LENGTH: f32 = 0.0;

/// Cursor attraction strength; the cursor acts as a point mass of
/// `strength * CURSOR_MASS_SCALE`.
pub const CURSOR_STRENGTH: f32 = 1.0;
pub const CURSOR_MASS_SCALE: f32 = 1e15;

// ── Collision ─────────────────────────────────────────────────────────────────

/// Squared length below which an axis is degenerate: SAT skips it and
/// projection returns the neutral interval. Matches the length at which
/// `Vector2::normalize` gives up (`EPSILON`).
pub const DEGENERATE_AXIS_SQR: f32 = 1e-12;

/// Smallest `|normal · axis|` for which the contact normal taken from the
/// second body's nearest edge is used. Below it the edge is side-on to the
/// separating axis and the MTV axis is used instead.
pub const MIN_NORMAL_ALIGNMENT: f32 = 0.5;

/// Whether collision impulses also change angular velocity. Off by default:
/// the contact point is a coarse estimate and its moment arms can reach
/// outside both bodies.
pub const ANGULAR_IMPULSE: bool = false;

/// Fraction of penetration removed per contact after the impulse.
///
/// 0.0 reproduces a pure impulse response (bodies may sink under gravity).
/// Above ~0.8 resting stacks start to jitter.
pub const POSITION_CORRECTION: f32 = 0.2;

/// Penetration depth left uncorrected to keep resting contacts stable.
pub const PENETRATION_SLOP: f32 = 0.01;

// ── Broad phase ───────────────────────────────────────────────────────────────

/// Cell size of the optional spatial grid broad phase (world units).
///
/// Should be close to the typical body diameter; much smaller cells make
/// large bodies register in many cells.
pub const GRID_CELL_SIZE: f32 = 100.0;

// ── Emitter defaults ──────────────────────────────────────────────────────────

pub const EMITTER_MIN_LIFETIME: f32 = 1.0;
pub const EMITTER_MAX_LIFETIME: f32 = 5.0;
pub const EMITTER_MIN_VELOCITY: f32 = -100.0;
pub const EMITTER_MAX_VELOCITY: f32 = 100.0;

/// Lifetime value marking a body as immortal.
pub const IMMORTAL: f32 = -1.0;

// ── Host window ───────────────────────────────────────────────────────────────

/// Simulation space spans the window: `(0, 0)` top-left to
/// `(WINDOW_WIDTH, WINDOW_HEIGHT)` bottom-right.
pub const WINDOW_WIDTH: f32 = 1000.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
