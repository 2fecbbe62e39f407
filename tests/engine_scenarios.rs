//! End-to-end scenarios driven through the public [`Engine`] API.
//!
//! Covered scenarios:
//! 1. A box dropped onto a static platform bounces (vertical velocity flips).
//! 2. Two runs with the same seed and frame deltas produce identical state.
//! 3. Mortal bodies are reaped once their lifetime elapses; immortal ones stay.
//! 4. An elastic head-on collision conserves linear momentum.

use rigid2d::body::{Body, BodyCapabilities, BodyId};
use rigid2d::config::EngineConfig;
use rigid2d::engine::Engine;
use rigid2d::math::{Scalar, Vector2};
use rigid2d::shapes;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Default platform-and-box scene without the emitter.
fn drop_scene() -> Engine {
    let mut engine = Engine::from_config(EngineConfig {
        emitters: Vec::new(),
        ..EngineConfig::default()
    })
    .unwrap();
    engine.initialize().unwrap();
    engine
}

fn box_body(mass: f32, position: Vector2) -> Body {
    Body::new(BodyId(0), shapes::rectangle(20.0, 20.0).unwrap(), mass, position).unwrap()
}

// ── Bounce ────────────────────────────────────────────────────────────────────

#[test]
fn dropped_box_bounces_off_static_platform() {
    let mut engine = drop_scene();
    let box_id = engine.bodies()[1].id();
    let platform_id = engine.bodies()[0].id();

    let mut peak_fall_speed = Scalar::ZERO;
    let mut bounced = false;
    for _ in 0..600 {
        let before = engine.body(box_id).unwrap().velocity.y;
        engine.step();
        let after = engine.body(box_id).unwrap().velocity.y;
        peak_fall_speed = peak_fall_speed.max(before);

        if before > Scalar::ZERO && after < Scalar::ZERO {
            bounced = true;
            assert!(
                after.abs() <= peak_fall_speed,
                "rebound {after} exceeds impact speed {peak_fall_speed}"
            );
            break;
        }
    }

    assert!(bounced, "box never bounced off the platform");
    let platform = engine.body(platform_id).unwrap();
    assert_eq!(platform.position(), Vector2::new(400.0, 400.0));
    assert_eq!(platform.velocity, Vector2::ZERO);
}

#[test]
fn box_stays_above_platform() {
    let mut engine = drop_scene();
    let box_id = engine.bodies()[1].id();
    for _ in 0..900 {
        engine.step();
        let bottom = engine
            .body(box_id)
            .unwrap()
            .polygon()
            .transformed_vertices()
            .iter()
            .map(|v| v.y)
            .fold(Scalar::MIN, |acc, y| acc.max(y));
        // Platform top is y = 400; allow a few units of transient overlap.
        assert!(bottom < Scalar(415.0), "box sank to {bottom}");
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn identical_inputs_give_identical_trajectories() {
    let run = || {
        let mut engine = Engine::from_config(EngineConfig {
            rng_seed: Some(1234),
            ..EngineConfig::default()
        })
        .unwrap();
        engine.initialize().unwrap();
        for frame in 0..400 {
            // Uneven frame times, same sequence each run.
            let dt = if frame % 3 == 0 { 0.025 } else { 0.012 };
            engine.update(dt);
        }
        engine
            .bodies()
            .iter()
            .map(|b| {
                let p = b.position();
                (b.id(), p.x.0.to_bits(), p.y.0.to_bits(), b.rotation().0.to_bits())
            })
            .collect::<Vec<_>>()
    };

    let first = run();
    let second = run();
    assert!(first.len() > 2, "emitter should have spawned bodies");
    assert_eq!(first, second);
}

// ── Lifetime ──────────────────────────────────────────────────────────────────

#[test]
fn mortal_bodies_are_reaped_and_immortal_ones_kept() {
    let mut engine = Engine::from_config(EngineConfig::empty()).unwrap();
    let mortal = engine.add_body(box_body(1.0, Vector2::new(100.0, 100.0)).with_lifetime(2.0));
    let immortal =
        engine.add_body(box_body(1.0, Vector2::new(300.0, 100.0)).with_lifetime(-1.0));

    while engine.runtime() < Scalar(1.9) {
        engine.step();
    }
    assert!(engine.body(mortal).is_some(), "reaped too early");

    while engine.runtime() < Scalar(2.1) {
        engine.step();
    }
    assert!(engine.body(mortal).is_none(), "not reaped after lifetime");
    assert!(engine.body(immortal).is_some());

    for _ in 0..10_000 {
        engine.step();
    }
    assert!(engine.body(immortal).is_some());
}

// ── Conservation ──────────────────────────────────────────────────────────────

#[test]
fn elastic_collision_conserves_momentum_through_engine() {
    let mut engine = Engine::from_config(EngineConfig {
        damping: 1.0,
        position_correction: 0.0,
        ..EngineConfig::empty()
    })
    .unwrap();
    let left = engine.add_body(
        box_body(4.0, Vector2::new(100.0, 100.0))
            .with_velocity(Vector2::new(120.0, 0.0))
            .with_capabilities(BodyCapabilities::NONE),
    );
    let right = engine.add_body(
        box_body(2.0, Vector2::new(160.0, 100.0)).with_velocity(Vector2::new(-60.0, 0.0)),
    );

    let momentum = |engine: &Engine| {
        let a = engine.body(left).unwrap();
        let b = engine.body(right).unwrap();
        a.velocity * a.mass() + b.velocity * b.mass()
    };
    let before = momentum(&engine);

    for _ in 0..60 {
        engine.step();
    }

    let after = momentum(&engine);
    assert!(
        after.distance(before).0 < 0.05,
        "momentum drifted from {before} to {after}"
    );
    // They did collide: the lighter body now moves right.
    assert!(engine.body(right).unwrap().velocity.x > Scalar::ZERO);
}
