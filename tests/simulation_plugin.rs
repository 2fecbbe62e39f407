//! Headless tests for [`SimulationPlugin`].
//!
//! These use [`MinimalPlugins`] (no window, no rendering) so they run fast in
//! CI. The plugin's startup chain reads `assets/engine.toml` from the crate
//! root, which `cargo test` uses as the working directory.

use bevy::prelude::*;
use rigid2d::config::EngineConfig;
use rigid2d::engine::Engine;
use rigid2d::simulation::SimulationPlugin;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin));
    app
}

// ── Startup ───────────────────────────────────────────────────────────────────

#[test]
fn startup_inserts_config_and_engine() {
    let mut app = headless_app();
    app.update();

    assert!(app.world().get_resource::<EngineConfig>().is_some());
    let engine = app.world().resource::<Engine>();
    assert!(
        engine.bodies().len() >= 2,
        "platform and box from the shipped scene"
    );
}

#[test]
fn shipped_config_file_replaces_preinserted_resource() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(EngineConfig::empty())
        .add_plugins(SimulationPlugin);
    app.update();

    let config = app.world().resource::<EngineConfig>();
    assert!(config.validate().is_ok());
    assert!(!config.bodies.is_empty(), "assets/engine.toml defines a scene");
}

// ── Update ────────────────────────────────────────────────────────────────────

#[test]
fn engine_keeps_running_across_frames() {
    let mut app = headless_app();
    for _ in 0..5 {
        app.update();
    }
    let engine = app.world().resource::<Engine>();
    // Wall-clock frames in a test are short; only check the loop stayed sane.
    assert!(engine.runtime() >= 0.0);
    assert!(engine.bodies().iter().all(|b| b.position().is_finite()));
}
