//! Polygon factories.
//!
//! Rectangles and triangles are laid out from the local origin corner, so a
//! body placed at `position` covers `position .. position + size`. Circles
//! are centred on the local origin.

use crate::error::SimResult;
use crate::math::Vector2;
use crate::polygon::Polygon;
use std::f32::consts::TAU;

pub fn rectangle(width: f32, height: f32) -> SimResult<Polygon> {
    Polygon::new(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(width, 0.0),
        Vector2::new(width, height),
        Vector2::new(0.0, height),
    ])
}

/// Square-bounded triangle with its apex at the top centre.
pub fn triangle(side: f32) -> SimResult<Polygon> {
    iso_triangle(side, side)
}

pub fn iso_triangle(width: f32, height: f32) -> SimResult<Polygon> {
    Polygon::new(vec![
        Vector2::new(width / 2.0, 0.0),
        Vector2::new(width, height),
        Vector2::new(0.0, height),
    ])
}

/// Regular `sides`-gon approximating a circle. Every extra side costs an
/// extra SAT axis per pair test.
pub fn circle(radius: f32, sides: usize) -> SimResult<Polygon> {
    let vertices = (0..sides)
        .map(|i| {
            let angle = TAU * i as f32 / sides as f32;
            Vector2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect();
    Polygon::new(vertices)
}
