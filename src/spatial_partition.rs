//! Uniform grid broad phase.
//!
//! Bodies are bucketed by every cell their bounding circle touches, so two
//! bodies can only collide if they share a cell. The grid is a conservative
//! over-approximation: callers still run the exact SAT test on each candidate.
//!
//! ## Cell Size Choice
//!
//! Cell size (`grid_cell_size` in the engine config) should be on the order
//! of the typical body diameter. Much smaller cells insert each body into
//! many buckets; much larger ones degrade back towards all-pairs.

use crate::body::Body;
use crate::math::{Scalar, Vector2};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    /// Map from cell coordinates to body indices.
    cells: HashMap<(i32, i32), Vec<usize>>,
    /// Bounding circle per body index, as of the last rebuild.
    bounds: Vec<(Vector2, Scalar)>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            bounds: Vec::new(),
        }
    }

    /// Compute grid cell coordinates for a world position
    fn world_to_cell(&self, pos: Vector2) -> (i32, i32) {
        let x = (pos.x.0 / self.cell_size).floor() as i32;
        let y = (pos.y.0 / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Inclusive cell range covered by a circle's bounding box.
    fn cell_span(&self, center: Vector2, radius: Scalar) -> ((i32, i32), (i32, i32)) {
        let extent = Vector2::from_scalars(radius, radius);
        (
            self.world_to_cell(center - extent),
            self.world_to_cell(center + extent),
        )
    }

    /// Clear all grid data (call before each rebuild)
    pub fn clear(&mut self) {
        // Retain allocations but clear contents to avoid re-allocating Vec capacity
        for v in self.cells.values_mut() {
            v.clear();
        }
        self.cells.retain(|_, v| !v.is_empty());
        self.bounds.clear();
    }

    /// Insert body `index` into every cell its bounding circle touches.
    /// Indices must be inserted densely from zero after `clear()`.
    pub fn insert(&mut self, index: usize, center: Vector2, radius: Scalar) {
        let ((x0, y0), (x1, y1)) = self.cell_span(center, radius);
        for x in x0..=x1 {
            for y in y0..=y1 {
                self.cells.entry((x, y)).or_default().push(index);
            }
        }
        if self.bounds.len() <= index {
            self.bounds.resize(index + 1, (Vector2::ZERO, Scalar::ZERO));
        }
        self.bounds[index] = (center, radius);
    }

    /// Rebuilds the grid from the current body poses.
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.clear();
        for (index, body) in bodies.iter().enumerate() {
            let (center, radius) = bounding_circle(body);
            self.insert(index, center, radius);
        }
    }

    /// Every other body sharing at least one cell with `index`, ascending
    /// and without duplicates.
    pub fn candidates(&self, index: usize) -> Vec<usize> {
        let Some(&(center, radius)) = self.bounds.get(index) else {
            return Vec::new();
        };
        let ((x0, y0), (x1, y1)) = self.cell_span(center, radius);

        let mut found = Vec::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                if let Some(indices) = self.cells.get(&(x, y)) {
                    found.extend(indices.iter().copied().filter(|&i| i != index));
                }
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// World-space bounding circle about the body's centre of mass.
pub fn bounding_circle(body: &Body) -> (Vector2, Scalar) {
    let center = body.center();
    let radius = body
        .polygon()
        .transformed_vertices()
        .into_iter()
        .map(|v| v.distance(center))
        .fold(Scalar::ZERO, |acc, d| acc.max(d));
    (center, radius)
}
