//! Convex polygon with an immutable local shape and a mutable world pose.
//!
//! Local vertices never change after construction. The world-space shape is
//! recomputed on demand from `(vertices, position, rotation, pivot)`:
//! each vertex is rotated about the pivot, then translated by the position.
//! Nothing is cached because the pose can change several times within a tick.
//!
//! Convexity is not checked. Concave input produces meaningless SAT results.

use crate::constants::DEGENERATE_AXIS_SQR;
use crate::error::{require_polygon, SimResult};
use crate::math::{Scalar, Vector2};

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2>,
    centroid: Vector2,
    position: Vector2,
    /// Radians.
    rotation: Scalar,
    pivot: Vector2,
}

impl Polygon {
    /// Builds a polygon from local-space vertices wound consistently.
    ///
    /// The pivot defaults to the centroid.
    pub fn new(vertices: Vec<Vector2>) -> SimResult<Self> {
        require_polygon(vertices.len())?;
        let centroid = mean(&vertices);
        Ok(Self {
            vertices,
            centroid,
            position: Vector2::ZERO,
            rotation: Scalar::ZERO,
            pivot: centroid,
        })
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    /// Current rotation in radians.
    #[inline]
    pub fn rotation(&self) -> Scalar {
        self.rotation
    }

    #[inline]
    pub fn pivot(&self) -> Vector2 {
        self.pivot
    }

    /// Sets position and rotation (radians) in one call, keeping the pivot.
    #[inline]
    pub fn set_pose(&mut self, position: Vector2, rotation: Scalar) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Sets the rotation from degrees. `None` pivots about the centroid;
    /// `Some(p)` pivots about local point `p`, including the origin.
    pub fn rotate(&mut self, angle_degrees: impl Into<Scalar>, pivot: Option<Vector2>) {
        self.rotation = angle_degrees.into().radians();
        self.pivot = pivot.unwrap_or(self.centroid);
    }

    /// Arithmetic mean of the local vertices.
    #[inline]
    pub fn centroid(&self) -> Vector2 {
        self.centroid
    }

    /// Centroid after the current pose is applied.
    pub fn world_centroid(&self) -> Vector2 {
        let (sin, cos) = (self.rotation.sin(), self.rotation.cos());
        self.transform(self.centroid, sin, cos)
    }

    /// Largest local vertex magnitude.
    pub fn radius(&self) -> Scalar {
        self.vertices
            .iter()
            .map(|v| v.magnitude())
            .fold(Scalar::ZERO, |acc, m| acc.max(m))
    }

    /// Shoelace area of the local shape.
    pub fn area(&self) -> Scalar {
        polygon_area(&self.vertices)
    }

    #[inline]
    fn transform(&self, vertex: Vector2, sin: Scalar, cos: Scalar) -> Vector2 {
        let local = vertex - self.pivot;
        let rotated = Vector2::from_scalars(
            local.x * cos - local.y * sin,
            local.x * sin + local.y * cos,
        );
        rotated + self.pivot + self.position
    }

    /// World-space vertices: rotate about the pivot, then translate.
    pub fn transformed_vertices(&self) -> Vec<Vector2> {
        let (sin, cos) = (self.rotation.sin(), self.rotation.cos());
        self.vertices
            .iter()
            .map(|&v| self.transform(v, sin, cos))
            .collect()
    }

    /// One unit normal per world-space edge; the SAT candidate axes.
    pub fn axes(&self) -> Vec<Vector2> {
        let world = self.transformed_vertices();
        let n = world.len();
        (0..n)
            .map(|i| {
                let edge = world[(i + 1) % n] - world[i];
                Vector2::from_scalars(-edge.y, edge.x).normalize()
            })
            .collect()
    }

    /// Interval of the world-space vertices projected onto `axis`.
    ///
    /// A near-zero axis yields the neutral interval `(0, 0)`.
    pub fn project(&self, axis: Vector2) -> (Scalar, Scalar) {
        project_vertices(&self.transformed_vertices(), axis)
    }

    /// Edge vector (not normalized) of the world-space edge closest to `point`.
    pub fn edge_at_point(&self, point: Vector2) -> Vector2 {
        let world = self.transformed_vertices();
        let n = world.len();
        let mut min_dist_sq = Scalar::MAX;
        let mut edge = Vector2::ZERO;

        for i in 0..n {
            let v1 = world[i];
            let v2 = world[(i + 1) % n];
            let line = v2 - v1;
            let length_sq = line.sqr_magnitude();

            let t = if length_sq == Scalar::ZERO {
                Scalar::ZERO
            } else {
                ((point - v1).dot(line) / length_sq).clamp(0.0, 1.0)
            };
            let closest = v1 + line * t;
            let dist_sq = point.distance_sqr(closest);

            if dist_sq < min_dist_sq {
                min_dist_sq = dist_sq;
                edge = line;
            }
        }

        edge
    }
}

/// Projects already-transformed vertices onto `axis`.
pub(crate) fn project_vertices(world: &[Vector2], axis: Vector2) -> (Scalar, Scalar) {
    if is_degenerate_axis(axis) {
        return (Scalar::ZERO, Scalar::ZERO);
    }
    let axis = axis.normalize();
    world
        .iter()
        .map(|v| v.dot(axis))
        .fold((Scalar::MAX, Scalar::MIN), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

/// Raw comparison: tolerant `Scalar` ordering would swallow a threshold this small.
#[inline]
pub(crate) fn is_degenerate_axis(axis: Vector2) -> bool {
    axis.sqr_magnitude().0 < DEGENERATE_AXIS_SQR
}

fn mean(vertices: &[Vector2]) -> Vector2 {
    vertices.iter().copied().sum::<Vector2>() / vertices.len() as f32
}

fn polygon_area(vertices: &[Vector2]) -> Scalar {
    let n = vertices.len();
    let twice: Scalar = (0..n)
        .map(|i| vertices[(i + n - 1) % n].cross(vertices[i]))
        .sum();
    (twice / 2.0).abs()
}

/// Moment of inertia about the centroid for a polygon of uniform density.
///
/// Fan-triangulates from vertex 0, gives each triangle mass proportional to
/// its area, takes each triangle's centroidal moment `m(a² + b² + c²) / 36`
/// and shifts it to the polygon centroid with the parallel-axis theorem.
/// A zero-area polygon has zero inertia.
pub fn calculate_moment_of_inertia(vertices: &[Vector2], mass: Scalar) -> SimResult<Scalar> {
    require_polygon(vertices.len())?;

    let centroid = mean(vertices);
    let total_area = polygon_area(vertices);
    if total_area == Scalar::ZERO {
        return Ok(Scalar::ZERO);
    }

    let mut total = Scalar::ZERO;
    for i in 1..vertices.len() - 1 {
        let (p0, p1, p2) = (vertices[0], vertices[i], vertices[i + 1]);

        let area = (p1 - p0).cross(p2 - p0).abs() / 2.0;
        let tri_mass = mass * (area / total_area);
        let tri_centroid = (p0 + p1 + p2) / 3.0;

        let tri_moment = if tri_mass <= Scalar::ZERO {
            Scalar::ZERO
        } else {
            let a = p0.distance_sqr(p1);
            let b = p1.distance_sqr(p2);
            let c = p2.distance_sqr(p0);
            tri_mass * (a + b + c) / 36.0
        };

        total += tri_mass * tri_centroid.distance_sqr(centroid) + tri_moment;
    }

    Ok(total)
}
