//! Separating Axis Theorem collision detection.
//!
//! Both polygons are projected onto every edge normal of either shape. The
//! first axis whose projections do not overlap proves separation; otherwise
//! the axis of least overlap is the minimum translation vector (MTV).
//!
//! Zero-length edges produce degenerate axes, which are skipped rather than
//! read as a separating axis.
//!
//! The contact point is a deliberate approximation: SAT yields depth and
//! direction, not a contact manifold. It is the midpoint of the first vertex
//! of A with the lowest projection on the MTV axis and the first vertex of B
//! with the highest. Only the collision response's edge lookup consumes it.

use crate::math::{Scalar, Vector2};
use crate::polygon::{is_degenerate_axis, project_vertices, Polygon};

/// Minimum translation vector for one overlapping pair. Transient, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    /// Unit separating axis, pointing from the first polygon towards the second.
    pub axis: Vector2,
    /// Penetration depth along `axis`, always positive.
    pub overlap: Scalar,
    /// Estimated contact point in world space.
    pub point: Vector2,
}

/// Tests `a` against `b`, returning `None` when a separating axis exists.
pub fn resolve(a: &Polygon, b: &Polygon) -> Option<Mtv> {
    let world_a = a.transformed_vertices();
    let world_b = b.transformed_vertices();

    let mut min_overlap = Scalar::MAX;
    let mut best_axis = Vector2::ZERO;

    for axis in a.axes().into_iter().chain(b.axes()) {
        if is_degenerate_axis(axis) {
            continue;
        }
        let (min_a, max_a) = project_vertices(&world_a, axis);
        let (min_b, max_b) = project_vertices(&world_b, axis);

        let overlap = (max_a - min_b).min(max_b - min_a);
        if overlap <= Scalar::ZERO {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
    }

    if best_axis == Vector2::ZERO {
        return None;
    }

    let between = b.world_centroid() - a.world_centroid();
    if between.dot(best_axis) < Scalar::ZERO {
        best_axis = -best_axis;
    }

    let lowest_a = support(&world_a, -best_axis);
    let highest_b = support(&world_b, best_axis);

    Some(Mtv {
        axis: best_axis,
        overlap: min_overlap,
        point: (lowest_a + highest_b) * 0.5,
    })
}

/// First vertex that projects furthest along `direction`; later vertices
/// tied within tolerance do not replace it.
fn support(world: &[Vector2], direction: Vector2) -> Vector2 {
    let mut best = Vector2::ZERO;
    let mut best_projection = Scalar::MIN;
    for &vertex in world {
        let projection = vertex.dot(direction);
        if projection > best_projection {
            best = vertex;
            best_projection = projection;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at(center: Vector2, side: f32) -> Polygon {
        let h = side / 2.0;
        Polygon::new(vec![
            Vector2::new(-h, -h),
            Vector2::new(h, -h),
            Vector2::new(h, h),
            Vector2::new(-h, h),
        ])
        .unwrap()
        .with_position(center)
    }

    // ── separation ────────────────────────────────────────────────────────────

    #[test]
    fn squares_with_gap_do_not_collide() {
        let a = square_at(Vector2::new(0.0, 0.0), 10.0);
        let b = square_at(Vector2::new(20.0, 0.0), 10.0);
        assert!(resolve(&a, &b).is_none(), "10 unit gap must separate");
    }

    #[test]
    fn touching_faces_do_not_collide() {
        let a = square_at(Vector2::new(0.0, 0.0), 10.0);
        let b = square_at(Vector2::new(10.0, 0.0), 10.0);
        assert!(resolve(&a, &b).is_none(), "zero overlap counts as separated");
    }

    // ── overlap ───────────────────────────────────────────────────────────────

    #[test]
    fn overlapping_squares_report_depth_and_axis() {
        let a = square_at(Vector2::new(0.0, 0.0), 10.0);
        let b = square_at(Vector2::new(5.0, 0.0), 10.0);
        let mtv = resolve(&a, &b).expect("5 unit overlap must collide");
        assert_eq!(mtv.overlap, Scalar(5.0));
        assert_eq!(mtv.axis.x.abs(), Scalar::ONE);
        assert_eq!(mtv.axis.y, Scalar::ZERO);
    }

    #[test]
    fn axis_points_from_first_towards_second() {
        let a = square_at(Vector2::new(0.0, 0.0), 10.0);
        let b = square_at(Vector2::new(5.0, 0.0), 10.0);
        assert_eq!(resolve(&a, &b).unwrap().axis, Vector2::RIGHT);
        assert_eq!(resolve(&b, &a).unwrap().axis, Vector2::LEFT);
    }

    #[test]
    fn contact_point_sits_between_touching_faces() {
        // Box resting 2 units deep into a wide platform below it (Y-down).
        let boxed = square_at(Vector2::new(500.0, 392.0), 20.0);
        let platform = Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(200.0, 0.0),
            Vector2::new(200.0, 20.0),
            Vector2::new(0.0, 20.0),
        ])
        .unwrap()
        .with_position(Vector2::new(400.0, 400.0));

        let mtv = resolve(&boxed, &platform).expect("box overlaps platform");
        assert_eq!(mtv.axis, Vector2::DOWN);
        assert_eq!(mtv.overlap, Scalar(2.0));
        // Box top-left (490, 382) and platform bottom-right (600, 420).
        assert_eq!(mtv.point, Vector2::new(545.0, 401.0));
    }

    #[test]
    fn contact_point_uses_lowest_of_first_and_highest_of_second() {
        let a = square_at(Vector2::new(0.0, 0.0), 10.0);
        let wide = Polygon::new(vec![
            Vector2::new(-15.0, -5.0),
            Vector2::new(15.0, -5.0),
            Vector2::new(15.0, 5.0),
            Vector2::new(-15.0, 5.0),
        ])
        .unwrap()
        .with_position(Vector2::new(18.0, 0.0));

        let mtv = resolve(&a, &wide).expect("2 unit overlap must collide");
        assert_eq!(mtv.axis, Vector2::RIGHT);
        assert_eq!(mtv.overlap, Scalar(2.0));
        // (-5, -5) from the first square, (33, -5) from the wide box.
        assert_eq!(mtv.point, Vector2::new(14.0, -5.0));
    }

    #[test]
    fn duplicated_vertex_does_not_hide_overlap() {
        // Zero-length second edge yields a degenerate axis.
        let a = Polygon::new(vec![
            Vector2::new(-5.0, -5.0),
            Vector2::new(5.0, -5.0),
            Vector2::new(5.0, -5.0),
            Vector2::new(5.0, 5.0),
            Vector2::new(-5.0, 5.0),
        ])
        .unwrap();
        assert!(a.axes().contains(&Vector2::ZERO));
        let b = square_at(Vector2::new(5.0, 0.0), 10.0);

        let mtv = resolve(&a, &b).expect("overlapping pair reported as separated");
        assert_eq!(mtv.overlap, Scalar(5.0));
        assert_eq!(mtv.axis, Vector2::RIGHT);
    }

    #[test]
    fn rotated_square_overlap_is_detected() {
        let a = square_at(Vector2::new(0.0, 0.0), 10.0);
        let mut b = square_at(Vector2::new(11.0, 0.0), 10.0);
        // A 45° diamond reaches ~7.07 to the left of its centre.
        b.rotate(45.0, None);
        let mtv = resolve(&a, &b).expect("diamond corner penetrates");
        assert!(mtv.overlap > Scalar::ZERO);
        assert!(mtv.axis.dot(Vector2::RIGHT) > Scalar::ZERO);
    }
}
