//! Collision Detection
//!
//! Pure collision predicates used by the terrain index and the entity
//! systems: sphere overlap, Möller–Trumbore ray-triangle intersection, and
//! the 2D barycentric point-in-triangle test for XZ-projected terrain lookups.

use glam::{Vec2, Vec3};

/// Check whether two spheres overlap.
///
/// Uses squared distances so there is no square root on the hot path.
pub fn spheres_overlap(pos_a: Vec3, radius_a: f32, pos_b: Vec3, radius_b: f32) -> bool {
    let delta = pos_b - pos_a;
    let radius_sum = radius_a + radius_b;
    delta.length_squared() < radius_sum * radius_sum
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns the distance `t` along the ray at which it crosses the triangle,
/// or `None` for a miss, a backside-parallel ray, or an intersection behind
/// the origin. `dir` must be normalized for `t` to be a world-space distance.
pub fn ray_triangle_intersect(
    origin: Vec3,
    dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray parallel to the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Test whether `point` lies inside the XZ projection of a triangle.
///
/// 2D barycentric test with an epsilon tolerance on the edges, so points
/// sitting exactly on a shared edge between two triangles match either one.
/// Degenerate (zero-area) projections never match.
pub fn point_in_triangle_xz(point: Vec2, v0: Vec3, v1: Vec3, v2: Vec3, epsilon: f32) -> bool {
    let a = Vec2::new(v0.x, v0.z);
    let b = Vec2::new(v1.x, v1.z);
    let c = Vec2::new(v2.x, v2.z);

    let e0 = b - a;
    let e1 = c - a;
    let e2 = point - a;

    let den = e0.x * e1.y - e1.x * e0.y;
    if den.abs() < epsilon {
        return false;
    }

    let u = (e2.x * e1.y - e2.y * e1.x) / den;
    let v = (e2.y * e0.x - e2.x * e0.y) / den;

    u >= -epsilon && v >= -epsilon && u + v <= 1.0 + epsilon
}
