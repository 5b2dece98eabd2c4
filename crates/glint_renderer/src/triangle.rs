//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{Ray, Vec3};

/// Rays whose direction is this close to the triangle plane are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-10;

/// Hits closer than this along the ray are rejected as self-intersections.
const MIN_HIT_DISTANCE: f32 = 1e-6;

/// A ray-triangle hit with its barycentric coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

/// Unit geometric normal of a triangle, `(v1 - v0) × (v2 - v0)` normalized.
///
/// Zero-area triangles get a zero normal.
pub fn face_normal([v0, v1, v2]: [Vec3; 3]) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}

/// Möller-Trumbore ray-triangle intersection algorithm.
pub fn intersect_triangle(ray: &Ray, [v0, v1, v2]: [Vec3; 3]) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle (also covers degenerate rays and triangles)
    if !(a.abs() >= PARALLEL_EPSILON) {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);

    // Check if intersection is outside triangle (u parameter)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);

    // Check if intersection is outside triangle (v parameter)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !(t >= MIN_HIT_DISTANCE) {
        return None;
    }

    Some(TriangleHit { t, u, v })
}
