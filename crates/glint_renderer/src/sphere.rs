//! Ray-sphere intersection.

use glint_math::{Ray, Vec3};

/// Distance along `ray` to the sphere surface, if it is hit ahead of the
/// origin.
///
/// Solves `a·t² + 2b·t + c = 0` with `a = d·d`, `b = d·(o - center)` and
/// `c = |o - center|² - r²`. The nearer root wins when it is positive; from
/// inside the sphere only the far root is, giving the exit point.
///
/// Degenerate rays and non-positive radii never hit.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let a = ray.direction().length_squared();
    if !(a > 0.0) || !(radius > 0.0) {
        return None;
    }

    let oc = ray.origin() - center;
    let b = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();
    let near = (-b - sqrtd) / a;
    let far = (-b + sqrtd) / a;

    if near > 0.0 {
        Some(near)
    } else if far > 0.0 {
        Some(far)
    } else {
        None
    }
}

/// Outward unit normal at a point on the sphere.
#[inline]
pub fn sphere_normal(point: Vec3, center: Vec3) -> Vec3 {
    (point - center).normalize_or_zero()
}
