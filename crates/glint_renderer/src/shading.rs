//! Whitted shading.
//!
//! Ambient term, one Phong diffuse + specular term per unoccluded point
//! light, and recursive mirror reflection bounded by the scene's maximum
//! recursion depth.

use glint_core::PointLight;
use glint_math::{Color, Ray};

use crate::{HitRecord, PrimitiveList, Snapshot};

/// Compute the color seen along a ray.
///
/// `depth` is 0 for primary rays and grows by one per reflection. Past the
/// maximum depth the result is black. A primary ray that hits nothing sees
/// the background; a reflection ray that hits nothing contributes black.
pub fn compute_color(ray: &Ray, depth: u32, world: &PrimitiveList, snapshot: &Snapshot) -> Color {
    if depth > snapshot.max_recursion_depth() {
        return Color::ZERO;
    }

    match world.closest_intersection(ray, snapshot) {
        Some(hit) => apply_shading(ray, depth, &hit, world, snapshot),
        None if depth == 0 => snapshot.background_color(),
        None => Color::ZERO,
    }
}

/// Shade a hit point.
pub fn apply_shading(
    ray: &Ray,
    depth: u32,
    hit: &HitRecord,
    world: &PrimitiveList,
    snapshot: &Snapshot,
) -> Color {
    let material = hit.material;
    let mut color = snapshot.ambient_light() * material.ambient;

    if material.is_mirror {
        let reflection = reflection_ray(ray, hit, snapshot.shadow_ray_epsilon());
        color += compute_color(&reflection, depth + 1, world, snapshot) * material.mirror;
    }

    for light in snapshot.point_lights() {
        if is_in_shadow(light, hit, world, snapshot) {
            continue;
        }

        let to_light = light.position - hit.p;
        let distance_squared = to_light.length_squared();
        let light_dir = to_light.normalize_or_zero();

        let diffuse = light_dir.dot(hit.normal).max(0.0);

        let half_vector = (light_dir - ray.direction()).normalize_or_zero();
        let specular = half_vector
            .dot(hit.normal)
            .max(0.0)
            .powf(material.phong_exponent);

        color += light.intensity / distance_squared
            * (material.diffuse * diffuse + material.specular * specular);
    }

    color
}

/// Mirror the incoming direction about the normal, starting just off the surface.
pub fn reflection_ray(ray: &Ray, hit: &HitRecord, epsilon: f32) -> Ray {
    let d = ray.direction();
    let reflected = (d - hit.normal * 2.0 * d.dot(hit.normal)).normalize_or_zero();
    Ray::new(hit.p + hit.normal * epsilon, reflected)
}

/// True if something lies between the hit point and the light.
///
/// The shadow ray starts `epsilon` off the surface along the normal. An
/// occluder only counts if its distance along the ray is smaller than the
/// full 3D distance from that origin to the light, so geometry beyond the
/// light never casts a shadow.
pub fn is_in_shadow(
    light: &PointLight,
    hit: &HitRecord,
    world: &PrimitiveList,
    snapshot: &Snapshot,
) -> bool {
    let origin = hit.p + hit.normal * snapshot.shadow_ray_epsilon();
    let shadow_ray = Ray::toward(origin, light.position);
    if shadow_ray.is_degenerate() {
        return false;
    }

    match world.closest_intersection(&shadow_ray, snapshot) {
        Some(blocker) => blocker.t < (light.position - origin).length(),
        None => false,
    }
}
