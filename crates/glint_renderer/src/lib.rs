//! Glint Renderer - Whitted-style CPU ray tracing
//!
//! Recursive ray tracer with ambient, Phong diffuse/specular and mirror
//! reflection terms, hard shadows from point lights, and a per-camera
//! worker pool filling an 8-bit RGB framebuffer.

mod camera;
mod hittable;
mod renderer;
mod shading;
mod snapshot;
mod sphere;
mod stripe;
mod triangle;

#[cfg(test)]
mod test_scenes;

pub use camera::Camera;
pub use hittable::{HitRecord, Primitive, PrimitiveList, Shape};
pub use renderer::{render_scene, RenderConfig, RenderError, RenderResult, DEFAULT_WORKERS};
pub use shading::{apply_shading, compute_color, is_in_shadow, reflection_ray};
pub use snapshot::Snapshot;
pub use sphere::{intersect_sphere, sphere_normal};
pub use stripe::{stripe_pixels, Stripe};
pub use triangle::{face_normal, intersect_triangle, TriangleHit};

/// Re-export the math types used in the public API
pub use glint_math::{Color, Ray, Vec3};
