//! Read-only per-render view of the global scene state.

use glint_core::{Material, MaterialId, OneBasedId, PointLight, Scene, VertexId};
use glint_math::{Color, Vec3};

/// Immutable view of the scene tables and parameters the tracer reads.
///
/// Built once per render from a validated [`Scene`] and shared by reference
/// across every worker; nothing in it can be mutated while it is alive.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'s> {
    background_color: Color,
    ambient_light: Color,
    point_lights: &'s [PointLight],
    vertices: &'s [Vec3],
    materials: &'s [Material],
    shadow_ray_epsilon: f32,
    max_recursion_depth: u32,
}

impl<'s> Snapshot<'s> {
    /// Build a snapshot over a validated scene.
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            background_color: scene.background_color.as_vec3(),
            ambient_light: scene.ambient_light,
            point_lights: &scene.point_lights,
            vertices: &scene.vertices,
            materials: &scene.materials,
            shadow_ray_epsilon: scene.shadow_ray_epsilon,
            max_recursion_depth: scene.max_recursion_depth,
        }
    }

    #[inline]
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    #[inline]
    pub fn ambient_light(&self) -> Color {
        self.ambient_light
    }

    #[inline]
    pub fn point_lights(&self) -> &'s [PointLight] {
        self.point_lights
    }

    #[inline]
    pub fn shadow_ray_epsilon(&self) -> f32 {
        self.shadow_ray_epsilon
    }

    #[inline]
    pub fn max_recursion_depth(&self) -> u32 {
        self.max_recursion_depth
    }

    /// Position of a vertex.
    ///
    /// Panics on an invalid id; scenes are validated before rendering.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Vec3 {
        self.vertices[id.slot()]
    }

    /// Material by id. Panics on an invalid id, like [`Snapshot::vertex`].
    #[inline]
    pub fn material(&self, id: MaterialId) -> &'s Material {
        &self.materials[id.slot()]
    }
}
