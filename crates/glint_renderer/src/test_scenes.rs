//! Small scenes shared by the renderer tests.

use glint_core::{CameraDesc, Material, PointLight, Scene};
use glint_math::{Color, NearPlane, Vec3};

pub const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 4.0, -2.0);
pub const LIGHT_INTENSITY: f32 = 1000.0;

/// Camera at the origin looking down -Z with an odd resolution, so the
/// center pixel's ray runs exactly along the axis.
pub fn camera(size: u32) -> CameraDesc {
    CameraDesc {
        position: Vec3::ZERO,
        gaze: Vec3::NEG_Z,
        up: Vec3::Y,
        near_plane: NearPlane::new(-1.0, 1.0, -1.0, 1.0),
        near_distance: 1.0,
        image_width: size,
        image_height: size,
        image_name: "test.ppm".to_string(),
    }
}

/// Matte red unit sphere at (0, 0, -5) lit from above and in front.
pub fn red_sphere() -> Scene {
    let mut scene = Scene::new();
    scene.ambient_light = Color::splat(0.1);
    scene.max_recursion_depth = 0;
    scene.add_camera(camera(11));

    let red = scene.add_material(Material::new(
        Color::new(1.0, 0.0, 0.0),
        Color::new(1.0, 0.0, 0.0),
        Color::ZERO,
        1.0,
    ));
    let center = scene.add_vertex(Vec3::new(0.0, 0.0, -5.0));
    scene.add_sphere(red, center, 1.0);
    scene.add_point_light(PointLight::new(LIGHT_POSITION, Color::splat(LIGHT_INTENSITY)));
    scene
}

/// [`red_sphere`] plus a small sphere halfway between the lit point and the light.
pub fn red_sphere_with_occluder() -> Scene {
    let mut scene = red_sphere();
    let grey = scene.add_material(Material::new(
        Color::splat(0.5),
        Color::splat(0.5),
        Color::ZERO,
        1.0,
    ));
    let center = scene.add_vertex(Vec3::new(0.0, 2.0, -3.0));
    scene.add_sphere(grey, center, 0.5);
    scene
}

/// Mirror sphere in front of the camera reflecting a red sphere behind it.
///
/// At most one mirror bounce can happen: the red sphere is not a mirror
/// and a convex mirror never sees itself.
pub fn mirror_facing_red(max_recursion_depth: u32) -> Scene {
    let mut scene = Scene::new();
    scene.ambient_light = Color::splat(0.1);
    scene.max_recursion_depth = max_recursion_depth;
    scene.add_camera(camera(21));

    let mirror = scene.add_material(
        Material::new(Color::splat(1.0), Color::ZERO, Color::ZERO, 1.0)
            .with_mirror(Color::splat(0.5)),
    );
    let red = scene.add_material(Material::new(
        Color::new(1.0, 0.0, 0.0),
        Color::new(1.0, 0.0, 0.0),
        Color::ZERO,
        1.0,
    ));

    let front = scene.add_vertex(Vec3::new(0.0, 0.0, -5.0));
    let behind = scene.add_vertex(Vec3::new(0.0, 0.0, 3.0));
    scene.add_sphere(mirror, front, 1.0);
    scene.add_sphere(red, behind, 1.0);
    scene.add_point_light(PointLight::new(
        Vec3::new(0.0, 3.0, 0.0),
        Color::splat(LIGHT_INTENSITY),
    ));
    scene
}
