//! Simple Whitted ray tracer example.
//!
//! Builds a small scene in code (a mirror sphere, two matte spheres and a
//! floor made of two triangles) and saves the render to `simple_render.ppm`.

use glint_core::{CameraDesc, Face, Material, Mesh, PointLight, Scene};
use glint_math::{IVec3, NearPlane};
use glint_renderer::{render_scene, Color, RenderConfig, Vec3};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Glint - Simple Example");
    println!("======================");

    let scene = build_scene();
    println!(
        "Scene has {} spheres and {} triangles",
        scene.spheres.len(),
        scene.triangle_count()
    );

    let config = RenderConfig::default();
    let start = std::time::Instant::now();
    let cameras = render_scene(&scene, &config).expect("Render failed");
    println!("Rendered in {:?} on {} workers", start.elapsed(), config.workers);

    for camera in &cameras {
        let path = camera.save_image(".").expect("Failed to save image");
        println!("Saved to {}", path.display());
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    scene.background_color = IVec3::new(20, 20, 40);
    scene.max_recursion_depth = 3;
    scene.ambient_light = Color::splat(25.0);

    scene.add_camera(CameraDesc {
        position: Vec3::new(0.0, 1.0, 4.0),
        gaze: Vec3::new(0.0, -0.15, -1.0),
        up: Vec3::Y,
        near_plane: NearPlane::new(-0.8, 0.8, -0.45, 0.45),
        near_distance: 1.0,
        image_width: 800,
        image_height: 450,
        image_name: "simple_render.ppm".to_string(),
    });

    scene.add_point_light(PointLight::new(
        Vec3::new(0.0, 5.0, 2.0),
        Color::splat(900.0),
    ));
    scene.add_point_light(PointLight::new(
        Vec3::new(-4.0, 3.0, 4.0),
        Color::splat(400.0),
    ));

    let floor = scene.add_material(Material::new(
        Color::splat(0.4),
        Color::splat(0.5),
        Color::ZERO,
        1.0,
    ));
    let mirror = scene.add_material(
        Material::new(Color::ZERO, Color::splat(0.1), Color::ONE, 100.0)
            .with_mirror(Color::splat(0.8)),
    );
    let red = scene.add_material(Material::new(
        Color::new(0.6, 0.1, 0.1),
        Color::new(0.8, 0.1, 0.1),
        Color::splat(0.5),
        40.0,
    ));
    let blue = scene.add_material(Material::new(
        Color::new(0.1, 0.1, 0.6),
        Color::new(0.1, 0.2, 0.8),
        Color::splat(0.5),
        40.0,
    ));

    // Floor quad at y = -1
    let a = scene.add_vertex(Vec3::new(-10.0, -1.0, 10.0));
    let b = scene.add_vertex(Vec3::new(10.0, -1.0, 10.0));
    let c = scene.add_vertex(Vec3::new(10.0, -1.0, -10.0));
    let d = scene.add_vertex(Vec3::new(-10.0, -1.0, -10.0));
    scene.add_mesh(Mesh::new(
        floor,
        vec![Face { vertices: [a, b, c] }, Face { vertices: [a, c, d] }],
    ));

    let center = scene.add_vertex(Vec3::new(0.0, 0.0, -2.0));
    let left = scene.add_vertex(Vec3::new(-2.2, -0.4, -1.5));
    let right = scene.add_vertex(Vec3::new(2.2, -0.4, -1.5));
    scene.add_sphere(mirror, center, 1.0);
    scene.add_sphere(red, left, 0.6);
    scene.add_sphere(blue, right, 0.6);

    scene
}
