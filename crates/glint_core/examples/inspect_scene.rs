//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/simple.xml

use std::env;

use glint_core::{load_scene, lookup};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-xml>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/simple.xml");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene ===");
            println!("Background: {:?}", scene.background_color);
            println!("Shadow epsilon: {}", scene.shadow_ray_epsilon);
            println!("Max recursion depth: {}", scene.max_recursion_depth);
            println!("Total triangles: {}", scene.triangle_count());

            println!("\n--- Cameras ---");
            for camera in &scene.cameras {
                println!(
                    "  {} - {}x{} from ({:.2}, {:.2}, {:.2})",
                    camera.image_name,
                    camera.image_width,
                    camera.image_height,
                    camera.position.x,
                    camera.position.y,
                    camera.position.z
                );
            }

            println!("\n--- Materials ---");
            for (i, material) in scene.materials.iter().enumerate() {
                println!(
                    "  [{}] mirror={} phong={}",
                    i + 1,
                    material.is_mirror,
                    material.phong_exponent
                );
            }

            println!("\n--- Spheres ---");
            for sphere in &scene.spheres {
                if let Some(center) = lookup(&scene.vertices, sphere.center) {
                    println!(
                        "  r={:.2} at ({:.2}, {:.2}, {:.2}) using {}",
                        sphere.radius, center.x, center.y, center.z, sphere.material
                    );
                }
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
