//! Render orchestration.
//!
//! One call renders every camera of a scene:
//! - validate the scene up front, so a bad scene produces no images
//! - build the read-only snapshot and the flattened primitive lists once
//! - per camera, generate primary rays, then trace them on a worker pool

use std::time::Instant;

use glint_core::{Scene, SceneError};
use thiserror::Error;

use crate::{Camera, PrimitiveList, Snapshot};

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 12;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Worker threads per camera
    pub workers: usize,
}

impl RenderConfig {
    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Render every camera of a scene, in order.
///
/// Returns the cameras with their framebuffers filled. Nothing is traced
/// unless the scene validates and the worker count is non-zero.
pub fn render_scene(scene: &Scene, config: &RenderConfig) -> RenderResult<Vec<Camera>> {
    if config.workers == 0 {
        return Err(RenderError::NoWorkers);
    }
    scene.validate()?;

    let snapshot = Snapshot::new(scene);
    let world = PrimitiveList::flatten(scene, &snapshot);
    log::debug!(
        "Flattened {} spheres and {} faces",
        world.sphere_count(),
        world.face_count()
    );

    let mut cameras = Vec::with_capacity(scene.cameras.len());
    for desc in &scene.cameras {
        let start = Instant::now();
        let mut camera = Camera::new(desc);
        camera.compute_tracing_rays();
        camera.ray_trace(&world, &snapshot, config.workers)?;

        log::info!(
            "Rendered {} ({}x{}) in {:.2?}",
            camera.image_name(),
            camera.width(),
            camera.height(),
            start.elapsed()
        );
        cameras.push(camera);
    }

    Ok(cameras)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes;
    use glint_core::MaterialId;
    use glint_math::{to_rgb8, IVec3};

    fn render_one(scene: &Scene, workers: usize) -> Camera {
        let mut cameras = render_scene(scene, &RenderConfig::default().with_workers(workers)).unwrap();
        assert_eq!(cameras.len(), 1);
        cameras.remove(0)
    }

    #[test]
    fn test_default_config() {
        assert_eq!(RenderConfig::default().workers, 12);
        assert_eq!(RenderConfig::default().with_workers(3).workers, 3);
    }

    #[test]
    fn test_red_sphere_center_and_corners() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scene = test_scenes::red_sphere();
        let camera = render_one(&scene, DEFAULT_WORKERS);

        let center = camera.pixel(5, 5);
        let ambient = to_rgb8(scene.ambient_light * scene.materials[0].ambient);
        assert!(center[0] > ambient[0]);
        assert!(center[0] > center[1] && center[0] > center[2]);

        for (x, y) in [(0, 0), (10, 0), (0, 10), (10, 10)] {
            assert_eq!(camera.pixel(x, y), [0, 0, 0]);
        }
    }

    #[test]
    fn test_corners_show_background() {
        let mut scene = test_scenes::red_sphere();
        scene.background_color = IVec3::new(12, 34, 56);
        let camera = render_one(&scene, 4);
        assert_eq!(camera.pixel(0, 0), [12, 34, 56]);
        assert_eq!(camera.pixel(10, 10), [12, 34, 56]);
    }

    #[test]
    fn test_occluder_leaves_ambient_only() {
        let scene = test_scenes::red_sphere_with_occluder();
        let camera = render_one(&scene, DEFAULT_WORKERS);

        let ambient = scene.ambient_light * scene.materials[0].ambient;
        assert_eq!(camera.pixel(5, 5), to_rgb8(ambient));
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        let scene = test_scenes::mirror_facing_red(3);
        let single = render_one(&scene, 1);
        let many = render_one(&scene, 12);
        let odd = render_one(&scene, 7);

        assert_eq!(single.framebuffer(), many.framebuffer());
        assert_eq!(single.framebuffer(), odd.framebuffer());
    }

    #[test]
    fn test_recursion_saturates() {
        let depth_two = render_one(&test_scenes::mirror_facing_red(2), 4);
        let depth_five = render_one(&test_scenes::mirror_facing_red(5), 4);
        assert_eq!(depth_two.framebuffer(), depth_five.framebuffer());

        let depth_zero = render_one(&test_scenes::mirror_facing_red(0), 4);
        let depth_one = render_one(&test_scenes::mirror_facing_red(1), 4);
        assert_ne!(depth_zero.framebuffer(), depth_one.framebuffer());
    }

    #[test]
    fn test_cameras_render_in_order() {
        let mut scene = test_scenes::red_sphere();
        let mut second = test_scenes::camera(5);
        second.image_name = "second.ppm".to_string();
        scene.add_camera(second);

        let cameras = render_scene(&scene, &RenderConfig::default()).unwrap();
        let names: Vec<_> = cameras.iter().map(|c| c.image_name()).collect();
        assert_eq!(names, vec!["test.ppm", "second.ppm"]);
        assert_eq!(cameras[1].framebuffer().len(), 5 * 5 * 3);
    }

    #[test]
    fn test_every_camera_saves_regardless_of_name() {
        let dir = std::env::temp_dir().join(format!("glint-render-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut scene = test_scenes::red_sphere();
        for name in ["second", "third.foo"] {
            let mut desc = test_scenes::camera(5);
            desc.image_name = name.to_string();
            scene.add_camera(desc);
        }

        let cameras = render_scene(&scene, &RenderConfig::default()).unwrap();
        for camera in &cameras {
            let path = camera.save_image(&dir).unwrap();
            assert!(path.is_file());
        }
        assert!(dir.join("test.ppm").is_file());
        assert!(dir.join("second").is_file());
        assert!(dir.join("third.foo").is_file());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_scene_renders_nothing() {
        let mut scene = test_scenes::red_sphere();
        scene.spheres[0].material = MaterialId(7);
        assert!(matches!(
            render_scene(&scene, &RenderConfig::default()),
            Err(RenderError::Scene(SceneError::InvalidMaterial { .. }))
        ));

        let mut scene = test_scenes::red_sphere();
        scene.cameras.clear();
        assert!(matches!(
            render_scene(&scene, &RenderConfig::default()),
            Err(RenderError::Scene(SceneError::NoCameras))
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let scene = test_scenes::red_sphere();
        assert!(matches!(
            render_scene(&scene, &RenderConfig::default().with_workers(0)),
            Err(RenderError::NoWorkers)
        ));
    }
}
