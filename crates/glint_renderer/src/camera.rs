//! Camera for primary ray generation and parallel framebuffer fill.

use std::path::{Path, PathBuf};
use std::time::Instant;

use glint_core::CameraDesc;
use glint_math::{to_rgb8, NearPlane, Ray, Vec3};
use rayon::ThreadPoolBuilder;

use crate::shading::compute_color;
use crate::stripe::stripe_pixels;
use crate::{PrimitiveList, RenderError, RenderResult, Snapshot};

/// Camera generating one primary ray per pixel into its own framebuffer.
#[derive(Debug, Clone)]
pub struct Camera {
    // Placement
    position: Vec3,
    gaze: Vec3,
    up: Vec3,

    // Image plane
    near_plane: NearPlane,
    near_distance: f32,
    width: u32,
    height: u32,
    image_name: String,

    // Basis (set by compute_tracing_rays())
    u: Vec3,
    v: Vec3,
    w: Vec3,

    rays: Vec<Ray>,
    /// Row-major RGB bytes, top row first
    framebuffer: Vec<u8>,
}

impl Camera {
    /// Create a camera from its scene description.
    ///
    /// The framebuffer starts black; no rays exist until
    /// [`Camera::compute_tracing_rays`] runs.
    pub fn new(desc: &CameraDesc) -> Self {
        let pixels = desc.pixel_count();
        Self {
            position: desc.position,
            gaze: desc.gaze,
            up: desc.up,
            near_plane: desc.near_plane,
            near_distance: desc.near_distance,
            width: desc.image_width,
            height: desc.image_height,
            image_name: desc.image_name.clone(),
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            rays: Vec::with_capacity(pixels),
            framebuffer: vec![0; pixels * 3],
        }
    }

    /// Derive the camera basis and one primary ray through each pixel center.
    ///
    /// Rows are sampled from the bottom of the near plane upward and stored
    /// flipped, so index 0 is the top-left pixel of the output image.
    pub fn compute_tracing_rays(&mut self) {
        self.v = self.up.normalize_or_zero();
        self.w = (-self.gaze).normalize_or_zero();
        self.u = self.v.cross(self.w).normalize_or_zero();

        let (width, height) = (self.width as usize, self.height as usize);
        let plane_center = self.position - self.w * self.near_distance;

        self.rays.clear();
        self.rays.resize(width * height, Ray::default());

        for i in 0..self.height {
            let row_offset = self.v * self.near_plane.row_offset(i, self.height);
            let row_start = (height - i as usize - 1) * width;

            for j in 0..self.width {
                let sample = plane_center
                    + self.u * self.near_plane.column_offset(j, self.width)
                    + row_offset;
                self.rays[row_start + j as usize] = Ray::toward(self.position, sample);
            }
        }
    }

    /// Trace every primary ray and fill the framebuffer.
    ///
    /// Pixels are dealt round-robin to `workers` threads of a pool built for
    /// this call; the call returns once every worker has finished. A panic
    /// inside a worker propagates and aborts the render.
    pub fn ray_trace(
        &mut self,
        world: &PrimitiveList,
        snapshot: &Snapshot,
        workers: usize,
    ) -> RenderResult<()> {
        if workers == 0 {
            return Err(RenderError::NoWorkers);
        }
        if self.rays.len() != self.pixel_count() {
            self.compute_tracing_rays();
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("glint-worker-{}", index))
            .build()?;

        let start = Instant::now();
        let rays = &self.rays;
        let pixels: &mut [[u8; 3]] = bytemuck::cast_slice_mut(&mut self.framebuffer);

        pool.scope(|scope| {
            for stripe in stripe_pixels(pixels, workers) {
                scope.spawn(move |_| {
                    for (index, pixel) in stripe {
                        *pixel = to_rgb8(compute_color(&rays[index], 0, world, snapshot));
                    }
                });
            }
        });

        log::debug!(
            "Traced {} rays on {} workers in {:.2?}",
            rays.len(),
            workers,
            start.elapsed()
        );
        Ok(())
    }

    /// Write the framebuffer to `dir/<image name>` as a binary PPM.
    ///
    /// The format is always PPM, whatever extension the name carries.
    pub fn save_image(&self, dir: impl AsRef<Path>) -> RenderResult<PathBuf> {
        let path = dir.as_ref().join(&self.image_name);
        image::save_buffer_with_format(
            &path,
            &self.framebuffer,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Pnm,
        )?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    /// Primary rays in framebuffer order.
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Raw RGB bytes, `width * height * 3` long.
    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// RGB of the pixel at column `x`, row `y` (row 0 at the top).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        [
            self.framebuffer[offset],
            self.framebuffer[offset + 1],
            self.framebuffer[offset + 2],
        ]
    }

    /// Camera basis vectors (u, v, w).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes;

    fn ready(size: u32) -> Camera {
        let mut camera = Camera::new(&test_scenes::camera(size));
        camera.compute_tracing_rays();
        camera
    }

    #[test]
    fn test_new_allocates_framebuffer() {
        let mut desc = test_scenes::camera(3);
        desc.image_height = 2;
        let camera = Camera::new(&desc);
        assert_eq!(camera.framebuffer().len(), 3 * 2 * 3);
        assert!(camera.framebuffer().iter().all(|&b| b == 0));
        assert!(camera.rays().is_empty());
    }

    #[test]
    fn test_basis() {
        let camera = ready(5);
        let (u, v, w) = camera.basis();
        assert!((u - Vec3::X).length() < 1e-6);
        assert!((v - Vec3::Y).length() < 1e-6);
        assert!((w - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_center_ray_looks_down_gaze() {
        let camera = ready(5);
        assert_eq!(camera.rays().len(), 25);

        let center = camera.rays()[2 * 5 + 2];
        assert_eq!(center.origin(), Vec3::ZERO);
        assert!((center.direction() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_top_row_stored_first() {
        let camera = ready(4);
        let top_left = camera.rays()[0].direction();
        let bottom_right = camera.rays()[15].direction();

        assert!(top_left.y > 0.0 && top_left.x < 0.0);
        assert!(bottom_right.y < 0.0 && bottom_right.x > 0.0);

        // First pixel center of a 4 wide [-1, 1] window sits at 0.75 from the edge
        let expected = Vec3::new(-0.75, 0.75, -1.0).normalize();
        assert!((top_left - expected).length() < 1e-6);
    }

    #[test]
    fn test_wide_image_with_offset_window() {
        let mut desc = test_scenes::camera(4);
        desc.image_height = 2;
        desc.near_plane = NearPlane::new(-2.0, 1.0, -1.0, 3.0);
        let mut camera = Camera::new(&desc);
        camera.compute_tracing_rays();

        let rays = camera.rays();
        assert_eq!(rays.len(), 8);

        // Column centers: -1.625, -0.875, -0.125, 0.625; row centers: 0 (bottom), 2 (top)
        let expect = |x: f32, y: f32| Vec3::new(x, y, -1.0).normalize();
        let close = |a: Vec3, b: Vec3| (a - b).length() < 1e-6;

        assert!(close(rays[0].direction(), expect(-1.625, 2.0)));
        assert!(close(rays[3].direction(), expect(0.625, 2.0)));
        assert!(close(rays[4].direction(), expect(-1.625, 0.0)));
        assert!(close(rays[7].direction(), expect(0.625, 0.0)));
        assert!(close(rays[5].direction(), expect(-0.875, 0.0)));
    }

    #[test]
    fn test_rays_are_unit_length() {
        let camera = ready(7);
        for ray in camera.rays() {
            assert!((ray.direction().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_workers_rejected() {
        let scene = test_scenes::red_sphere();
        let snapshot = Snapshot::new(&scene);
        let world = PrimitiveList::flatten(&scene, &snapshot);

        let mut camera = ready(3);
        assert!(matches!(
            camera.ray_trace(&world, &snapshot, 0),
            Err(RenderError::NoWorkers)
        ));
    }

    #[test]
    fn test_ray_trace_fills_framebuffer() {
        let scene = test_scenes::red_sphere();
        let snapshot = Snapshot::new(&scene);
        let world = PrimitiveList::flatten(&scene, &snapshot);

        let mut camera = ready(11);
        camera.ray_trace(&world, &snapshot, 4).unwrap();

        let center = camera.pixel(5, 5);
        assert!(center[0] > 0);
        assert_eq!(camera.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_ray_trace_generates_missing_rays() {
        let scene = test_scenes::red_sphere();
        let snapshot = Snapshot::new(&scene);
        let world = PrimitiveList::flatten(&scene, &snapshot);

        let mut lazy = Camera::new(&test_scenes::camera(11));
        lazy.ray_trace(&world, &snapshot, 2).unwrap();

        let mut eager = ready(11);
        eager.ray_trace(&world, &snapshot, 2).unwrap();
        assert_eq!(lazy.framebuffer(), eager.framebuffer());
    }

    fn load_ppm(path: &Path) -> image::RgbImage {
        image::ImageReader::open(path)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
            .to_rgb8()
    }

    #[test]
    fn test_save_image_writes_ppm() {
        let dir = std::env::temp_dir().join(format!("glint-camera-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let scene = test_scenes::red_sphere();
        let snapshot = Snapshot::new(&scene);
        let world = PrimitiveList::flatten(&scene, &snapshot);
        let mut camera = ready(11);
        camera.ray_trace(&world, &snapshot, 2).unwrap();

        let path = camera.save_image(&dir).unwrap();
        assert_eq!(path, dir.join("test.ppm"));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P6"));

        let saved = load_ppm(&path);
        assert_eq!(saved.dimensions(), (11, 11));
        assert_eq!(saved.as_raw().as_slice(), camera.framebuffer());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_image_ignores_extension() {
        let dir = std::env::temp_dir().join(format!("glint-names-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        for name in ["second", "x.foo", "shot.png"] {
            let mut desc = test_scenes::camera(3);
            desc.image_name = name.to_string();
            let path = Camera::new(&desc).save_image(&dir).unwrap();

            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"P6"), "{name} was not written as PPM");
            assert_eq!(load_ppm(&path).dimensions(), (3, 3));
        }
        std::fs::remove_dir_all(&dir).ok();
    }
}
