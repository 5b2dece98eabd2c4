//! Scene description types for Glint.
//!
//! A [`Scene`] holds the typed arrays a scene file describes: global
//! parameters, cameras, lights, materials, the shared vertex table and the
//! objects that reference it. It is plain data; the renderer builds its own
//! read-only view from it once per render.

use glint_math::{Color, IVec3, NearPlane, Vec3};
use thiserror::Error;

use crate::index::{lookup, MaterialId, VertexId};
use crate::mesh::{Face, Mesh, Triangle};

/// Errors found while validating a scene before rendering.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("Scene has no cameras")]
    NoCameras,

    #[error("{owner} references {vertex}, but the vertex table has {count} entries")]
    InvalidVertex {
        owner: String,
        vertex: VertexId,
        count: usize,
    },

    #[error("{owner} references {material}, but the material table has {count} entries")]
    InvalidMaterial {
        owner: String,
        material: MaterialId,
        count: usize,
    },

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Material {index} has invalid Phong exponent {exponent}")]
    InvalidPhongExponent { index: usize, exponent: f32 },

    #[error("Camera '{name}' has empty image resolution {width}x{height}")]
    EmptyImage {
        name: String,
        width: u32,
        height: u32,
    },

    #[error("Camera '{name}' has a degenerate basis (gaze and up must be non-zero and not parallel)")]
    DegenerateCamera { name: String },

    #[error("Shadow ray epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f32),

    #[error("Camera {index} has an empty image name")]
    EmptyImageName { index: usize },

    #[error("Max recursion depth {depth} exceeds the limit of {limit}")]
    RecursionTooDeep { depth: u32, limit: u32 },
}

/// Deepest mirror recursion a scene may ask for.
///
/// Shading recurses once per bounce on the worker's stack.
pub const MAX_RECURSION_DEPTH: u32 = 64;

/// Result type for scene validation.
pub type SceneResult<T> = Result<T, SceneError>;

/// Phong material with an optional mirror term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Gates the recursive reflection term
    pub is_mirror: bool,

    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,

    /// Reflectance applied to the color seen along the mirror direction
    pub mirror: Color,

    /// Specular shininess exponent
    pub phong_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            is_mirror: false,
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            mirror: Color::ZERO,
            phong_exponent: 1.0,
        }
    }
}

impl Material {
    /// Create a non-mirror material.
    pub fn new(ambient: Color, diffuse: Color, specular: Color, phong_exponent: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            phong_exponent,
            ..Default::default()
        }
    }

    /// Turn this material into a mirror with the given reflectance.
    pub fn with_mirror(mut self, reflectance: Color) -> Self {
        self.is_mirror = true;
        self.mirror = reflectance;
        self
    }
}

/// Point light, attenuated with the inverse square of distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

/// A sphere centered on a vertex of the shared table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub material: MaterialId,
    pub center: VertexId,
    pub radius: f32,
}

impl Sphere {
    pub fn new(material: MaterialId, center: VertexId, radius: f32) -> Self {
        Self {
            material,
            center,
            radius,
        }
    }
}

/// Camera parameters as read from a scene file.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraDesc {
    pub position: Vec3,
    pub gaze: Vec3,
    pub up: Vec3,
    pub near_plane: NearPlane,
    pub near_distance: f32,
    pub image_width: u32,
    pub image_height: u32,
    /// Output file name, e.g. `simple.ppm`
    pub image_name: String,
}

impl CameraDesc {
    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            gaze: Vec3::NEG_Z,
            up: Vec3::Y,
            near_plane: NearPlane::default(),
            near_distance: 1.0,
            image_width: 640,
            image_height: 480,
            image_name: "out.ppm".to_string(),
        }
    }
}

/// Everything a scene file describes.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Color of primary rays that hit nothing (0-255 per channel)
    pub background_color: IVec3,

    /// Offset applied along the surface normal to secondary ray origins
    pub shadow_ray_epsilon: f32,

    /// Number of mirror bounces followed after the primary hit
    pub max_recursion_depth: u32,

    pub cameras: Vec<CameraDesc>,
    pub ambient_light: Color,
    pub point_lights: Vec<PointLight>,
    pub materials: Vec<Material>,

    /// Vertex positions, referenced 1-based
    pub vertices: Vec<Vec3>,

    pub meshes: Vec<Mesh>,
    pub triangles: Vec<Triangle>,
    pub spheres: Vec<Sphere>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            background_color: IVec3::ZERO,
            shadow_ray_epsilon: 0.001,
            max_recursion_depth: 0,
            cameras: Vec::new(),
            ambient_light: Color::ZERO,
            point_lights: Vec::new(),
            materials: Vec::new(),
            vertices: Vec::new(),
            meshes: Vec::new(),
            triangles: Vec::new(),
            spheres: Vec::new(),
        }
    }
}

impl Scene {
    /// Create an empty scene with default global parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return its 1-based id.
    pub fn add_vertex(&mut self, position: Vec3) -> VertexId {
        self.vertices.push(position);
        VertexId(self.vertices.len() as u32)
    }

    /// Append a material and return its 1-based id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() as u32)
    }

    pub fn add_point_light(&mut self, light: PointLight) {
        self.point_lights.push(light);
    }

    pub fn add_camera(&mut self, camera: CameraDesc) {
        self.cameras.push(camera);
    }

    pub fn add_sphere(&mut self, material: MaterialId, center: VertexId, radius: f32) {
        self.spheres.push(Sphere::new(material, center, radius));
    }

    pub fn add_triangle(&mut self, material: MaterialId, face: Face) {
        self.triangles.push(Triangle::new(material, face));
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Total number of triangles across meshes and standalone triangles.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum::<usize>() + self.triangles.len()
    }

    /// Check every reference and parameter the renderer relies on.
    ///
    /// The renderer assumes a validated scene: indices are in range, radii
    /// are positive and every camera has a usable basis and resolution.
    pub fn validate(&self) -> SceneResult<()> {
        if self.cameras.is_empty() {
            return Err(SceneError::NoCameras);
        }
        if !self.shadow_ray_epsilon.is_finite() || self.shadow_ray_epsilon < 0.0 {
            return Err(SceneError::InvalidEpsilon(self.shadow_ray_epsilon));
        }
        if self.max_recursion_depth > MAX_RECURSION_DEPTH {
            return Err(SceneError::RecursionTooDeep {
                depth: self.max_recursion_depth,
                limit: MAX_RECURSION_DEPTH,
            });
        }

        for (i, camera) in self.cameras.iter().enumerate() {
            if camera.image_name.trim().is_empty() {
                return Err(SceneError::EmptyImageName { index: i + 1 });
            }
            if camera.image_width == 0 || camera.image_height == 0 {
                return Err(SceneError::EmptyImage {
                    name: camera.image_name.clone(),
                    width: camera.image_width,
                    height: camera.image_height,
                });
            }
            if camera.gaze.cross(camera.up).length_squared() == 0.0 {
                return Err(SceneError::DegenerateCamera {
                    name: camera.image_name.clone(),
                });
            }
        }

        for (i, material) in self.materials.iter().enumerate() {
            if !(material.phong_exponent >= 0.0) {
                return Err(SceneError::InvalidPhongExponent {
                    index: i + 1,
                    exponent: material.phong_exponent,
                });
            }
        }

        for (i, mesh) in self.meshes.iter().enumerate() {
            let owner = || format!("Mesh {}", i + 1);
            self.check_material(mesh.material, owner)?;
            for (j, face) in mesh.faces.iter().enumerate() {
                self.check_face(face, || format!("Mesh {} face {}", i + 1, j + 1))?;
            }
        }

        for (i, triangle) in self.triangles.iter().enumerate() {
            let owner = || format!("Triangle {}", i + 1);
            self.check_material(triangle.material, owner)?;
            self.check_face(&triangle.face, owner)?;
        }

        for (i, sphere) in self.spheres.iter().enumerate() {
            let owner = || format!("Sphere {}", i + 1);
            self.check_material(sphere.material, owner)?;
            self.check_vertex(sphere.center, owner)?;
            if !(sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index: i + 1,
                    radius: sphere.radius,
                });
            }
        }

        Ok(())
    }

    fn check_vertex(&self, vertex: VertexId, owner: impl Fn() -> String) -> SceneResult<()> {
        match lookup(&self.vertices, vertex) {
            Some(_) => Ok(()),
            None => Err(SceneError::InvalidVertex {
                owner: owner(),
                vertex,
                count: self.vertices.len(),
            }),
        }
    }

    fn check_material(&self, material: MaterialId, owner: impl Fn() -> String) -> SceneResult<()> {
        match lookup(&self.materials, material) {
            Some(_) => Ok(()),
            None => Err(SceneError::InvalidMaterial {
                owner: owner(),
                material,
                count: self.materials.len(),
            }),
        }
    }

    fn check_face(&self, face: &Face, owner: impl Fn() -> String) -> SceneResult<()> {
        for &vertex in &face.vertices {
            self.check_vertex(vertex, &owner)?;
        }
        if face.is_degenerate(&self.vertices) {
            log::warn!("{} is degenerate and will never be hit", owner());
        }
        Ok(())
    }
}
