//! High-level scene loading.
//!
//! Maps the element tree produced by the parser onto a [`Scene`] and
//! validates it, so a scene that loads successfully is safe to render.

use std::path::Path;
use std::str::FromStr;

use glint_math::{IVec3, NearPlane, Vec3};
use thiserror::Error;

use crate::index::{MaterialId, VertexId};
use crate::mesh::{Face, Mesh};
use crate::scene::{CameraDesc, Material, PointLight, Scene, SceneError};
use crate::xml::parser::{parse_xml, Element, ParseError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Parse(#[from] ParseError),

    #[error("Missing <{element}> inside <{parent}> (line {line})")]
    MissingElement {
        element: String,
        parent: String,
        line: usize,
    },

    #[error("Invalid number '{value}' in <{element}> (line {line})")]
    InvalidNumber {
        element: String,
        value: String,
        line: usize,
    },

    #[error("<{element}> (line {line}) needs {expected} values, found {found}")]
    WrongArity {
        element: String,
        expected: String,
        found: usize,
        line: usize,
    },

    #[error("Unsupported scene feature: {0}")]
    Unsupported(String),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file from disk and validate it.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&content)?;

    log::info!(
        "Loaded {}: {} cameras, {} lights, {} materials, {} vertices, {} triangles, {} spheres",
        path.display(),
        scene.cameras.len(),
        scene.point_lights.len(),
        scene.materials.len(),
        scene.vertices.len(),
        scene.triangle_count(),
        scene.spheres.len()
    );

    Ok(scene)
}

/// Load a scene from XML text and validate it.
pub fn load_scene_from_str(content: &str) -> LoadResult<Scene> {
    let root = parse_xml(content)?;
    let scene = SceneLoader::new(&root).load()?;
    scene.validate()?;
    Ok(scene)
}

struct SceneLoader<'a> {
    root: &'a Element,
}

impl<'a> SceneLoader<'a> {
    fn new(root: &'a Element) -> Self {
        Self { root }
    }

    fn load(&self) -> LoadResult<Scene> {
        let mut scene = Scene::new();
        let root = self.root;

        if let Some(e) = root.child("BackgroundColor") {
            let [r, g, b] = numbers::<i32, 3>(e)?;
            scene.background_color = IVec3::new(r, g, b);
        }
        if let Some(e) = root.child("ShadowRayEpsilon") {
            let [eps] = numbers::<f32, 1>(e)?;
            scene.shadow_ray_epsilon = eps;
        }
        if let Some(e) = root.child("MaxRecursionDepth") {
            let [depth] = numbers::<u32, 1>(e)?;
            scene.max_recursion_depth = depth;
        }

        for camera in required(root, "Cameras")?.children_named("Camera") {
            scene.add_camera(load_camera(camera)?);
        }

        let lights = required(root, "Lights")?;
        scene.ambient_light = vec3(required(lights, "AmbientLight")?)?;
        for light in lights.children_named("PointLight") {
            scene.add_point_light(PointLight::new(
                vec3(required(light, "Position")?)?,
                vec3(required(light, "Intensity")?)?,
            ));
        }

        if let Some(materials) = root.child("Materials") {
            for material in materials.children_named("Material") {
                scene.add_material(load_material(material)?);
            }
        }

        if let Some(e) = root.child("VertexData") {
            let values = list::<f32>(e)?;
            if values.len() % 3 != 0 {
                return Err(arity(e, "a multiple of 3", values.len()));
            }
            for v in values.chunks_exact(3) {
                scene.add_vertex(Vec3::new(v[0], v[1], v[2]));
            }
        }

        if let Some(objects) = root.child("Objects") {
            for mesh in objects.children_named("Mesh") {
                let material = MaterialId(numbers::<u32, 1>(required(mesh, "Material")?)?[0]);
                let faces = load_faces(required(mesh, "Faces")?)?;
                scene.add_mesh(Mesh::new(material, faces));
            }
            for triangle in objects.children_named("Triangle") {
                let material =
                    MaterialId(numbers::<u32, 1>(required(triangle, "Material")?)?[0]);
                let [a, b, c] = numbers::<u32, 3>(required(triangle, "Indices")?)?;
                scene.add_triangle(material, Face::new(a, b, c));
            }
            for sphere in objects.children_named("Sphere") {
                let material = MaterialId(numbers::<u32, 1>(required(sphere, "Material")?)?[0]);
                let [center] = numbers::<u32, 1>(required(sphere, "Center")?)?;
                let [radius] = numbers::<f32, 1>(required(sphere, "Radius")?)?;
                scene.add_sphere(material, VertexId(center), radius);
            }
        }

        Ok(scene)
    }
}

fn load_camera(camera: &Element) -> LoadResult<CameraDesc> {
    let [left, right, bottom, top] = numbers::<f32, 4>(required(camera, "NearPlane")?)?;
    let [near_distance] = numbers::<f32, 1>(required(camera, "NearDistance")?)?;
    let [image_width, image_height] = numbers::<u32, 2>(required(camera, "ImageResolution")?)?;

    let name_element = required(camera, "ImageName")?;
    let image_name = name_element.trimmed_text();
    if image_name.is_empty() {
        return Err(arity(name_element, "1", 0));
    }

    Ok(CameraDesc {
        position: vec3(required(camera, "Position")?)?,
        gaze: vec3(required(camera, "Gaze")?)?,
        up: vec3(required(camera, "Up")?)?,
        near_plane: NearPlane::new(left, right, bottom, top),
        near_distance,
        image_width,
        image_height,
        image_name: image_name.to_string(),
    })
}

fn load_material(material: &Element) -> LoadResult<Material> {
    let mut loaded = Material {
        is_mirror: material.attribute("type") == Some("mirror"),
        ambient: vec3(required(material, "AmbientReflectance")?)?,
        diffuse: vec3(required(material, "DiffuseReflectance")?)?,
        specular: vec3(required(material, "SpecularReflectance")?)?,
        ..Default::default()
    };
    if let Some(e) = material.child("MirrorReflectance") {
        loaded.mirror = vec3(e)?;
    }
    if let Some(e) = material.child("PhongExponent") {
        loaded.phong_exponent = numbers::<f32, 1>(e)?[0];
    }
    Ok(loaded)
}

fn load_faces(faces: &Element) -> LoadResult<Vec<Face>> {
    if faces.attribute("plyFile").is_some() {
        return Err(LoadError::Unsupported(format!(
            "plyFile faces (line {})",
            faces.line
        )));
    }
    let indices = list::<u32>(faces)?;
    if indices.len() % 3 != 0 {
        return Err(arity(faces, "a multiple of 3", indices.len()));
    }
    Ok(indices
        .chunks_exact(3)
        .map(|f| Face::new(f[0], f[1], f[2]))
        .collect())
}

fn required<'e>(parent: &'e Element, name: &str) -> LoadResult<&'e Element> {
    parent.child(name).ok_or_else(|| LoadError::MissingElement {
        element: name.to_string(),
        parent: parent.name.clone(),
        line: parent.line,
    })
}

fn arity(element: &Element, expected: &str, found: usize) -> LoadError {
    LoadError::WrongArity {
        element: element.name.clone(),
        expected: expected.to_string(),
        found,
        line: element.line,
    }
}

/// Parse every whitespace-separated value in an element's text.
fn list<T: FromStr>(element: &Element) -> LoadResult<Vec<T>> {
    element
        .trimmed_text()
        .split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| LoadError::InvalidNumber {
                element: element.name.clone(),
                value: token.to_string(),
                line: element.line,
            })
        })
        .collect()
}

/// Parse exactly `N` values from an element's text.
fn numbers<T: FromStr, const N: usize>(element: &Element) -> LoadResult<[T; N]> {
    let values = list::<T>(element)?;
    let found = values.len();
    values
        .try_into()
        .map_err(|_| arity(element, &N.to_string(), found))
}

fn vec3(element: &Element) -> LoadResult<Vec3> {
    let [x, y, z] = numbers::<f32, 3>(element)?;
    Ok(Vec3::new(x, y, z))
}
