//! Flattened primitives and nearest-hit search.

use glint_core::{Face, Material, MaterialId, Scene, VertexId};
use glint_math::{Ray, Vec3};

use crate::sphere::{intersect_sphere, sphere_normal};
use crate::triangle::{face_normal, intersect_triangle};
use crate::Snapshot;

/// Geometry of a flattened primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere {
        center: VertexId,
        radius: f32,
    },
    Face {
        vertices: [VertexId; 3],
        /// Geometric normal from the vertex positions at flatten time
        normal: Vec3,
    },
}

/// A sphere or face tagged with the material it is shaded with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: MaterialId,
}

impl Primitive {
    /// Create a sphere primitive.
    pub fn sphere(center: VertexId, radius: f32, material: MaterialId) -> Self {
        Self {
            shape: Shape::Sphere { center, radius },
            material,
        }
    }

    /// Create a face primitive, caching its normal from the snapshot's vertices.
    pub fn face(face: &Face, material: MaterialId, snapshot: &Snapshot) -> Self {
        let normal = face_normal(face.vertices.map(|id| snapshot.vertex(id)));
        Self {
            shape: Shape::Face {
                vertices: face.vertices,
                normal,
            },
            material,
        }
    }

    /// Distance along the ray to this primitive, if it is hit.
    pub fn intersect(&self, ray: &Ray, snapshot: &Snapshot) -> Option<f32> {
        match self.shape {
            Shape::Sphere { center, radius } => {
                intersect_sphere(ray, snapshot.vertex(center), radius)
            }
            Shape::Face { vertices, .. } => {
                intersect_triangle(ray, vertices.map(|id| snapshot.vertex(id))).map(|hit| hit.t)
            }
        }
    }

    /// Surface normal at a point known to lie on this primitive.
    pub fn normal_at(&self, point: Vec3, snapshot: &Snapshot) -> Vec3 {
        match self.shape {
            Shape::Sphere { center, .. } => sphere_normal(point, snapshot.vertex(center)),
            Shape::Face { normal, .. } => normal,
        }
    }
}

/// Record of the nearest ray-primitive intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'s> {
    /// Parameter t where the intersection occurs (always positive)
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at the intersection (outward for spheres, winding order for faces)
    pub normal: Vec3,
    /// Resolved material
    pub material: &'s Material,
    pub material_id: MaterialId,
}

/// Every primitive of a scene, spheres first, then faces.
///
/// Search order is storage order, so on exactly equal distances the
/// primitive found first wins.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveList {
    spheres: Vec<Primitive>,
    faces: Vec<Primitive>,
}

impl PrimitiveList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a scene's objects into one list.
    ///
    /// Mesh faces come first in mesh order, then standalone triangles; each
    /// face carries its owner's material.
    pub fn flatten(scene: &Scene, snapshot: &Snapshot) -> Self {
        let mut list = Self::new();
        for mesh in &scene.meshes {
            for face in &mesh.faces {
                list.add(Primitive::face(face, mesh.material, snapshot));
            }
        }
        for triangle in &scene.triangles {
            list.add(Primitive::face(&triangle.face, triangle.material, snapshot));
        }
        for sphere in &scene.spheres {
            list.add(Primitive::sphere(sphere.center, sphere.radius, sphere.material));
        }
        list
    }

    /// Add a primitive to the list.
    pub fn add(&mut self, primitive: Primitive) {
        match primitive.shape {
            Shape::Sphere { .. } => self.spheres.push(primitive),
            Shape::Face { .. } => self.faces.push(primitive),
        }
    }

    /// All primitives in search order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.spheres.iter().chain(self.faces.iter())
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.spheres.len() + self.faces.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the nearest primitive the ray hits at a positive distance.
    pub fn closest_intersection<'s>(
        &self,
        ray: &Ray,
        snapshot: &Snapshot<'s>,
    ) -> Option<HitRecord<'s>> {
        let mut closest: Option<(f32, &Primitive)> = None;

        for primitive in self.iter() {
            if let Some(t) = primitive.intersect(ray, snapshot) {
                if closest.map_or(true, |(best, _)| t < best) {
                    closest = Some((t, primitive));
                }
            }
        }

        let (t, primitive) = closest?;
        let p = ray.at(t);
        Some(HitRecord {
            t,
            p,
            normal: primitive.normal_at(p, snapshot),
            material: snapshot.material(primitive.material),
            material_id: primitive.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Mesh;
    use glint_math::Color;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let red = scene.add_material(Material::new(Color::ZERO, Color::X, Color::ZERO, 1.0));
        let blue = scene.add_material(Material::new(Color::ZERO, Color::Z, Color::ZERO, 1.0));

        let center = scene.add_vertex(Vec3::new(0.0, 0.0, -5.0));
        let a = scene.add_vertex(Vec3::new(-1.0, -1.0, -3.0));
        let b = scene.add_vertex(Vec3::new(1.0, -1.0, -3.0));
        let c = scene.add_vertex(Vec3::new(0.0, 1.0, -3.0));

        scene.add_sphere(red, center, 1.0);
        scene.add_mesh(Mesh::new(blue, vec![Face { vertices: [a, b, c] }]));
        scene.add_triangle(red, Face { vertices: [a, c, b] });
        scene
    }

    #[test]
    fn test_flatten_tags_materials_and_orders_spheres_first() {
        let scene = scene();
        let snapshot = Snapshot::new(&scene);
        let list = PrimitiveList::flatten(&scene, &snapshot);

        assert_eq!(list.len(), 3);
        assert_eq!(list.sphere_count(), 1);
        assert_eq!(list.face_count(), 2);

        let order: Vec<_> = list.iter().collect();
        assert!(matches!(order[0].shape, Shape::Sphere { .. }));
        assert_eq!(order[1].material, MaterialId(2)); // mesh face takes the mesh material
        assert_eq!(order[2].material, MaterialId(1)); // standalone triangle keeps its own
    }

    #[test]
    fn test_flatten_caches_face_normal() {
        let scene = scene();
        let snapshot = Snapshot::new(&scene);
        let list = PrimitiveList::flatten(&scene, &snapshot);

        let normals: Vec<_> = list
            .iter()
            .filter_map(|p| match p.shape {
                Shape::Face { normal, .. } => Some(normal),
                _ => None,
            })
            .collect();
        assert_eq!(normals, vec![Vec3::Z, Vec3::NEG_Z]);
    }

    #[test]
    fn test_closest_intersection_picks_nearest() {
        let scene = scene();
        let snapshot = Snapshot::new(&scene);
        let list = PrimitiveList::flatten(&scene, &snapshot);

        // The faces at z=-3 occlude the sphere at z=-4
        let hit = list
            .closest_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), &snapshot)
            .unwrap();
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert_eq!(hit.p, Vec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_equal_distance_keeps_first_found() {
        let scene = scene();
        let snapshot = Snapshot::new(&scene);
        let list = PrimitiveList::flatten(&scene, &snapshot);

        // Both faces lie in the same plane; the mesh face is stored first
        let hit = list
            .closest_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), &snapshot)
            .unwrap();
        assert_eq!(hit.material_id, MaterialId(2));
        assert_eq!(hit.normal, Vec3::Z);
        assert_eq!(hit.material.diffuse, Color::Z);
    }

    #[test]
    fn test_sphere_hit_record() {
        let mut scene = scene();
        scene.meshes.clear();
        scene.triangles.clear();
        let snapshot = Snapshot::new(&scene);
        let list = PrimitiveList::flatten(&scene, &snapshot);

        let hit = list
            .closest_intersection(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), &snapshot)
            .unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert_eq!(hit.material_id, MaterialId(1));
    }

    #[test]
    fn test_no_hit() {
        let scene = scene();
        let snapshot = Snapshot::new(&scene);
        let list = PrimitiveList::flatten(&scene, &snapshot);

        assert!(list
            .closest_intersection(&Ray::new(Vec3::ZERO, Vec3::Z), &snapshot)
            .is_none());
        assert!(list
            .closest_intersection(&Ray::new(Vec3::ZERO, Vec3::ZERO), &snapshot)
            .is_none());
        assert!(PrimitiveList::new()
            .closest_intersection(&Ray::default(), &snapshot)
            .is_none());
    }
}
