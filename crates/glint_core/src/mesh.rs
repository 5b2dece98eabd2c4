//! Triangle geometry as it comes out of a scene file.
//!
//! Faces only carry vertex references here; positions live in the scene's
//! shared vertex table. The renderer resolves them and tags each face with
//! its owner's material when it flattens the scene.

use glint_math::Vec3;

use crate::index::{lookup, MaterialId, VertexId};

/// Three references into the vertex table, counter-clockwise when seen from
/// the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [VertexId; 3],
}

impl Face {
    /// Create a face from three 1-based vertex indices.
    pub fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            vertices: [VertexId(v0), VertexId(v1), VertexId(v2)],
        }
    }

    /// Resolve the three corner positions, or `None` if any index is invalid.
    pub fn positions(&self, vertices: &[Vec3]) -> Option<[Vec3; 3]> {
        let [a, b, c] = self.vertices;
        Some([
            *lookup(vertices, a)?,
            *lookup(vertices, b)?,
            *lookup(vertices, c)?,
        ])
    }

    /// True if the three corners span no area.
    pub fn is_degenerate(&self, vertices: &[Vec3]) -> bool {
        match self.positions(vertices) {
            Some([v0, v1, v2]) => (v1 - v0).cross(v2 - v0).length_squared() == 0.0,
            None => true,
        }
    }
}

/// A list of faces sharing one material.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub material: MaterialId,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Create a mesh from its material and faces.
    pub fn new(material: MaterialId, faces: Vec<Face>) -> Self {
        Self { material, faces }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

/// A single standalone triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub material: MaterialId,
    pub face: Face,
}

impl Triangle {
    pub fn new(material: MaterialId, face: Face) -> Self {
        Self { material, face }
    }
}
