//! Glint Core - Scene description for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Material`, `PointLight`, `Mesh`, `Triangle`, `Sphere`, `CameraDesc`
//! - **1-based indices**: `VertexId` and `MaterialId` into the shared tables
//! - **XML support**: scene file parsing, loading and validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/simple.xml")?;
//! println!("Loaded {} cameras, {} spheres",
//!     scene.cameras.len(),
//!     scene.spheres.len());
//! ```

pub mod index;
pub mod mesh;
pub mod scene;
pub mod xml;

// Re-export commonly used types
pub use index::{lookup, MaterialId, OneBasedId, VertexId};
pub use mesh::{Face, Mesh, Triangle};
pub use scene::{
    CameraDesc, Material, PointLight, Scene, SceneError, SceneResult, Sphere, MAX_RECURSION_DEPTH,
};
pub use xml::{load_scene, load_scene_from_str, LoadError, LoadResult};
