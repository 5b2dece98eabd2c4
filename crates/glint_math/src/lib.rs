// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod color;
mod near_plane;
mod ray;

pub use color::{clamp_color, to_rgb8, Color};
pub use near_plane::NearPlane;
pub use ray::Ray;
