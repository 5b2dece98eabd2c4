//! Color helpers.
//!
//! Colors are linear `Vec3` triples in the 0-255 range used by scene files.
//! No gamma or color-space conversion happens anywhere in the pipeline.

use glam::{IVec3, Vec3};

/// Color type alias (RGB, 0-255 scale)
pub type Color = Vec3;

/// Quantize a color: round each channel to the nearest integer (halves
/// away from zero), then saturate into [0, 255].
///
/// NaN channels quantize to 0.
pub fn clamp_color(color: Color) -> IVec3 {
    let quantize = |c: f32| (c.round() as i32).clamp(0, 255);
    IVec3::new(quantize(color.x), quantize(color.y), quantize(color.z))
}

/// Quantize a color into three framebuffer bytes.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    let c = clamp_color(color);
    [c.x as u8, c.y as u8, c.z as u8]
}
