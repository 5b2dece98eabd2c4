/// Image-plane window in camera space.
///
/// Bounds are given as (left, right, bottom, top), the order scene files
/// list them in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearPlane {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl NearPlane {
    /// Create a new window from its four bounds.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Horizontal extent (right - left).
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent (top - bottom).
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Horizontal offset of the center of pixel column `col` out of `columns`.
    pub fn column_offset(&self, col: u32, columns: u32) -> f32 {
        self.left + self.width() * (col as f32 + 0.5) / columns as f32
    }

    /// Vertical offset of the center of pixel row `row` out of `rows`,
    /// counted upward from the bottom edge.
    pub fn row_offset(&self, row: u32, rows: u32) -> f32 {
        self.bottom + self.height() * (row as f32 + 0.5) / rows as f32
    }
}

impl Default for NearPlane {
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0)
    }
}
