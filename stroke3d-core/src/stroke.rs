/// 2D stroke input as produced by the sketching front end
use nalgebra::Point2;

/// An RGBA color with components in `0..=1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

/// A user-drawn stroke in normalized device coordinates.
///
/// `vertices` lie in `[-1, 1] x [-1, 1]`. `indices` is a triangulation over
/// `vertices`; it is trusted as given and only checked when a mesh is
/// assembled from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke2D {
    pub vertices: Vec<Point2<f32>>,
    pub indices: Vec<[u32; 3]>,
    pub color: Color,
}

impl Stroke2D {
    pub fn new(vertices: Vec<Point2<f32>>, indices: Vec<[u32; 3]>, color: Color) -> Self {
        Self {
            vertices,
            indices,
            color,
        }
    }

    /// Number of stroke vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
