/// Static scene geometry
///
/// Vertex data is laid out the way the shaders consume it: tightly packed
/// float arrays per attribute and an optional `u16` index list.
use std::iter;

/// Cube corner positions, four vertices per face
#[rustfmt::skip]
pub const CUBE_POSITIONS: [f32; 72] = [
    // Front face
    -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0,  1.0,  1.0,
    // Back face
    -1.0, -1.0, -1.0,
    -1.0,  1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,
    // Top face
    -1.0,  1.0, -1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
    // Bottom face
    -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,
    // Right face
     1.0, -1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,
     1.0, -1.0,  1.0,
    // Left face
    -1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,
];

#[rustfmt::skip]
pub const CUBE_TEXTURE_COORDINATES: [f32; 48] = [
    // Front
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
    // Back
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
    // Top
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
    // Bottom
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
    // Right
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
    // Left
    0.0, 0.0,  1.0, 0.0,  1.0, 1.0,  0.0, 1.0,
];

/// One outward normal per face, repeated for each of its four vertices
const CUBE_FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
];

/// RGBA per face: white, red, green, blue, yellow, purple
pub const CUBE_FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
];

/// Two triangles per face
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
     0,  1,  2,   0,  2,  3, // front
     4,  5,  6,   4,  6,  7, // back
     8,  9, 10,   8, 10, 11, // top
    12, 13, 14,  12, 14, 15, // bottom
    16, 17, 18,  16, 18, 19, // right
    20, 21, 22,  20, 22, 23, // left
];

#[rustfmt::skip]
pub const TRIANGLE_POSITIONS: [f32; 9] = [
     0.0,  1.0, 0.0,
    -1.0, -1.0, 0.0,
     1.0, -1.0, 0.0,
];

#[rustfmt::skip]
pub const TRIANGLE_COLORS: [f32; 12] = [
    1.0, 0.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 1.0,
    0.0, 0.0, 1.0, 1.0,
];

/// Per-attribute vertex data for a single drawable object
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// xyz per vertex
    pub positions: Vec<f32>,
    /// rgba per vertex
    pub colors: Option<Vec<f32>>,
    /// uv per vertex
    pub texture_coords: Option<Vec<f32>>,
    /// xyz per vertex
    pub normals: Option<Vec<f32>>,
    pub indices: Option<Vec<u16>>,
}

impl Geometry {
    /// Unit cube (edge length 2) with texture coordinates and normals.
    pub fn cube() -> Self {
        let normals = CUBE_FACE_NORMALS
            .iter()
            .flat_map(|normal| iter::repeat(normal).take(4))
            .flatten()
            .copied()
            .collect();

        Self {
            positions: CUBE_POSITIONS.to_vec(),
            colors: None,
            texture_coords: Some(CUBE_TEXTURE_COORDINATES.to_vec()),
            normals: Some(normals),
            indices: Some(CUBE_INDICES.to_vec()),
        }
    }

    /// The cube with a solid color per face instead of texture coordinates.
    pub fn colored_cube() -> Self {
        let colors = CUBE_FACE_COLORS
            .iter()
            .flat_map(|color| iter::repeat(color).take(4))
            .flatten()
            .copied()
            .collect();

        Self {
            colors: Some(colors),
            texture_coords: None,
            ..Self::cube()
        }
    }

    /// Flat-colored triangle in the z = 0 plane.
    pub fn triangle() -> Self {
        Self {
            positions: TRIANGLE_POSITIONS.to_vec(),
            colors: Some(TRIANGLE_COLORS.to_vec()),
            texture_coords: None,
            normals: None,
            indices: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of vertices the draw call covers
    pub fn draw_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len(),
            None => self.vertex_count(),
        }
    }
}
