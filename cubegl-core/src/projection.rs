/// Perspective projection
use nalgebra::Matrix4;

/// Perspective projection parameters
///
/// The aspect ratio is not stored: it is taken from the surface size every
/// time the matrix is built so a resized canvas is picked up on the next
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(fov: f32, near: f32, far: f32) -> Self {
        Self { fov, near, far }
    }

    /// Width over height. A collapsed dimension counts as one pixel so the
    /// ratio never reaches zero or infinity.
    pub fn aspect(width: u32, height: u32) -> f32 {
        width.max(1) as f32 / height.max(1) as f32
    }

    /// Create the projection matrix for a surface of the given size
    pub fn matrix(&self, width: u32, height: u32) -> Matrix4<f32> {
        Matrix4::new_perspective(Self::aspect(width, height), self.fov, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            near: 0.1,
            far: 100.0,
        }
    }
}
