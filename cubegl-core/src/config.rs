/// Renderer configuration and its defaults
use log::warn;

use crate::projection::Projection;
use crate::transform::RotationState;

/// Fixed rendering parameters, chosen once per renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub clear_color: [f32; 4],
    pub projection: Projection,
    /// Distance the object sits in front of the camera
    pub camera_distance: f32,
    /// RGBA shown until the real texture image has loaded
    pub placeholder_pixel: [u8; 4],
    /// Per-axis multipliers of the spin clock angle while playing
    pub spin_rates: RotationState,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.8, 0.8, 0.8, 1.0],
            projection: Projection::default(),
            camera_distance: 6.0,
            placeholder_pixel: [255, 20, 147, 255],
            spin_rates: RotationState::new(0.5, 0.2, 1.0),
        }
    }
}

impl RendererConfig {
    /// Move the object along the view axis. Non-finite distances are ignored.
    pub fn set_camera_distance(&mut self, distance: f32) {
        if !distance.is_finite() {
            warn!("ignoring non-finite camera distance {}", distance);
            return;
        }
        self.camera_distance = distance;
    }
}
