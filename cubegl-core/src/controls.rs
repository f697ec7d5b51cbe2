/// Slider and button state feeding the renderer
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use log::warn;

use crate::transform::TransformState;

pub const SCALE_RANGE: RangeInclusive<f32> = 0.1..=2.0;
pub const ROTATION_RANGE: RangeInclusive<f32> = 0.0..=TAU;
/// Slider increment for both scale and rotation
pub const STEP: f32 = 0.1;

/// Holds the values of the transform controls
///
/// Rotation sliders keep accepting values while the animation plays; the
/// renderer ignores them until playback is paused.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformControls {
    state: TransformState,
}

impl TransformControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn set_scale(&mut self, value: f32) {
        if let Some(value) = clamp_input("scale", value, &SCALE_RANGE) {
            self.state.scale = value;
        }
    }

    pub fn set_rotation_x(&mut self, value: f32) {
        if let Some(value) = clamp_input("rotation x", value, &ROTATION_RANGE) {
            self.state.rotation.x = value;
        }
    }

    pub fn set_rotation_y(&mut self, value: f32) {
        if let Some(value) = clamp_input("rotation y", value, &ROTATION_RANGE) {
            self.state.rotation.y = value;
        }
    }

    pub fn set_rotation_z(&mut self, value: f32) {
        if let Some(value) = clamp_input("rotation z", value, &ROTATION_RANGE) {
            self.state.rotation.z = value;
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.state.is_playing = playing;
    }

    /// Flip play/pause and return the new playing state
    pub fn toggle_playing(&mut self) -> bool {
        self.state.is_playing = !self.state.is_playing;
        self.state.is_playing
    }

    /// Whether the rotation sliders currently have no effect
    pub fn rotation_locked(&self) -> bool {
        self.state.is_playing
    }
}

fn clamp_input(name: &str, value: f32, range: &RangeInclusive<f32>) -> Option<f32> {
    if !value.is_finite() {
        warn!("ignoring non-finite {} value {}", name, value);
        return None;
    }
    Some(value.clamp(*range.start(), *range.end()))
}
