/// Model transforms, the user-facing transform state and the spin clock
use nalgebra::{Matrix4, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotation derived from a single angle, scaled per axis
    pub fn scaled(angle: f32, rates: &RotationState) -> Self {
        Self {
            x: angle * rates.x,
            y: angle * rates.y,
            z: angle * rates.z,
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform parameters driven by the UI controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub scale: f32,
    pub rotation: RotationState,
    pub is_playing: bool,
}

impl TransformState {
    /// The rotation used for drawing: the spin clock while playing, the
    /// slider values while paused.
    ///
    /// Both sources go through the same X, then Y, then Z composition, so the
    /// spin is not applied about Z first.
    pub fn effective_rotation(&self, spin: &SpinClock, rates: &RotationState) -> RotationState {
        if self.is_playing {
            spin.rotation(rates)
        } else {
            self.rotation
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: RotationState::new(1.0, 1.0, 1.0),
            is_playing: true,
        }
    }
}

/// Accumulated auto-play angle
///
/// Decreases by the elapsed seconds of every frame drawn while playing and
/// stays frozen while paused.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinClock {
    angle: f32,
}

impl SpinClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self, delta_seconds: f32) {
        self.angle -= delta_seconds;
    }

    pub fn rotation(&self, rates: &RotationState) -> RotationState {
        RotationState::scaled(self.angle, rates)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about X, then Y, then Z in object space
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::from_axis_angle(&Vector3::x_axis(), rotation.x);
        let ry = Matrix4::from_axis_angle(&Vector3::y_axis(), rotation.y);
        let rz = Matrix4::from_axis_angle(&Vector3::z_axis(), rotation.z);

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a uniform scale matrix
    pub fn scale_matrix(scale: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(scale)
    }

    /// Camera-relative transform: pushed `distance` units down the view
    /// axis, then scaled, then rotated.
    pub fn model_view_matrix(distance: f32, scale: f32, rotation: &RotationState) -> Matrix4<f32> {
        Self::translation_matrix(0.0, 0.0, -distance)
            * Self::scale_matrix(scale)
            * Self::rotation_matrix(rotation)
    }

    /// Inverse-transpose of `model_view`; identity when it is singular.
    pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix4<f32> {
        model_view
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const SPIN_RATES: RotationState = RotationState {
        x: 0.5,
        y: 0.2,
        z: 1.0,
    };

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_model_view_composition_order() {
        let samples = [
            (1.0, RotationState::new(0.0, 0.0, 0.0)),
            (0.1, RotationState::new(1.0, 2.0, 3.0)),
            (2.0, RotationState::new(TAU, 0.3, 4.2)),
            (0.7, RotationState::new(5.5, 6.1, 0.1)),
        ];
        for (scale, rotation) in samples {
            let expected = Matrix4::new_translation(&Vector3::new(0.0, 0.0, -6.0))
                * Matrix4::new_nonuniform_scaling(&Vector3::new(scale, scale, scale))
                * Matrix4::from_axis_angle(&Vector3::x_axis(), rotation.x)
                * Matrix4::from_axis_angle(&Vector3::y_axis(), rotation.y)
                * Matrix4::from_axis_angle(&Vector3::z_axis(), rotation.z);
            let actual = Transform::model_view_matrix(6.0, scale, &rotation);
            assert_relative_eq!(actual, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rotation_applies_z_first_to_points() {
        // Rotating +X a quarter turn about Z gives +Y; the following
        // quarter turn about X then carries +Y to +Z.
        let rotation = RotationState::new(FRAC_PI_2, 0.0, FRAC_PI_2);
        let point = Transform::rotation_matrix(&rotation) * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(point, Vector4::new(0.0, 0.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_is_inverse_transpose() {
        let model_view = Transform::model_view_matrix(6.0, 1.5, &RotationState::new(0.4, 1.1, 2.3));
        let normal = Transform::normal_matrix(&model_view);
        let product = normal.transpose() * model_view;
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_normal_matrix_preserves_orthogonality() {
        let model_view = Transform::model_view_matrix(6.0, 0.3, &RotationState::new(2.0, 0.5, 1.2));
        let normal_matrix = Transform::normal_matrix(&model_view);

        let normal = Vector4::new(0.0, 0.0, 1.0, 0.0);
        let tangent = Vector4::new(1.0, 1.0, 0.0, 0.0);
        let n = (normal_matrix * normal).xyz();
        let t = (model_view * tangent).xyz();
        assert!(n.dot(&t).abs() < 1e-5);
    }

    #[test]
    fn test_singular_model_view_yields_identity_normal_matrix() {
        let model_view = Transform::model_view_matrix(6.0, 0.0, &RotationState::zero());
        assert_eq!(Transform::normal_matrix(&model_view), Matrix4::identity());
    }

    #[test]
    fn test_spin_clock_accumulates_negative_elapsed_time() {
        let mut spin = SpinClock::new();
        let deltas = [0.016, 0.017, 0.5, 0.0, 0.033];
        for delta in deltas {
            spin.advance(delta);
        }
        let total: f32 = deltas.iter().sum();
        assert_relative_eq!(spin.angle(), -total, epsilon = 1e-6);

        let rotation = spin.rotation(&SPIN_RATES);
        assert_relative_eq!(rotation.x, -total * 0.5, epsilon = 1e-6);
        assert_relative_eq!(rotation.y, -total * 0.2, epsilon = 1e-6);
        assert_relative_eq!(rotation.z, -total, epsilon = 1e-6);
    }

    #[test]
    fn test_effective_rotation_selects_source() {
        let mut spin = SpinClock::new();
        spin.advance(2.0);

        let mut state = TransformState {
            scale: 1.0,
            rotation: RotationState::new(0.1, 0.2, 0.3),
            is_playing: true,
        };
        assert_eq!(
            state.effective_rotation(&spin, &SPIN_RATES),
            RotationState::new(-1.0, -0.4, -2.0)
        );

        state.is_playing = false;
        assert_eq!(
            state.effective_rotation(&spin, &SPIN_RATES),
            RotationState::new(0.1, 0.2, 0.3)
        );
    }
}
