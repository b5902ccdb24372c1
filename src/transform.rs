//! The quad's transform: the slider-bound [`TransformState`] and the matrices derived from it.
//!
//! Everything here is plain math over [`glam`] types, column-major like OpenGL expects. Angles
//! are stored in degrees because that is what the sliders edit.

use std::ops::RangeInclusive;

use glam::{Mat4, Vec3};

use crate::config::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Distance the camera is pulled back along -Z.
pub const CAMERA_DISTANCE: f32 = 3.0;
/// Aspect ratio of the projection, fixed to the initial window size.
pub const ASPECT_RATIO: f32 = WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// Slider bounds for [`TransformState::rotation_degrees`].
pub const ROTATION_RANGE: RangeInclusive<f32> = -180.0..=180.0;
/// Slider bounds for each component of [`TransformState::rotation_axis`].
pub const AXIS_RANGE: RangeInclusive<f32> = -1.0..=1.0;
/// Slider bounds for each component of [`TransformState::translation`].
pub const TRANSLATION_RANGE: RangeInclusive<f32> = -1.0..=1.0;
/// Slider bounds for [`TransformState::fov_degrees`].
pub const FOV_RANGE: RangeInclusive<f32> = 1.0..=360.0;

/// The values the debug UI edits. Nothing clamps them besides the sliders themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub rotation_degrees: f32,
    pub rotation_axis: Vec3,
    pub translation: Vec3,
    pub fov_degrees: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            rotation_axis: Vec3::X,
            translation: Vec3::ZERO,
            fov_degrees: 45.0,
        }
    }
}

impl TransformState {
    /// Rotation about the axis, then translation in the rotated frame.
    ///
    /// A zero axis has no direction to rotate about and leaves the rotation out.
    pub fn model(&self) -> Mat4 {
        let rotation = match self.rotation_axis.try_normalize() {
            Some(axis) => Mat4::from_axis_angle(axis, self.rotation_degrees.to_radians()),
            None => Mat4::IDENTITY,
        };
        rotation * Mat4::from_translation(self.translation)
    }

    /// The fixed camera.
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
    }

    /// Right-handed perspective with a `[-1, 1]` depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), ASPECT_RATIO, Z_NEAR, Z_FAR)
    }

    /// Computes all matrices for one frame.
    pub fn matrices(&self) -> Matrices {
        Matrices {
            model: self.model(),
            view: self.view(),
            projection: self.projection(),
        }
    }
}

/// The matrices of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Matrices {
    /// `projection * view`, uploaded as `uViewProj`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// The full model-view-projection product.
    pub fn mvp(&self) -> Mat4 {
        self.view_projection() * self.model
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec4};

    use super::*;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        assert!(a.abs_diff_eq(b, 1e-5), "\n{a:?}\n!=\n{b:?}");
    }

    #[test]
    fn default_state_is_identity_model() {
        let state = TransformState::default();
        assert_mat_eq(state.model(), Mat4::IDENTITY);
        assert_eq!(state.fov_degrees, 45.0);
        assert!(ROTATION_RANGE.contains(&state.rotation_degrees));
        assert!(FOV_RANGE.contains(&state.fov_degrees));
    }

    #[test]
    fn model_rotates_before_translating() {
        let state = TransformState {
            rotation_degrees: 90.0,
            rotation_axis: Vec3::Z,
            translation: Vec3::new(1.0, 0.0, 0.0),
            ..Default::default()
        };
        // The translation is expressed in the rotated frame, so +X ends up at +Y.
        let origin = state.model() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn model_matches_reference_composition() {
        let samples = [
            (-180.0, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.5, -0.5, 0.0)),
            (45.0, Vec3::new(0.3, -1.0, 0.7), Vec3::new(-1.0, 1.0, 1.0)),
            (137.5, Vec3::new(-1.0, -1.0, -1.0), Vec3::new(0.2, 0.0, -0.9)),
            (180.0, Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO),
        ];
        for (degrees, axis, translation) in samples {
            let state = TransformState {
                rotation_degrees: degrees,
                rotation_axis: axis,
                translation,
                ..Default::default()
            };
            let rotation = Quat::from_axis_angle(axis.normalize(), f32::to_radians(degrees));
            let expected = Mat4::from_quat(rotation) * Mat4::from_translation(translation);
            assert_mat_eq(state.model(), expected);
        }
    }

    #[test]
    fn zero_axis_skips_rotation() {
        let state = TransformState {
            rotation_degrees: 90.0,
            rotation_axis: Vec3::ZERO,
            translation: Vec3::new(0.0, 0.25, 0.0),
            ..Default::default()
        };
        let model = state.model();
        assert!(model.is_finite());
        assert_mat_eq(model, Mat4::from_translation(Vec3::new(0.0, 0.25, 0.0)));
    }

    #[test]
    fn view_pulls_camera_back() {
        let view = TransformState::default().view();
        assert_eq!(view.w_axis, Vec4::new(0.0, 0.0, -3.0, 1.0));
    }

    #[test]
    fn projection_at_45_degrees_matches_reference() {
        let projection = TransformState::default().projection();
        let f = 1.0 / (22.5f32).to_radians().tan();
        let expected = Mat4::from_cols(
            Vec4::new(f / (1024.0 / 568.0), 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, (Z_FAR + Z_NEAR) / (Z_NEAR - Z_FAR), -1.0),
            Vec4::new(0.0, 0.0, 2.0 * Z_FAR * Z_NEAR / (Z_NEAR - Z_FAR), 0.0),
        );
        assert_mat_eq(projection, expected);
        assert!((projection.x_axis.x - 1.339_134).abs() < 1e-4);
        assert!((projection.z_axis.z + 1.0002).abs() < 1e-4);
    }

    #[test]
    fn projection_is_finite_at_fov_extremes() {
        for fov in [*FOV_RANGE.start(), *FOV_RANGE.end()] {
            let state = TransformState {
                fov_degrees: fov,
                ..Default::default()
            };
            let matrices = state.matrices();
            assert!(matrices.projection.is_finite(), "fov {fov}");
            assert!(matrices.view_projection().is_finite(), "fov {fov}");
        }
    }

    #[test]
    fn view_projection_order() {
        let matrices = TransformState::default().matrices();
        assert_mat_eq(
            matrices.view_projection(),
            matrices.projection * matrices.view,
        );
        assert_mat_eq(
            matrices.mvp(),
            matrices.projection * matrices.view * matrices.model,
        );
    }
}
