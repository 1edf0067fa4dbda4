//! Billboard orientation for text blocks

use crate::foundation::math::{is_orthonormal, Mat3, Transform};
use crate::render::CameraSnapshot;

/// Result of trying to face the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillboardOutcome {
    /// The camera basis was applied
    Applied,
    /// The camera basis was not orthonormal; the previous rotation was kept
    /// with its columns renormalized
    Degenerate,
}

/// Rotation that lays the text plane across the camera's view
///
/// Text is authored in the local XZ plane, so the basis is
/// `[right | direction | up]`: X runs along the screen's right, Y points into
/// the screen and Z maps to the screen's up.
pub fn calculate_screen_aligned_rotation(camera: &CameraSnapshot) -> Mat3 {
    Transform::rotation_from_axes(&-camera.left, &camera.direction, &camera.up)
}

/// Rotate `transform` to face the camera
///
/// A non-orthonormal camera basis (for example a view direction parallel to
/// the up vector) never reaches the transform; the existing rotation is
/// repaired instead, so one bad frame cannot corrupt the entity.
pub fn face_camera(transform: &mut Transform, camera: &CameraSnapshot) -> BillboardOutcome {
    let rotation = calculate_screen_aligned_rotation(camera);
    if is_orthonormal(&rotation) {
        transform.set_rotation(rotation);
        BillboardOutcome::Applied
    } else {
        transform.renormalize_rotation_columns();
        BillboardOutcome::Degenerate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::ProjectionMode;
    use approx::assert_relative_eq;

    fn snapshot(direction: Vec3, left: Vec3, up: Vec3) -> CameraSnapshot {
        CameraSnapshot {
            position: Vec3::new(0.0, 0.0, 10.0),
            direction,
            left,
            up,
            projection: ProjectionMode::Perspective,
            frustum_near: 1.0,
            frustum_far: 100.0,
            frustum_top: 1.0,
            frustum_bottom: -1.0,
            viewport_height: 600.0,
        }
    }

    #[test]
    fn test_screen_aligned_basis() {
        let camera = snapshot(-Vec3::z(), -Vec3::x(), Vec3::y());
        let mut transform = Transform::identity();

        assert_eq!(face_camera(&mut transform, &camera), BillboardOutcome::Applied);
        let rotation = transform.rotation();
        assert_relative_eq!(rotation.column(0).into_owned(), Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(rotation.column(1).into_owned(), -Vec3::z(), epsilon = 1e-6);
        assert_relative_eq!(rotation.column(2).into_owned(), Vec3::y(), epsilon = 1e-6);
        assert_relative_eq!(rotation.determinant(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_direction_parallel_to_up_keeps_previous_rotation() {
        let mut transform = Transform::identity();
        let previous = Mat3::from_columns(&[Vec3::x() * 2.0, Vec3::y() * 0.5, Vec3::z()]);
        transform.set_rotation(previous);

        let camera = snapshot(Vec3::y(), Vec3::zeros(), Vec3::y());
        assert_eq!(face_camera(&mut transform, &camera), BillboardOutcome::Degenerate);
        assert_relative_eq!(*transform.rotation(), Mat3::identity(), epsilon = 1e-6);
    }
}
