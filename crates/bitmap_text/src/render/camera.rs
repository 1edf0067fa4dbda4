//! # Camera
//!
//! A look-at camera plus the read-only [`CameraSnapshot`] the presentation
//! pass consumes once per frame.
//!
//! # Coordinate System
//! Right-handed, Y-up world space. A camera at +Z looking at the origin has
//! direction -Z, left -X and up +Y.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// How the camera projects onto the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Perspective frustum; apparent size falls off with depth
    #[default]
    Perspective,
    /// Parallel projection; apparent size is independent of depth
    Orthographic,
}

/// 3D camera for perspective and orthographic projections
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians (perspective)
    pub fov: f32,

    /// Full vertical extent of the view volume in world units (orthographic)
    pub ortho_height: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    /// Projection used by this camera
    pub projection: ProjectionMode,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Example
    /// ```rust
    /// use bitmap_text::foundation::math::Vec3;
    /// use bitmap_text::render::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(0.0, 2.0, 5.0), 75.0, 0.1, 100.0);
    /// assert!(camera.fov > 1.3 && camera.fov < 1.31);
    /// ```
    pub fn perspective(position: Vec3, fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            ortho_height: 0.0,
            near,
            far,
            projection: ProjectionMode::Perspective,
        }
    }

    /// Create an orthographic camera looking at the origin
    pub fn orthographic(position: Vec3, height: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: 0.0,
            ortho_height: height,
            near,
            far,
            projection: ProjectionMode::Orthographic,
        }
    }

    /// Configure camera to look at a specific point with custom up vector
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }
}

impl Default for Camera {
    /// Perspective camera at (0, 3, 3) looking at the origin, 45° FOV, 0.1..1000
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 3.0, 3.0), 45.0, 0.1, 1000.0)
    }
}

/// Camera state captured for one frame
///
/// Frustum extents are measured on the near plane (`top`/`bottom`) the way a
/// symmetric frustum is usually described; for orthographic cameras they are
/// the half-extents of the view volume.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSnapshot {
    /// Camera position in world space
    pub position: Vec3,
    /// Unit view direction
    pub direction: Vec3,
    /// Unit vector pointing to the camera's left
    pub left: Vec3,
    /// Unit up vector, perpendicular to direction and left
    pub up: Vec3,
    /// Projection mode
    pub projection: ProjectionMode,
    /// Near plane distance
    pub frustum_near: f32,
    /// Far plane distance
    pub frustum_far: f32,
    /// Top extent of the frustum
    pub frustum_top: f32,
    /// Bottom extent of the frustum
    pub frustum_bottom: f32,
    /// Viewport height in pixels
    pub viewport_height: f32,
}

impl CameraSnapshot {
    /// Capture `camera` for a viewport `viewport_height` pixels tall
    ///
    /// If the view direction is parallel to the camera's up vector the left
    /// axis cannot be derived and is left at zero; the presentation pass
    /// treats that basis as degenerate.
    pub fn from_camera(camera: &Camera, viewport_height: f32) -> Self {
        let direction = (camera.target - camera.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));
        let left = camera.up.cross(&direction).try_normalize(f32::EPSILON);
        let (left, up) = match left {
            Some(left) => (left, direction.cross(&left)),
            None => (Vec3::zeros(), camera.up),
        };

        let top = match camera.projection {
            ProjectionMode::Perspective => camera.near * (camera.fov * 0.5).tan(),
            ProjectionMode::Orthographic => camera.ortho_height * 0.5,
        };

        Self {
            position: camera.position,
            direction,
            left,
            up,
            projection: camera.projection,
            frustum_near: camera.near,
            frustum_far: camera.far,
            frustum_top: top,
            frustum_bottom: -top,
            viewport_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_snapshot_basis_is_right_handed() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 90.0, 1.0, 100.0);
        let snapshot = CameraSnapshot::from_camera(&camera, 600.0);

        assert_relative_eq!(snapshot.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(snapshot.left, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(snapshot.up, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(snapshot.frustum_top, 1.0, epsilon = 1e-6);
        assert_relative_eq!(snapshot.frustum_bottom, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_orthographic_extents() {
        let camera = Camera::orthographic(Vec3::new(0.0, 0.0, 10.0), 8.0, 0.1, 50.0);
        let snapshot = CameraSnapshot::from_camera(&camera, 400.0);
        assert_eq!(snapshot.projection, ProjectionMode::Orthographic);
        assert_eq!(snapshot.frustum_top, 4.0);
        assert_eq!(snapshot.frustum_bottom, -4.0);
    }

    #[test]
    fn test_looking_along_up_leaves_left_zero() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 10.0, 0.0), 60.0, 0.1, 100.0);
        camera.look_at(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0));
        let snapshot = CameraSnapshot::from_camera(&camera, 600.0);
        assert_eq!(snapshot.left, Vec3::zeros());
    }
}
