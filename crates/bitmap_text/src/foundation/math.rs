//! Math utilities and types
//!
//! Provides the vector/matrix aliases used by layout and presentation, and the
//! spatial [`Transform`] a text entity is placed with.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (also used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Tolerance used when deciding whether a rotation matrix is orthonormal
pub const ORTHONORMAL_TOLERANCE: f32 = 1.0e-4;

/// Errors raised by transform mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// Scale can only be applied on top of a pure rotation
    #[error("cannot apply scale: rotation matrix is not orthonormal")]
    NonOrthonormalRotation,
}

/// Transform representing translation, rotation, and scale
///
/// The rotation is kept as a matrix rather than a quaternion so that a
/// camera-built basis can be checked (and repaired) column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub translation: Vec3,

    rotation: Mat3,

    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Mat3::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Current rotation matrix
    pub fn rotation(&self) -> &Mat3 {
        &self.rotation
    }

    /// Current scale factors
    pub fn scale(&self) -> &Vec3 {
        &self.scale
    }

    /// Replace the rotation matrix as-is
    pub fn set_rotation(&mut self, rotation: Mat3) {
        self.rotation = rotation;
    }

    /// Build a rotation whose columns are the given axes
    pub fn rotation_from_axes(x_axis: &Vec3, y_axis: &Vec3, z_axis: &Vec3) -> Mat3 {
        Mat3::from_columns(&[*x_axis, *y_axis, *z_axis])
    }

    /// Apply a scale on top of the current rotation
    ///
    /// Fails when the rotation is not orthonormal; the caller decides how to
    /// repair it (see [`Transform::renormalize_rotation_columns`]).
    pub fn set_scale(&mut self, scale: Vec3) -> Result<(), TransformError> {
        if !is_orthonormal(&self.rotation) {
            return Err(TransformError::NonOrthonormalRotation);
        }
        self.scale = scale;
        Ok(())
    }

    /// Normalize each rotation column independently
    ///
    /// Columns too short to normalize are left untouched.
    pub fn renormalize_rotation_columns(&mut self) {
        for mut column in self.rotation.column_iter_mut() {
            if let Some(unit) = column.try_normalize(f32::EPSILON) {
                column.copy_from(&unit);
            }
        }
    }

    /// Convert to a transformation matrix (T * R * S)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.translation + self.rotation * self.scale.component_mul(point)
    }
}

/// Whether `m` is orthonormal within [`ORTHONORMAL_TOLERANCE`]
pub fn is_orthonormal(m: &Mat3) -> bool {
    if m.iter().any(|v| !v.is_finite()) {
        return false;
    }
    approx::abs_diff_eq!(m.transpose() * m, Mat3::identity(), epsilon = ORTHONORMAL_TOLERANCE)
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}
