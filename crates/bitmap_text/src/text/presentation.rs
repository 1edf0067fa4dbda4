//! Per-frame scale and fade policies
//!
//! Each frame the text entity samples its depth in the camera frustum and
//! derives a scale factor and an alpha from it. The formulas for each mode
//! family live in exactly one function ([`resolve_scale`], [`resolve_alpha`])
//! so every caller evaluates them the same way.

use serde::{Deserialize, Serialize};

use super::billboard::{self, BillboardOutcome};
use super::error::TextError;
use crate::foundation::math::{Transform, Vec3, Vec4};
use crate::render::{CameraSnapshot, ProjectionMode};

/// Below this alpha a frame is not worth drawing
pub const MIN_VISIBLE_ALPHA: f32 = 0.05;

/// Scaling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AutoScale {
    /// Fixed world size: one font point maps to `font_scale / point_size` units
    Off,
    /// Keep the font's native point size on screen at any distance
    FixedScreenSize,
    /// Shrink with distance like regular geometry, but never grow past the
    /// native point size when close
    #[default]
    CapScreenSize,
}

/// Fading policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AutoFade {
    /// No fading
    Off,
    /// Fade linearly across a camera distance range
    DistanceRange,
    /// Fade once the text renders smaller than a fixed pixel size
    #[default]
    FixedPixelSize,
    /// Fade once the text renders smaller than its native point size
    CapScreenSize,
}

/// Parameters shared by the fade modes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeParams {
    /// Pixel size below which [`AutoFade::FixedPixelSize`] starts fading
    pub fixed_pixel_threshold: u32,
    /// How quickly screen-size fades reach zero: 0 is instant, 1 is about
    /// half size
    pub falloff: f32,
    /// `(near, far)`: opaque closer than near, transparent beyond far
    pub distance_range: (f32, f32),
}

impl Default for FadeParams {
    fn default() -> Self {
        Self {
            fixed_pixel_threshold: 14,
            falloff: 0.7,
            distance_range: (50.0, 75.0),
        }
    }
}

/// Where the entity sits in the camera frustum this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthSample {
    /// Depth along the view direction
    pub z_depth: f32,
    /// Straight-line distance to the camera
    pub distance: f32,
    /// World units per pixel at that depth, times two
    pub depth_scale: f32,
}

/// Sample the entity's depth; `None` when it lies outside `[near, far]`
///
/// A viewport with no height also yields `None`.
pub fn sample_depth(camera: &CameraSnapshot, entity_position: &Vec3) -> Option<DepthSample> {
    let to_entity = entity_position - camera.position;
    let z_depth = camera.direction.dot(&to_entity);
    if !(camera.frustum_near..=camera.frustum_far).contains(&z_depth) || camera.viewport_height <= 0.0 {
        return None;
    }

    let height_at_z = match camera.projection {
        ProjectionMode::Orthographic => camera.frustum_bottom.abs(),
        ProjectionMode::Perspective => z_depth * camera.frustum_top / camera.frustum_near,
    };
    let pixel_ratio = height_at_z / camera.viewport_height;

    Some(DepthSample {
        z_depth,
        distance: to_entity.norm(),
        depth_scale: 2.0 * pixel_ratio,
    })
}

/// Scale at which one font point covers one pixel at the given bias
pub fn cap_size(font_scale: f32, point_size: f32) -> f32 {
    1.0 / (font_scale * point_size)
}

/// Scale factor for `mode`, or `None` when the mode leaves scale alone
pub fn resolve_scale(mode: AutoScale, depth_scale: f32, cap_size: f32, font_scale: f32) -> Option<f32> {
    match mode {
        AutoScale::Off => None,
        AutoScale::FixedScreenSize => Some(depth_scale * font_scale),
        AutoScale::CapScreenSize => Some(depth_scale.min(cap_size) * font_scale),
    }
}

/// Fade toward zero as the text gets smaller than `threshold` allows
///
/// `threshold` and `depth_scale` are both in scale units; the text is too
/// small once `depth_scale` exceeds the threshold.
pub fn screen_size_alpha(threshold: f32, depth_scale: f32, falloff: f32, base_alpha: f32) -> f32 {
    if threshold < depth_scale {
        let unit = (depth_scale - threshold) / threshold;
        let f = falloff - unit;
        let f = if f < 0.0 { 0.0 } else { f / falloff };
        base_alpha * f
    } else {
        base_alpha
    }
}

/// Linear fade across `(near, far)` camera distances
pub fn distance_alpha(range: (f32, f32), distance: f32, base_alpha: f32) -> f32 {
    let (near, far) = range;
    let alpha = if distance > far {
        0.0
    } else if distance > near {
        1.0 - (distance - near) / (far - near)
    } else {
        1.0
    };
    base_alpha * alpha
}

/// Alpha for `mode`, or `current_alpha` when the mode is [`AutoFade::Off`]
pub fn resolve_alpha(
    mode: AutoFade,
    params: &FadeParams,
    sample: &DepthSample,
    cap_size: f32,
    base_alpha: f32,
    current_alpha: f32,
) -> f32 {
    match mode {
        AutoFade::Off => current_alpha,
        AutoFade::DistanceRange => distance_alpha(params.distance_range, sample.distance, base_alpha),
        AutoFade::FixedPixelSize => screen_size_alpha(
            1.0 / params.fixed_pixel_threshold as f32,
            sample.depth_scale,
            params.falloff,
            base_alpha,
        ),
        AutoFade::CapScreenSize => screen_size_alpha(cap_size, sample.depth_scale, params.falloff, base_alpha),
    }
}

/// Presentation settings and the values derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    /// Scale bias; world size multiplier when auto-scale is off
    pub font_scale: f32,
    /// Scaling policy
    pub auto_scale: AutoScale,
    /// Fading policy
    pub auto_fade: AutoFade,
    /// Fade parameters
    pub fade: FadeParams,
    /// Billboard toward the camera every frame
    pub auto_rotate: bool,
    /// Base color; fades multiply its alpha
    pub text_color: Vec4,
    /// Color the text is currently drawn with
    pub tint: Vec4,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            auto_scale: AutoScale::default(),
            auto_fade: AutoFade::default(),
            fade: FadeParams::default(),
            auto_rotate: true,
            text_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            tint: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl PresentationState {
    /// Alpha currently drawn with
    pub fn current_alpha(&self) -> f32 {
        self.tint.w
    }

    /// Replace the base color and reset the tint to it
    pub fn set_text_color(&mut self, color: Vec4) {
        self.text_color = color;
        self.tint = color;
    }
}

/// Applies the presentation policies to an entity transform
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationController {
    state: PresentationState,
}

impl PresentationController {
    /// Create a controller with default policies
    pub fn new(state: PresentationState) -> Self {
        Self { state }
    }

    /// Current settings
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Mutable settings
    pub fn state_mut(&mut self) -> &mut PresentationState {
        &mut self.state
    }

    /// Whether the per-frame scale/alpha update has anything to do
    pub fn is_dynamic(&self) -> bool {
        !(self.state.auto_scale == AutoScale::Off && self.state.auto_fade == AutoFade::Off)
    }

    /// Apply the fixed world scale used when auto-scale is off
    ///
    /// Does nothing for the automatic modes, which set scale every frame.
    pub fn apply_static_scale(&self, transform: &mut Transform, point_size: f32) {
        if self.state.auto_scale == AutoScale::Off {
            let scale = self.state.font_scale / point_size;
            apply_scale(transform, scale);
        }
    }

    /// Update scale and alpha for this frame
    ///
    /// Returns the new alpha when it changed. Frames where the entity is
    /// outside the frustum change nothing.
    pub fn update_scale_and_alpha(
        &mut self,
        camera: &CameraSnapshot,
        transform: &mut Transform,
        point_size: f32,
    ) -> Option<f32> {
        let Some(sample) = sample_depth(camera, &transform.translation) else {
            log::trace!("Text outside frustum, keeping scale and alpha");
            return None;
        };

        let cap = cap_size(self.state.font_scale, point_size);
        if let Some(scale) = resolve_scale(self.state.auto_scale, sample.depth_scale, cap, self.state.font_scale) {
            apply_scale(transform, scale);
        }

        let old_alpha = self.state.current_alpha();
        let new_alpha = resolve_alpha(
            self.state.auto_fade,
            &self.state.fade,
            &sample,
            cap,
            self.state.text_color.w,
            old_alpha,
        );
        self.state.tint = self.state.text_color;
        self.state.tint.w = new_alpha;

        #[allow(clippy::float_cmp)]
        let changed = new_alpha != old_alpha;
        changed.then_some(new_alpha)
    }

    /// Billboard toward the camera if auto-rotate is on
    pub fn correct_transform(&self, camera: &CameraSnapshot, transform: &mut Transform, name: &str) {
        if self.state.auto_rotate && billboard::face_camera(transform, camera) == BillboardOutcome::Degenerate {
            log::warn!("Text '{}': non-orthonormal billboard rotation, keeping previous orientation", name);
        }
    }
}

/// Set a uniform scale with the depth axis flipped
///
/// A rotation that cannot take the scale is repaired column by column first;
/// the error that forced the repair is returned.
fn apply_scale(transform: &mut Transform, scale: f32) -> Option<TextError> {
    let scale = Vec3::new(scale, scale, -scale);
    let err = TextError::from(transform.set_scale(scale).err()?);
    log::warn!("{}; renormalizing rotation columns", err);
    transform.renormalize_rotation_columns();
    if transform.set_scale(scale).is_err() {
        log::warn!("Rotation still degenerate after renormalizing, scale left unchanged");
    }
    Some(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat3, TransformError};
    use approx::assert_relative_eq;

    fn camera(projection: ProjectionMode) -> CameraSnapshot {
        CameraSnapshot {
            position: Vec3::zeros(),
            direction: -Vec3::z(),
            left: -Vec3::x(),
            up: Vec3::y(),
            projection,
            frustum_near: 1.0,
            frustum_far: 1000.0,
            frustum_top: 0.5,
            frustum_bottom: -0.5,
            viewport_height: 500.0,
        }
    }

    #[test]
    fn test_distance_range_fade() {
        let range = (50.0, 75.0);
        assert_eq!(distance_alpha(range, 50.0, 1.0), 1.0);
        assert_eq!(distance_alpha(range, 10.0, 1.0), 1.0);
        assert_eq!(distance_alpha(range, 75.0, 1.0), 0.0);
        assert_eq!(distance_alpha(range, 90.0, 1.0), 0.0);
        assert_relative_eq!(distance_alpha(range, 62.5, 1.0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(distance_alpha(range, 62.5, 0.5), 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_cap_screen_size_boundary_is_not_clamped() {
        let point_size = 32.0;
        let font_scale = 2.0;
        let cap = cap_size(font_scale, point_size);
        let depth_scale = 0.5 / 32.0;
        assert_eq!(cap, depth_scale);

        let scale = resolve_scale(AutoScale::CapScreenSize, depth_scale, cap, font_scale).unwrap();
        assert_eq!(scale, cap * font_scale);
    }

    #[test]
    fn test_scale_modes() {
        let cap = 0.01;
        assert_eq!(resolve_scale(AutoScale::Off, 0.5, cap, 1.0), None);
        assert_eq!(resolve_scale(AutoScale::FixedScreenSize, 0.5, cap, 2.0), Some(1.0));
        assert_eq!(resolve_scale(AutoScale::CapScreenSize, 0.5, cap, 2.0), Some(0.02));
        assert_eq!(resolve_scale(AutoScale::CapScreenSize, 0.005, cap, 2.0), Some(0.01));
    }

    #[test]
    fn test_screen_size_curve() {
        // large enough on screen: base alpha
        assert_eq!(screen_size_alpha(0.1, 0.05, 0.7, 0.8), 0.8);
        assert_eq!(screen_size_alpha(0.1, 0.1, 0.7, 0.8), 0.8);
        // 20% too small with falloff 0.5: (0.5 - 0.2) / 0.5
        assert_relative_eq!(screen_size_alpha(0.1, 0.12, 0.5, 1.0), 0.6, epsilon = 1e-5);
        // way too small
        assert_eq!(screen_size_alpha(0.1, 1.0, 0.7, 1.0), 0.0);
        // zero falloff is instant
        assert_eq!(screen_size_alpha(0.1, 0.11, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_sample_depth_culls_outside_frustum() {
        let camera = camera(ProjectionMode::Perspective);
        assert!(sample_depth(&camera, &Vec3::new(0.0, 0.0, 5.0)).is_none());
        assert!(sample_depth(&camera, &Vec3::new(0.0, 0.0, -0.5)).is_none());
        assert!(sample_depth(&camera, &Vec3::new(0.0, 0.0, -2000.0)).is_none());

        let sample = sample_depth(&camera, &Vec3::new(3.0, 0.0, -4.0)).unwrap();
        assert_eq!(sample.z_depth, 4.0);
        assert_eq!(sample.distance, 5.0);
        // 4 * 0.5 / 1 = 2 world units tall over 500 px, doubled
        assert_relative_eq!(sample.depth_scale, 2.0 * 2.0 / 500.0, epsilon = 1e-7);
    }

    #[test]
    fn test_orthographic_depth_scale_ignores_depth() {
        let camera = camera(ProjectionMode::Orthographic);
        let near = sample_depth(&camera, &Vec3::new(0.0, 0.0, -2.0)).unwrap();
        let far = sample_depth(&camera, &Vec3::new(0.0, 0.0, -200.0)).unwrap();
        assert_eq!(near.depth_scale, far.depth_scale);
        assert_relative_eq!(near.depth_scale, 2.0 * 0.5 / 500.0, epsilon = 1e-7);
    }

    #[test]
    fn test_update_reports_alpha_only_on_change() {
        let mut controller = PresentationController::new(PresentationState {
            auto_fade: AutoFade::DistanceRange,
            ..Default::default()
        });
        let camera = camera(ProjectionMode::Perspective);
        let mut transform = Transform::from_translation(Vec3::new(0.0, 0.0, -62.5));

        let alpha = controller.update_scale_and_alpha(&camera, &mut transform, 32.0);
        assert_relative_eq!(alpha.unwrap(), 0.5, epsilon = 1e-6);
        assert_eq!(controller.update_scale_and_alpha(&camera, &mut transform, 32.0), None);

        let scale = *transform.scale();
        assert!(scale.x > 0.0);
        assert_eq!(scale.x, scale.y);
        assert_eq!(scale.z, -scale.x);
    }

    #[test]
    fn test_off_modes_leave_alpha_alone() {
        let mut controller = PresentationController::new(PresentationState {
            auto_scale: AutoScale::Off,
            auto_fade: AutoFade::Off,
            ..Default::default()
        });
        assert!(!controller.is_dynamic());

        let mut transform = Transform::from_translation(Vec3::new(0.0, 0.0, -10.0));
        controller.apply_static_scale(&mut transform, 32.0);
        assert_eq!(*transform.scale(), Vec3::new(1.0 / 32.0, 1.0 / 32.0, -1.0 / 32.0));

        let camera = camera(ProjectionMode::Perspective);
        assert_eq!(controller.update_scale_and_alpha(&camera, &mut transform, 32.0), None);
        assert_eq!(*transform.scale(), Vec3::new(1.0 / 32.0, 1.0 / 32.0, -1.0 / 32.0));
    }

    #[test]
    fn test_scale_repairs_skewed_rotation() {
        let controller = PresentationController::new(PresentationState {
            auto_scale: AutoScale::Off,
            font_scale: 2.0,
            ..Default::default()
        });
        let mut transform = Transform::identity();
        transform.set_rotation(Mat3::from_columns(&[Vec3::x() * 3.0, Vec3::y(), Vec3::z() * 0.25]));

        controller.apply_static_scale(&mut transform, 4.0);
        assert_relative_eq!(*transform.rotation(), Mat3::identity(), epsilon = 1e-6);
        assert_eq!(*transform.scale(), Vec3::new(0.5, 0.5, -0.5));
    }

    #[test]
    fn test_apply_scale_reports_degenerate_rotation() {
        let mut transform = Transform::identity();
        assert!(apply_scale(&mut transform, 0.5).is_none());

        transform.set_rotation(Mat3::from_columns(&[Vec3::x(), Vec3::y() * 2.0, Vec3::z()]));
        let err = apply_scale(&mut transform, 0.25);
        assert!(matches!(
            err,
            Some(TextError::DegenerateTransform(TransformError::NonOrthonormalRotation))
        ));
        assert_eq!(*transform.scale(), Vec3::new(0.25, 0.25, -0.25));
    }
}
