//! Text style configuration

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec4;
use crate::text::{AccessMode, Align, AutoFade, AutoScale, BitmapText, FadeParams, Justify, TextResult};

/// Presentation and layout defaults for text entities
///
/// ```toml
/// align = "Center"
/// justify = "Center"
/// auto_scale = "CapScreenSize"
/// font_scale = 0.95
/// auto_fade = "DistanceRange"
/// distance_range = [20.0, 40.0]
/// color = [1.0, 0.8, 0.2, 1.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyleConfig {
    /// Block anchor
    pub align: Align,
    /// Per-line justification
    pub justify: Justify,
    /// Scaling policy
    pub auto_scale: AutoScale,
    /// Scale bias, or world size when auto-scale is off
    pub font_scale: f32,
    /// Fading policy
    pub auto_fade: AutoFade,
    /// Pixel size below which fixed-pixel fading starts
    pub fixed_pixel_threshold: u32,
    /// Screen-size fade falloff
    pub falloff: f32,
    /// Opaque and transparent camera distances
    pub distance_range: (f32, f32),
    /// Billboard toward the camera
    pub auto_rotate: bool,
    /// Alpha blending (true) or alpha test (false)
    pub use_blend: bool,
    /// Base RGBA color
    pub color: [f32; 4],
    /// Upload hint for the geometry
    pub access_mode: AccessMode,
}

impl Default for TextStyleConfig {
    fn default() -> Self {
        let fade = FadeParams::default();
        Self {
            align: Align::default(),
            justify: Justify::default(),
            auto_scale: AutoScale::default(),
            font_scale: 1.0,
            auto_fade: AutoFade::default(),
            fixed_pixel_threshold: fade.fixed_pixel_threshold,
            falloff: fade.falloff,
            distance_range: fade.distance_range,
            auto_rotate: true,
            use_blend: true,
            color: [1.0; 4],
            access_mode: AccessMode::default(),
        }
    }
}

impl Config for TextStyleConfig {}

impl TextStyleConfig {
    /// Reject values the presentation pass cannot use sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.font_scale.is_finite() && self.font_scale > 0.0) {
            return Err(ConfigError::Validation(format!(
                "font_scale must be positive, got {}",
                self.font_scale
            )));
        }
        if self.fixed_pixel_threshold == 0 {
            return Err(ConfigError::Validation("fixed_pixel_threshold must be at least 1".to_string()));
        }
        if self.falloff.is_nan() || self.falloff < 0.0 {
            return Err(ConfigError::Validation(format!(
                "falloff must not be negative, got {}",
                self.falloff
            )));
        }
        let (near, far) = self.distance_range;
        if near.is_nan() || far.is_nan() || near >= far {
            return Err(ConfigError::Validation(format!(
                "distance_range must have near < far, got ({near}, {far})"
            )));
        }
        if self.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::Validation(format!("color components must be in [0, 1], got {:?}", self.color)));
        }
        Ok(())
    }

    /// Base color as a vector
    pub fn color(&self) -> Vec4 {
        Vec4::from(self.color)
    }

    /// Apply every setting to `text`, rebuilding its geometry once per layout change
    pub fn apply_to(&self, text: &mut BitmapText) -> TextResult<()> {
        text.set_auto_scale(self.auto_scale);
        text.set_font_scale(self.font_scale);
        text.set_auto_fade(self.auto_fade);
        text.set_auto_fade_fixed_pixel_size(self.fixed_pixel_threshold);
        text.set_auto_fade_falloff(self.falloff);
        text.set_auto_fade_distance_range(self.distance_range.0, self.distance_range.1);
        text.set_auto_rotate(self.auto_rotate);
        text.set_use_blend(self.use_blend);
        text.set_text_color(self.color());
        text.set_access_mode(self.access_mode);
        text.set_align(self.align)?;
        text.set_justify(self.justify)
    }
}
