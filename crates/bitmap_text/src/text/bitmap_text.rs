//! The text entity
//!
//! [`BitmapText`] owns a string, the font it is set in, the measured block
//! and the quad geometry, plus the presentation state that adapts the block
//! to the camera every frame. Any change that affects layout rebuilds the
//! whole block; the draw pass only touches transform and tint.

use std::fmt;
use std::sync::Arc;

use super::align::{Align, Justify};
use super::cursor;
use super::error::{TextError, TextResult};
use super::geometry::{AccessMode, GeometryBuffer};
use super::listener::{ChangeNotifier, ListenerId, TextChangeListener};
use super::mesh_builder::{QuadLayout, QuadMeshBuilder};
use super::metrics::TextMetrics;
use super::presentation::{
    AutoFade, AutoScale, FadeParams, PresentationController, PresentationState, MIN_VISIBLE_ALPHA,
};
use crate::font::SharedFont;
use crate::foundation::math::{Transform, Vec2, Vec4};
use crate::render::{BlendMode, CameraSnapshot, GeometrySink, TextDrawCall};

/// A block of bitmap-font text placed in the scene
pub struct BitmapText {
    name: String,
    text: String,
    font: Option<SharedFont>,
    metrics: TextMetrics,
    builder: QuadMeshBuilder,
    layout: QuadLayout,
    controller: PresentationController,
    transform: Transform,
    use_blend: bool,
    notifier: ChangeNotifier,
}

impl fmt::Debug for BitmapText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitmapText")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("line_count", &self.metrics.line_count())
            .field("size", &self.metrics.size())
            .field("align", &self.layout.align)
            .field("justify", &self.layout.justify)
            .field("listeners", &self.notifier.len())
            .finish_non_exhaustive()
    }
}

impl BitmapText {
    /// Create a text entity anchored south-west with left justification
    ///
    /// Without a font the entity stays empty until [`BitmapText::set_font`]
    /// is called.
    pub fn new(name: impl Into<String>, text: &str, font: Option<SharedFont>) -> TextResult<Self> {
        Self::with_layout(name, text, font, Align::default(), Justify::default())
    }

    /// Create a text entity with explicit alignment and justification
    pub fn with_layout(
        name: impl Into<String>,
        text: &str,
        font: Option<SharedFont>,
        align: Align,
        justify: Justify,
    ) -> TextResult<Self> {
        let extra_spacing = font.as_deref().map_or(0, cursor::extra_spacing_for);
        let mut entity = Self {
            name: name.into(),
            text: String::new(),
            font,
            metrics: TextMetrics::new(),
            builder: QuadMeshBuilder::new(),
            layout: QuadLayout {
                align,
                justify,
                extra_spacing,
                ..Default::default()
            },
            controller: PresentationController::default(),
            transform: Transform::identity(),
            use_blend: true,
            notifier: ChangeNotifier::new(),
        };
        entity.set_text(text)?;
        Ok(entity)
    }

    /// Replace the string and rebuild the geometry
    ///
    /// Does nothing while no font is attached.
    pub fn set_text(&mut self, text: &str) -> TextResult<()> {
        if self.font.is_none() {
            log::debug!("Text '{}': no font attached, ignoring set_text", self.name);
            return Ok(());
        }
        text.clone_into(&mut self.text);
        self.rebuild()
    }

    fn rebuild(&mut self) -> TextResult<()> {
        let Some(font) = self.font.as_deref() else {
            return Ok(());
        };
        self.metrics.measure(&self.text, font, self.layout.extra_spacing);
        self.builder.build(&self.text, font, &self.metrics, &self.layout)?;
        log::trace!(
            "Text '{}' rebuilt: {} lines, size {:?}",
            self.name,
            self.metrics.line_count(),
            self.metrics.size()
        );
        self.notifier.notify_size_changed(&self.name, self.metrics.size());
        Ok(())
    }

    fn point_size(&self) -> TextResult<f32> {
        self.font
            .as_ref()
            .map(|font| font.point_size())
            .ok_or_else(|| TextError::MissingFont(self.name.clone()))
    }

    fn apply_static_scale(&mut self) {
        if let Some(font) = self.font.as_deref() {
            self.controller.apply_static_scale(&mut self.transform, font.point_size());
        }
    }

    /// Set the anchor and rebuild
    pub fn set_align(&mut self, align: Align) -> TextResult<()> {
        self.layout.align = align;
        self.rebuild()
    }

    /// Set per-line justification and rebuild
    pub fn set_justify(&mut self, justify: Justify) -> TextResult<()> {
        self.layout.justify = justify;
        self.rebuild()
    }

    /// Offset the block from its anchor, in font units
    ///
    /// The offset is stored in pixels, so it needs the font's point size.
    pub fn set_fixed_offset(&mut self, x: f32, y: f32) -> TextResult<()> {
        let point_size = self.point_size()?;
        self.layout.fixed_offset = Vec2::new(x * point_size, y * point_size);
        self.rebuild()
    }

    /// Replace the font, re-apply the scale and rebuild
    pub fn set_font(&mut self, font: SharedFont) -> TextResult<()> {
        self.layout.extra_spacing = cursor::extra_spacing_for(font.as_ref());
        self.font = Some(font);
        self.apply_static_scale();
        self.rebuild()
    }

    /// Set the scaling policy
    pub fn set_auto_scale(&mut self, auto_scale: AutoScale) {
        self.controller.state_mut().auto_scale = auto_scale;
        self.apply_static_scale();
    }

    /// Set the scale bias
    ///
    /// With auto-scale on this biases the screen size (0.95 sharpens a
    /// bilinear-filtered font a little). With auto-scale off, 1.0 makes a
    /// character roughly one world unit tall whatever the point size.
    pub fn set_font_scale(&mut self, font_scale: f32) {
        self.controller.state_mut().font_scale = font_scale;
        self.apply_static_scale();
    }

    /// Set the fading policy
    pub fn set_auto_fade(&mut self, auto_fade: AutoFade) {
        self.controller.state_mut().auto_fade = auto_fade;
    }

    /// Pixel size below which [`AutoFade::FixedPixelSize`] starts fading
    pub fn set_auto_fade_fixed_pixel_size(&mut self, pixels: u32) {
        self.controller.state_mut().fade.fixed_pixel_threshold = pixels;
    }

    /// How fast screen-size fades reach zero; useful range is about 0 to 2
    pub fn set_auto_fade_falloff(&mut self, falloff: f32) {
        self.controller.state_mut().fade.falloff = falloff;
    }

    /// Opaque closer than `near_opaque`, transparent beyond `far_transparent`
    pub fn set_auto_fade_distance_range(&mut self, near_opaque: f32, far_transparent: f32) {
        self.controller.state_mut().fade.distance_range = (near_opaque, far_transparent);
    }

    /// Billboard toward the camera every frame
    pub fn set_auto_rotate(&mut self, auto_rotate: bool) {
        self.controller.state_mut().auto_rotate = auto_rotate;
    }

    /// Set the base color; fades scale its alpha
    pub fn set_text_color(&mut self, color: Vec4) {
        self.controller.state_mut().set_text_color(color);
    }

    /// Alpha blending when true, alpha test only when false
    pub fn set_use_blend(&mut self, use_blend: bool) {
        self.use_blend = use_blend;
    }

    /// Upload hint passed with the geometry
    pub fn set_access_mode(&mut self, access_mode: AccessMode) {
        self.builder.set_access_mode(access_mode);
    }

    /// Register a listener; registering twice returns the same id
    pub fn add_change_listener(&mut self, listener: Arc<dyn TextChangeListener>) -> ListenerId {
        self.notifier.add(listener)
    }

    /// Unregister a listener; returns whether it was registered
    pub fn remove_change_listener(&mut self, listener: &Arc<dyn TextChangeListener>) -> bool {
        self.notifier.remove(listener)
    }

    /// Unregister a listener by id
    pub fn remove_change_listener_by_id(&mut self, id: ListenerId) -> bool {
        self.notifier.remove_by_id(id)
    }

    /// Run the per-frame presentation pass and submit the geometry
    ///
    /// Returns whether a draw call reached the sink. Nothing is drawn without
    /// a font, for an empty string, or when the faded alpha is too low to see.
    pub fn draw(&mut self, camera: &CameraSnapshot, sink: &mut dyn GeometrySink) -> bool {
        let Some(font) = self.font.as_deref() else {
            return false;
        };
        if self.text.is_empty() {
            return false;
        }

        if self.controller.is_dynamic() {
            let point_size = font.point_size();
            if let Some(alpha) = self.controller.update_scale_and_alpha(camera, &mut self.transform, point_size) {
                self.notifier.notify_alpha_changed(&self.name, alpha);
            }
        }

        if self.controller.state().current_alpha() <= MIN_VISIBLE_ALPHA {
            log::trace!("Text '{}' faded out, skipping draw", self.name);
            return false;
        }

        self.controller.correct_transform(camera, &mut self.transform, &self.name);
        sink.submit(&TextDrawCall {
            name: &self.name,
            positions: self.builder.positions(),
            tex_coords: self.builder.tex_coords(),
            access_mode: self.builder.access_mode(),
            world_matrix: self.transform.to_matrix(),
            tint: self.controller.state().tint,
            blend: self.blend_mode(),
        });
        true
    }

    /// Duplicate every property and the geometry, without the listeners
    pub fn make_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            text: self.text.clone(),
            font: self.font.clone(),
            metrics: self.metrics.clone(),
            builder: self.builder.clone(),
            layout: self.layout,
            controller: self.controller.clone(),
            transform: self.transform.clone(),
            use_blend: self.use_blend,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Entity name, passed to listeners and sinks
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current string
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attached font
    pub fn font(&self) -> Option<&SharedFont> {
        self.font.as_ref()
    }

    /// Anchor
    pub fn align(&self) -> Align {
        self.layout.align
    }

    /// Per-line justification
    pub fn justify(&self) -> Justify {
        self.layout.justify
    }

    /// Offset from the anchor in pixels
    pub fn fixed_offset(&self) -> Vec2 {
        self.layout.fixed_offset
    }

    /// Extra advance added after every glyph
    pub fn extra_spacing(&self) -> u32 {
        self.layout.extra_spacing
    }

    /// Block size in font pixels
    pub fn size(&self) -> Vec2 {
        self.metrics.size()
    }

    /// Number of lines in the block
    pub fn line_count(&self) -> usize {
        self.metrics.line_count()
    }

    /// Measured widths of each line
    pub fn line_widths(&self) -> &[f32] {
        self.metrics.line_widths()
    }

    /// Block width in world units
    pub fn width(&self) -> f32 {
        self.metrics.size().x * self.transform.scale().x
    }

    /// Block height in world units
    pub fn height(&self) -> f32 {
        self.metrics.size().y * self.transform.scale().y
    }

    /// Presentation settings
    pub fn presentation(&self) -> &PresentationState {
        self.controller.state()
    }

    /// Scaling policy
    pub fn auto_scale(&self) -> AutoScale {
        self.controller.state().auto_scale
    }

    /// Scale bias
    pub fn font_scale(&self) -> f32 {
        self.controller.state().font_scale
    }

    /// Fading policy
    pub fn auto_fade(&self) -> AutoFade {
        self.controller.state().auto_fade
    }

    /// Fade parameters
    pub fn fade_params(&self) -> &FadeParams {
        &self.controller.state().fade
    }

    /// Whether the entity billboards toward the camera
    pub fn auto_rotate(&self) -> bool {
        self.controller.state().auto_rotate
    }

    /// Base color
    pub fn text_color(&self) -> Vec4 {
        self.controller.state().text_color
    }

    /// Color the text is drawn with, including the faded alpha
    pub fn tint(&self) -> Vec4 {
        self.controller.state().tint
    }

    /// Whether alpha blending is used
    pub fn use_blend(&self) -> bool {
        self.use_blend
    }

    /// Blend handling for draw calls
    pub fn blend_mode(&self) -> BlendMode {
        if self.use_blend {
            BlendMode::AlphaBlend
        } else {
            BlendMode::AlphaTest
        }
    }

    /// Placement in the world
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable placement in the world
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Vertex positions, limited to the live vertex count
    pub fn positions(&self) -> &GeometryBuffer {
        self.builder.positions()
    }

    /// Texture coordinates, limited to the live vertex count
    pub fn tex_coords(&self) -> &GeometryBuffer {
        self.builder.tex_coords()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.notifier.len()
    }
}
