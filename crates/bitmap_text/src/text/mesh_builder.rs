//! Quad emission for measured text
//!
//! Converts a measured string into two triangles per code point. Printable
//! glyphs get a textured quad; line feeds, tabs and glyphs missing from the
//! font get an all-zero quad so vertex `6 * i` always belongs to code point
//! `i`.
//!
//! # Layout Coordinate System
//!
//! Text is laid out in the local XZ plane (y = 0):
//! - +X runs along the line
//! - +Z runs down the block, one line height per line
//!
//! The presentation pass flips Z with a negative scale so the block reads
//! top-to-bottom once billboarded.

use super::align::{Align, Justify};
use super::cursor::{self, CursorStep};
use super::error::TextResult;
use super::geometry::{AccessMode, GeometryBuffer};
use super::metrics::TextMetrics;
use crate::font::{FontMetrics, GlyphMetric};
use crate::foundation::math::{Vec2, Vec3};

/// Vertices emitted per code point (two triangles)
pub const VERTICES_PER_QUAD: usize = 6;

/// Buffers grow in steps of this many vertices
pub const CHUNK_VERTICES: usize = 30;

/// Placement inputs for one build pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadLayout {
    /// Block anchor
    pub align: Align,
    /// Per-line justification
    pub justify: Justify,
    /// Extra anchor shift in pixels
    pub fixed_offset: Vec2,
    /// Extra spacing added after every glyph
    pub extra_spacing: u32,
}

impl Default for QuadLayout {
    fn default() -> Self {
        Self {
            align: Align::default(),
            justify: Justify::default(),
            fixed_offset: Vec2::zeros(),
            extra_spacing: 0,
        }
    }
}

/// Owner of the position/texcoord buffer pair
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMeshBuilder {
    positions: GeometryBuffer,
    tex_coords: GeometryBuffer,
}

impl Default for QuadMeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadMeshBuilder {
    /// Create a builder with empty buffers
    pub fn new() -> Self {
        Self {
            positions: GeometryBuffer::vec3(0),
            tex_coords: GeometryBuffer::vec2(0),
        }
    }

    /// Vertex capacity needed for `codepoint_count` code points, rounded up to whole chunks
    pub const fn required_vertex_capacity(codepoint_count: usize) -> usize {
        let vertices = VERTICES_PER_QUAD * codepoint_count;
        (1 + vertices / CHUNK_VERTICES) * CHUNK_VERTICES
    }

    /// Make room for `codepoint_count` quads and set the limits to exactly that many
    fn prepare(&mut self, codepoint_count: usize) -> TextResult<()> {
        let required = Self::required_vertex_capacity(codepoint_count);
        if self.positions.tuple_capacity() < required {
            log::debug!(
                "Growing text geometry from {} to {} vertices",
                self.positions.tuple_capacity(),
                required
            );
            let access_mode = self.positions.access_mode();
            self.positions = GeometryBuffer::vec3(required);
            self.tex_coords = GeometryBuffer::vec2(required);
            self.set_access_mode(access_mode);
        }

        let vertices = VERTICES_PER_QUAD * codepoint_count;
        self.positions.set_tuple_limit(vertices)?;
        self.tex_coords.set_tuple_limit(vertices)?;
        Ok(())
    }

    /// Rewrite both buffers for `text`
    ///
    /// `metrics` must already hold the measurement of `text` with the same
    /// font and spacing.
    pub fn build(
        &mut self,
        text: &str,
        font: &dyn FontMetrics,
        metrics: &TextMetrics,
        layout: &QuadLayout,
    ) -> TextResult<()> {
        self.prepare(text.chars().count())?;

        let size = metrics.size();
        let line_height = font.line_height();
        let texture_size = Vec2::new(font.texture_width(), font.texture_height());

        let origin = Vec2::new(
            round_half_up(size.x * layout.align.horizontal()) + layout.fixed_offset.x,
            round_half_up(size.y * layout.align.vertical()) + layout.fixed_offset.y,
        );

        let mut line_index = 0usize;
        let mut line_start = layout.justify.line_offset(size.x, metrics.line_width(0));
        let mut cursor_x = 0.0f32;
        let mut cursor_y = 0.0f32;

        let mut codepoints = text.chars().map(u32::from).peekable();
        while let Some(codepoint) = codepoints.next() {
            let next = codepoints.peek().copied();
            match cursor::step(font, codepoint, next, cursor_x, layout.extra_spacing) {
                CursorStep::LineBreak => {
                    line_index += 1;
                    line_start = layout.justify.line_offset(size.x, metrics.line_width(line_index));
                    cursor_x = 0.0;
                    cursor_y += line_height;
                    self.put_empty_quad()?;
                }
                CursorStep::Tab(stop) => {
                    cursor_x = stop;
                    self.put_empty_quad()?;
                }
                CursorStep::Glyph { glyph, advance } => {
                    let pen = Vec2::new(origin.x + line_start + cursor_x, origin.y + cursor_y);
                    self.put_glyph_quad(glyph, &pen, &texture_size)?;
                    cursor_x += advance;
                }
                CursorStep::Missing => self.put_empty_quad()?,
            }
        }

        self.positions.rewind();
        self.tex_coords.rewind();
        Ok(())
    }

    fn put_glyph_quad(&mut self, glyph: &GlyphMetric, pen: &Vec2, texture_size: &Vec2) -> TextResult<()> {
        let left = pen.x + glyph.xoffset;
        let top = pen.y + glyph.yoffset;
        let right = left + glyph.width;
        let bottom = top + glyph.height;

        let lt = Vec3::new(left, 0.0, top);
        let lb = Vec3::new(left, 0.0, bottom);
        let rt = Vec3::new(right, 0.0, top);
        let rb = Vec3::new(right, 0.0, bottom);
        for corner in [&lt, &lb, &rt, &rt, &lb, &rb] {
            self.positions.put_vec3(corner)?;
        }

        let u0 = glyph.x / texture_size.x;
        let v0 = glyph.y / texture_size.y;
        let u1 = (glyph.x + glyph.width) / texture_size.x;
        let v1 = (glyph.y + glyph.height) / texture_size.y;

        let lt = Vec2::new(u0, v0);
        let lb = Vec2::new(u0, v1);
        let rt = Vec2::new(u1, v0);
        let rb = Vec2::new(u1, v1);
        for corner in [&lt, &lb, &rt, &rt, &lb, &rb] {
            self.tex_coords.put_vec2(corner)?;
        }
        Ok(())
    }

    fn put_empty_quad(&mut self) -> TextResult<()> {
        self.positions.put(&[0.0; 3 * VERTICES_PER_QUAD])?;
        self.tex_coords.put(&[0.0; 2 * VERTICES_PER_QUAD])
    }

    /// Position buffer (3 floats per vertex)
    pub fn positions(&self) -> &GeometryBuffer {
        &self.positions
    }

    /// Texture coordinate buffer (2 floats per vertex, channel 0)
    pub fn tex_coords(&self) -> &GeometryBuffer {
        &self.tex_coords
    }

    /// Vertices written by the last build
    pub fn vertex_count(&self) -> usize {
        self.positions.tuple_count()
    }

    /// Vertices the buffers can hold without reallocating
    pub fn vertex_capacity(&self) -> usize {
        self.positions.tuple_capacity()
    }

    /// Upload hint for both buffers
    pub fn access_mode(&self) -> AccessMode {
        self.positions.access_mode()
    }

    /// Change the upload hint for both buffers
    pub fn set_access_mode(&mut self, access_mode: AccessMode) {
        self.positions.set_access_mode(access_mode);
        self.tex_coords.set_access_mode(access_mode);
    }
}

/// Round to the nearest whole unit, halves toward positive infinity
///
/// Snapping the anchor keeps glyph edges on whole pixels.
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}
