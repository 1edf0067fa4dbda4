//! Draw submission boundary
//!
//! A text entity hands its finished geometry to a [`GeometrySink`] once per
//! visible frame. Uploading the buffers and issuing the actual draw call is
//! the sink's business.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Vec4};
use crate::text::{AccessMode, GeometryBuffer};

/// How the text's alpha is resolved against the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Alpha blending, drawn with the transparent geometry
    #[default]
    AlphaBlend,
    /// Alpha test only, drawn with the opaque geometry
    AlphaTest,
}

/// Everything needed to draw one text entity for one frame
#[derive(Debug, Clone, Copy)]
pub struct TextDrawCall<'a> {
    /// Name of the text entity
    pub name: &'a str,
    /// Vertex positions, 3 floats per vertex, limited to the live vertex count
    pub positions: &'a GeometryBuffer,
    /// Texture coordinates for channel 0, 2 floats per vertex
    pub tex_coords: &'a GeometryBuffer,
    /// Upload hint for both buffers
    pub access_mode: AccessMode,
    /// Local-to-world matrix
    pub world_matrix: Mat4,
    /// RGBA tint including the faded alpha
    pub tint: Vec4,
    /// Blend handling
    pub blend: BlendMode,
}

impl TextDrawCall<'_> {
    /// Number of vertices to draw
    pub fn vertex_count(&self) -> usize {
        self.positions.tuple_count()
    }
}

/// Receiver of text draw calls
pub trait GeometrySink {
    /// Draw (or queue) one text entity
    fn submit(&mut self, call: &TextDrawCall<'_>);
}

/// Owned copy of a submitted draw call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Name of the text entity
    pub name: String,
    /// Copied vertex positions
    pub positions: Vec<f32>,
    /// Copied texture coordinates
    pub tex_coords: Vec<f32>,
    /// Upload hint
    pub access_mode: AccessMode,
    /// Local-to-world matrix
    pub world_matrix: Mat4,
    /// RGBA tint
    pub tint: Vec4,
    /// Blend handling
    pub blend: BlendMode,
}

impl RecordedDraw {
    /// Number of vertices recorded
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Sink that keeps a copy of every draw call, for tools and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Draw calls in submission order
    pub draws: Vec<RecordedDraw>,
}

impl RecordingSink {
    /// Most recent draw call
    pub fn last(&self) -> Option<&RecordedDraw> {
        self.draws.last()
    }

    /// Forget all recorded calls
    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

impl GeometrySink for RecordingSink {
    fn submit(&mut self, call: &TextDrawCall<'_>) {
        log::trace!("Recorded draw of '{}' ({} vertices)", call.name, call.vertex_count());
        self.draws.push(RecordedDraw {
            name: call.name.to_string(),
            positions: call.positions.as_slice().to_vec(),
            tex_coords: call.tex_coords.as_slice().to_vec(),
            access_mode: call.access_mode,
            world_matrix: call.world_matrix,
            tint: call.tint,
            blend: call.blend,
        });
    }
}
