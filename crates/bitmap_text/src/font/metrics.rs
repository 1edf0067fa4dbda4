//! Glyph metrics and the font lookup trait

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Placement data for a single glyph
///
/// `x`, `y`, `width` and `height` locate the glyph on the font texture in
/// pixels (top-left origin). Offsets and advance are in the same pixel units
/// and are applied relative to the layout cursor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlyphMetric {
    /// Unicode code point this glyph renders
    pub codepoint: u32,
    /// Left edge on the texture
    pub x: f32,
    /// Top edge on the texture
    pub y: f32,
    /// Glyph box width
    pub width: f32,
    /// Glyph box height
    pub height: f32,
    /// Horizontal offset from the cursor to the glyph box
    pub xoffset: f32,
    /// Vertical offset from the line top to the glyph box
    pub yoffset: f32,
    /// Cursor advance after drawing this glyph
    pub xadvance: f32,
}

/// One kerning entry as stored in font data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KerningPair {
    /// Left code point
    pub first: u32,
    /// Right code point
    pub second: u32,
    /// Signed advance adjustment
    pub amount: f32,
}

/// Pair-wise advance adjustments
#[derive(Debug, Clone, Default)]
pub struct KerningTable {
    pairs: HashMap<(u32, u32), f32>,
}

impl KerningTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the adjustment for `(first, second)`
    pub fn insert(&mut self, first: u32, second: u32, amount: f32) {
        self.pairs.insert((first, second), amount);
    }

    /// Adjustment for `(first, second)`, zero when the pair is unknown
    pub fn get(&self, first: u32, second: u32) -> f32 {
        self.pairs.get(&(first, second)).copied().unwrap_or(0.0)
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs are stored
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<KerningPair> for KerningTable {
    fn from_iter<I: IntoIterator<Item = KerningPair>>(iter: I) -> Self {
        let mut table = Self::new();
        for pair in iter {
            table.insert(pair.first, pair.second, pair.amount);
        }
        table
    }
}

/// Read-only font data consumed by text layout
///
/// Implementations are shared between many text entities, so they must be
/// safe to read from any thread.
pub trait FontMetrics: Send + Sync + std::fmt::Debug {
    /// Distance between consecutive baselines
    fn line_height(&self) -> f32;

    /// Largest `xadvance` of any glyph; tab stops are multiples of it
    fn max_char_advance(&self) -> f32;

    /// Nominal point size the glyphs were rendered at
    fn point_size(&self) -> f32;

    /// Width of the glyph texture in pixels
    fn texture_width(&self) -> f32;

    /// Height of the glyph texture in pixels
    fn texture_height(&self) -> f32;

    /// Glyph for `codepoint`, if the font has one
    fn glyph(&self, codepoint: u32) -> Option<&GlyphMetric>;

    /// Advance adjustment between `left` and `right`
    fn kerning(&self, left: u32, right: u32) -> f32;

    /// Outline thickness baked into the glyphs, in pixels
    fn outline_width(&self) -> u32;
}

/// Font handle shared between text entities
pub type SharedFont = Arc<dyn FontMetrics>;
