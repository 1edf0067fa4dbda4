//! In-memory bitmap font built from an already-parsed glyph table

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{FontError, FontMetrics, FontResult, GlyphMetric, KerningPair, KerningTable};
use crate::config::Config;

/// First printable ASCII code point (space)
const ASCII_START: u32 = 32;
/// Last printable ASCII code point (tilde)
const ASCII_END: u32 = 126;
/// Glyph cells per texture row for generated grids
const GLYPHS_PER_ROW: u32 = 16;

/// Serializable description of a font page
///
/// This is the hand-off format between whatever parsed the font file and the
/// layout engine. It can be stored as `.ron` or `.toml` through [`Config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    /// Face name, used in diagnostics
    pub name: String,
    /// Nominal point size the page was rendered at
    pub point_size: f32,
    /// Distance between baselines
    pub line_height: f32,
    /// Texture page width in pixels
    pub texture_width: f32,
    /// Texture page height in pixels
    pub texture_height: f32,
    /// Outline thickness baked into the glyphs
    pub outline_width: u32,
    /// Glyph table
    pub glyphs: Vec<GlyphMetric>,
    /// Kerning pairs
    pub kerning: Vec<KerningPair>,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            point_size: 16.0,
            line_height: 16.0,
            texture_width: 256.0,
            texture_height: 256.0,
            outline_width: 0,
            glyphs: Vec::new(),
            kerning: Vec::new(),
        }
    }
}

impl Config for FontDescriptor {}

impl FontDescriptor {
    /// Create a descriptor with font-wide values and no glyphs
    pub fn new(
        name: impl Into<String>,
        point_size: f32,
        line_height: f32,
        texture_width: f32,
        texture_height: f32,
    ) -> Self {
        Self {
            name: name.into(),
            point_size,
            line_height,
            texture_width,
            texture_height,
            ..Default::default()
        }
    }

    /// Lay printable ASCII out on a fixed grid of `cell_width` x `cell_height` cells
    ///
    /// Every glyph fills its cell and advances by the cell width, which gives a
    /// monospace page handy for tools and tests.
    pub fn ascii_grid(name: impl Into<String>, point_size: f32, cell_width: f32, cell_height: f32) -> Self {
        let glyph_count = ASCII_END - ASCII_START + 1;
        let rows = glyph_count.div_ceil(GLYPHS_PER_ROW);

        let mut descriptor = Self::new(
            name,
            point_size,
            cell_height,
            cell_width * GLYPHS_PER_ROW as f32,
            cell_height * rows as f32,
        );

        for (index, codepoint) in (ASCII_START..=ASCII_END).enumerate() {
            let index = index as u32;
            let column = index % GLYPHS_PER_ROW;
            let row = index / GLYPHS_PER_ROW;
            descriptor.glyphs.push(GlyphMetric {
                codepoint,
                x: column as f32 * cell_width,
                y: row as f32 * cell_height,
                width: cell_width,
                height: cell_height,
                xoffset: 0.0,
                yoffset: 0.0,
                xadvance: cell_width,
            });
        }

        descriptor
    }

    /// Add a glyph
    pub fn with_glyph(mut self, glyph: GlyphMetric) -> Self {
        self.glyphs.push(glyph);
        self
    }

    /// Add a kerning pair
    pub fn with_kerning(mut self, first: char, second: char, amount: f32) -> Self {
        self.kerning.push(KerningPair {
            first: u32::from(first),
            second: u32::from(second),
            amount,
        });
        self
    }

    /// Set the baked outline width
    pub fn with_outline_width(mut self, outline_width: u32) -> Self {
        self.outline_width = outline_width;
        self
    }
}

/// Font page backed by hash-map lookups
#[derive(Debug, Clone)]
pub struct BitmapFont {
    name: String,
    point_size: f32,
    line_height: f32,
    max_char_advance: f32,
    texture_width: f32,
    texture_height: f32,
    outline_width: u32,
    glyphs: HashMap<u32, GlyphMetric>,
    kerning: KerningTable,
}

impl BitmapFont {
    /// Build the lookup tables from a descriptor
    pub fn from_descriptor(descriptor: FontDescriptor) -> FontResult<Self> {
        let invalid = |reason: &str| FontError::InvalidDescriptor {
            name: descriptor.name.clone(),
            reason: reason.to_string(),
        };

        if !(descriptor.point_size > 0.0) {
            return Err(invalid("point size must be positive"));
        }
        if !(descriptor.texture_width > 0.0 && descriptor.texture_height > 0.0) {
            return Err(invalid("texture dimensions must be positive"));
        }
        if !(descriptor.line_height >= 0.0) {
            return Err(invalid("line height must not be negative"));
        }

        let mut glyphs = HashMap::with_capacity(descriptor.glyphs.len());
        let mut max_char_advance = 0.0f32;
        for glyph in descriptor.glyphs {
            max_char_advance = max_char_advance.max(glyph.xadvance);
            if glyphs.insert(glyph.codepoint, glyph).is_some() {
                return Err(FontError::DuplicateGlyph(glyph.codepoint));
            }
        }

        let kerning: KerningTable = descriptor.kerning.into_iter().collect();

        log::info!(
            "Loaded bitmap font '{}' at {}pt: {} glyphs, {} kerning pairs",
            descriptor.name,
            descriptor.point_size,
            glyphs.len(),
            kerning.len()
        );

        Ok(Self {
            name: descriptor.name,
            point_size: descriptor.point_size,
            line_height: descriptor.line_height,
            max_char_advance,
            texture_width: descriptor.texture_width,
            texture_height: descriptor.texture_height,
            outline_width: descriptor.outline_width,
            glyphs,
            kerning,
        })
    }

    /// Face name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of glyphs on the page
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

impl FontMetrics for BitmapFont {
    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn max_char_advance(&self) -> f32 {
        self.max_char_advance
    }

    fn point_size(&self) -> f32 {
        self.point_size
    }

    fn texture_width(&self) -> f32 {
        self.texture_width
    }

    fn texture_height(&self) -> f32 {
        self.texture_height
    }

    fn glyph(&self, codepoint: u32) -> Option<&GlyphMetric> {
        self.glyphs.get(&codepoint)
    }

    fn kerning(&self, left: u32, right: u32) -> f32 {
        self.kerning.get(left, right)
    }

    fn outline_width(&self) -> u32 {
        self.outline_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_grid_layout() {
        let font = BitmapFont::from_descriptor(FontDescriptor::ascii_grid("grid", 32.0, 10.0, 20.0)).unwrap();

        assert_eq!(font.glyph_count(), 95);
        assert_eq!(font.max_char_advance(), 10.0);
        assert_eq!(font.line_height(), 20.0);
        assert_eq!(font.texture_width(), 160.0);
        assert_eq!(font.texture_height(), 120.0);

        // 'A' is index 33: row 2, column 1
        let a = font.glyph(u32::from('A')).unwrap();
        assert_eq!((a.x, a.y), (10.0, 40.0));
        assert!(font.glyph(u32::from('\n')).is_none());
    }

    #[test]
    fn test_kerning_defaults_to_zero() {
        let descriptor = FontDescriptor::ascii_grid("grid", 32.0, 10.0, 20.0).with_kerning('A', 'V', -2.0);
        let font = BitmapFont::from_descriptor(descriptor).unwrap();

        assert_eq!(font.kerning(u32::from('A'), u32::from('V')), -2.0);
        assert_eq!(font.kerning(u32::from('V'), u32::from('A')), 0.0);
        assert_eq!(font.kerning(u32::from('A'), 0), 0.0);
    }

    #[test]
    fn test_rejects_bad_descriptors() {
        let mut zero_texture = FontDescriptor::ascii_grid("bad", 32.0, 10.0, 20.0);
        zero_texture.texture_width = 0.0;
        assert!(matches!(
            BitmapFont::from_descriptor(zero_texture),
            Err(FontError::InvalidDescriptor { .. })
        ));

        let glyph = GlyphMetric { codepoint: 65, ..Default::default() };
        let duplicate = FontDescriptor::new("dup", 16.0, 16.0, 64.0, 64.0)
            .with_glyph(glyph)
            .with_glyph(glyph);
        assert!(matches!(BitmapFont::from_descriptor(duplicate), Err(FontError::DuplicateGlyph(65))));
    }

    #[test]
    fn test_descriptor_round_trips_through_ron() {
        let descriptor = FontDescriptor::ascii_grid("grid", 24.0, 8.0, 12.0)
            .with_kerning('T', 'o', -1.5)
            .with_outline_width(2);

        let text = descriptor.to_string_with_format("font.ron").unwrap();
        let parsed = FontDescriptor::from_str_with_format(&text, "font.ron").unwrap();
        assert_eq!(parsed, descriptor);
    }
}
