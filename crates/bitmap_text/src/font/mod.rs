//! Bitmap font metrics
//!
//! Glyph placement data for fonts whose glyphs were pre-rendered into a single
//! texture page. Parsing font files is someone else's job: this module only
//! consumes an already-parsed table ([`FontDescriptor`]) and serves lookups
//! through the [`FontMetrics`] trait.

mod metrics;
mod bitmap_font;

pub use metrics::{FontMetrics, GlyphMetric, KerningPair, KerningTable, SharedFont};
pub use bitmap_font::{BitmapFont, FontDescriptor};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while building a font
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Font-wide values are unusable (zero texture size, negative point size, ...)
    #[error("Invalid font descriptor '{name}': {reason}")]
    InvalidDescriptor {
        /// Font name from the descriptor
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// The same code point appears twice in the glyph table
    #[error("Duplicate glyph for code point U+{0:04X}")]
    DuplicateGlyph(u32),
}
