//! Cursor advance rules shared by measuring and quad emission
//!
//! Both layout passes walk the string with these functions so that measured
//! line widths and emitted geometry can never disagree.

use crate::font::{FontMetrics, GlyphMetric};

/// Number of widest-character advances between tab stops
pub const TAB_SIZE: u32 = 4;

/// Line feed code point
pub const NEWLINE: u32 = '\n' as u32;

/// Horizontal tab code point
pub const TAB: u32 = '\t' as u32;

/// How a single code point affects the layout cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorStep<'a> {
    /// Finish the current line and start the next one
    LineBreak,
    /// Jump forward to this x position
    Tab(f32),
    /// Draw `glyph` at the current cursor, then move forward by `advance`
    Glyph {
        /// Metrics of the glyph to draw
        glyph: &'a GlyphMetric,
        /// Total advance including kerning and extra spacing
        advance: f32,
    },
    /// Code point the font has no glyph for; nothing drawn, no advance
    Missing,
}

/// Spacing added between glyphs so outlined glyphs do not overlap
pub fn extra_spacing_for(font: &dyn FontMetrics) -> u32 {
    font.outline_width().saturating_sub(1)
}

/// Next tab stop strictly after `cursor_x`
///
/// A cursor already sitting on a stop still moves a full stop forward. A
/// non-positive `tab_stop` leaves the cursor where it is.
pub fn next_tab_stop(cursor_x: f32, tab_stop: f32) -> f32 {
    if tab_stop <= 0.0 {
        return cursor_x;
    }
    let stops = 1.0 + (cursor_x / tab_stop).floor();
    stops * tab_stop
}

/// Resolve what `codepoint` (followed by `next`) does to the cursor at `cursor_x`
///
/// `next` is `None` at the end of the string, which means no kerning.
pub fn step<'f>(
    font: &'f dyn FontMetrics,
    codepoint: u32,
    next: Option<u32>,
    cursor_x: f32,
    extra_spacing: u32,
) -> CursorStep<'f> {
    match codepoint {
        NEWLINE => CursorStep::LineBreak,
        TAB => {
            let tab_stop = TAB_SIZE as f32 * font.max_char_advance();
            CursorStep::Tab(next_tab_stop(cursor_x, tab_stop))
        }
        _ => match font.glyph(codepoint) {
            Some(glyph) => {
                let kerning = next.map_or(0.0, |next| font.kerning(codepoint, next));
                CursorStep::Glyph {
                    glyph,
                    advance: glyph.xadvance + kerning + extra_spacing as f32,
                }
            }
            None => {
                log::trace!("No glyph for U+{:04X}, skipping", codepoint);
                CursorStep::Missing
            }
        },
    }
}
