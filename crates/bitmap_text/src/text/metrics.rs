//! Text block measurement
//!
//! Walks a string once and records every line's width, the number of lines
//! and the overall block size. The quad builder reads these back for
//! anchoring and justification.

use crate::font::FontMetrics;
use crate::foundation::math::Vec2;
use super::cursor::{self, CursorStep};

/// Line slots allocated up front; doubled whenever a longer text shows up
const INITIAL_LINE_CAPACITY: usize = 64;

/// Measured layout of a text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    line_widths: Vec<f32>,
    line_count: usize,
    size: Vec2,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetrics {
    /// Create empty metrics: one line of zero size
    pub fn new() -> Self {
        Self {
            line_widths: vec![0.0; INITIAL_LINE_CAPACITY],
            line_count: 1,
            size: Vec2::zeros(),
        }
    }

    /// Re-measure `text` with `font`
    pub fn measure(&mut self, text: &str, font: &dyn FontMetrics, extra_spacing: u32) {
        let line_height = font.line_height();
        let mut width = 0.0f32;
        let mut cursor_x = 0.0f32;
        let mut line_index = 0usize;

        let mut codepoints = text.chars().map(u32::from).peekable();
        while let Some(codepoint) = codepoints.next() {
            let next = codepoints.peek().copied();
            match cursor::step(font, codepoint, next, cursor_x, extra_spacing) {
                CursorStep::LineBreak => {
                    self.record_line_width(cursor_x, line_index);
                    width = width.max(cursor_x);
                    line_index += 1;
                    cursor_x = 0.0;
                }
                CursorStep::Tab(stop) => cursor_x = stop,
                CursorStep::Glyph { advance, .. } => cursor_x += advance,
                CursorStep::Missing => {}
            }
        }
        self.record_line_width(cursor_x, line_index);
        width = width.max(cursor_x);

        self.line_count = line_index + 1;
        self.size = Vec2::new(width, self.line_count as f32 * line_height);
    }

    fn record_line_width(&mut self, width: f32, line_index: usize) {
        if line_index >= self.line_widths.len() {
            let mut capacity = self.line_widths.len().max(1);
            while capacity <= line_index {
                capacity *= 2;
            }
            log::debug!("Growing line width storage to {} lines", capacity);
            self.line_widths.resize(capacity, 0.0);
        }
        self.line_widths[line_index] = width;
    }

    /// Width of every line of the last measured text
    pub fn line_widths(&self) -> &[f32] {
        &self.line_widths[..self.line_count]
    }

    /// Width of line `index`, zero past the last line
    pub fn line_width(&self, index: usize) -> f32 {
        self.line_widths().get(index).copied().unwrap_or(0.0)
    }

    /// Number of line slots currently allocated
    pub fn line_capacity(&self) -> usize {
        self.line_widths.len()
    }

    /// Number of lines, at least one
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Block size: widest line by line count times line height
    pub fn size(&self) -> Vec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{BitmapFont, FontDescriptor};

    fn font() -> BitmapFont {
        BitmapFont::from_descriptor(FontDescriptor::ascii_grid("grid", 32.0, 10.0, 20.0)).unwrap()
    }

    #[test]
    fn test_empty_string_is_one_line() {
        let mut metrics = TextMetrics::new();
        metrics.measure("", &font(), 0);

        assert_eq!(metrics.line_count(), 1);
        assert_eq!(metrics.size(), Vec2::new(0.0, 20.0));
        assert_eq!(metrics.line_widths(), &[0.0]);
    }

    #[test]
    fn test_single_line_height() {
        let font = font();
        let mut metrics = TextMetrics::new();
        for text in ["a", "Hello world", "{[()]}~"] {
            metrics.measure(text, &font, 0);
            assert_eq!(metrics.line_count(), 1);
            assert_eq!(metrics.size().y, 20.0);
            assert_eq!(metrics.size().x, 10.0 * text.chars().count() as f32);
        }
    }

    #[test]
    fn test_newlines_add_lines() {
        let font = font();
        let mut metrics = TextMetrics::new();
        for (text, newlines) in [("a\nb", 1), ("\n\n", 2), ("abc\n\nde\n", 3)] {
            metrics.measure(text, &font, 0);
            assert_eq!(metrics.line_count(), newlines + 1, "{text:?}");
            assert_eq!(metrics.size().y, 20.0 * (newlines + 1) as f32);
        }
        metrics.measure("abc\n\nde\n", &font, 0);
        assert_eq!(metrics.line_widths(), &[30.0, 0.0, 20.0, 0.0]);
        assert_eq!(metrics.size().x, 30.0);
    }

    #[test]
    fn test_tab_advances_to_stop() {
        let mut metrics = TextMetrics::new();
        metrics.measure("ab\tc", &font(), 0);
        // tab stop is 4 * 10; "ab" ends at 20, tab jumps to 40, 'c' adds 10
        assert_eq!(metrics.size().x, 50.0);
    }

    #[test]
    fn test_extra_spacing_and_kerning() {
        let descriptor = FontDescriptor::ascii_grid("grid", 32.0, 10.0, 20.0).with_kerning('A', 'V', -4.0);
        let font = BitmapFont::from_descriptor(descriptor).unwrap();
        let mut metrics = TextMetrics::new();
        metrics.measure("AV", &font, 1);
        assert_eq!(metrics.size().x, (10.0 - 4.0 + 1.0) + (10.0 + 1.0));
    }

    #[test]
    fn test_line_storage_grows_past_initial_capacity() {
        let text = "x\n".repeat(200);
        let mut metrics = TextMetrics::new();
        metrics.measure(&text, &font(), 0);

        assert_eq!(metrics.line_count(), 201);
        assert!(metrics.line_capacity() >= 201);
        assert_eq!(metrics.line_capacity(), 256);
        assert_eq!(metrics.line_width(199), 10.0);
        assert_eq!(metrics.line_width(200), 0.0);

        // shrinking the text keeps the storage
        metrics.measure("x", &font(), 0);
        assert_eq!(metrics.line_capacity(), 256);
        assert_eq!(metrics.line_count(), 1);
    }
}
