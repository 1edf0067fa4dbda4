//! Cross-module tests for the text entity
//!
//! Unit tests live next to each module; these drive a whole
//! [`BitmapText`](crate::text::BitmapText) through layout and draw passes.

mod layout_properties;

use std::sync::{Arc, Mutex};

use crate::font::{BitmapFont, FontDescriptor, SharedFont};
use crate::foundation::math::Vec2;
use crate::text::TextChangeListener;

/// Monospace ASCII page: 10 x 20 cells, 32pt
pub(super) fn grid_font() -> SharedFont {
    font_from(FontDescriptor::ascii_grid("grid", 32.0, 10.0, 20.0))
}

pub(super) fn font_from(descriptor: FontDescriptor) -> SharedFont {
    Arc::new(BitmapFont::from_descriptor(descriptor).unwrap())
}

/// Listener that records every event it sees
#[derive(Default)]
pub(super) struct EventLog {
    pub sizes: Mutex<Vec<Vec2>>,
    pub alphas: Mutex<Vec<f32>>,
}

impl TextChangeListener for EventLog {
    fn text_size_changed(&self, _source: &str, size: Vec2) {
        self.sizes.lock().unwrap().push(size);
    }

    fn text_alpha_changed(&self, _source: &str, alpha: f32) {
        self.alphas.lock().unwrap().push(alpha);
    }
}
