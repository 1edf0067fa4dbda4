//! Text layout and presentation
//!
//! Layout runs whenever the string or a layout property changes: the shared
//! cursor walk measures the block ([`TextMetrics`]) and then emits six
//! vertices per code point ([`QuadMeshBuilder`]). Presentation runs every
//! frame: depth sampling drives auto-scale and auto-fade, then the block is
//! billboarded toward the camera and handed to a sink.

pub mod align;
pub mod billboard;
pub mod bitmap_text;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod listener;
pub mod mesh_builder;
pub mod metrics;
pub mod presentation;
pub mod shared;

#[cfg(test)]
mod tests;

pub use align::{Align, Justify};
pub use billboard::BillboardOutcome;
pub use bitmap_text::BitmapText;
pub use error::{TextError, TextResult};
pub use geometry::{AccessMode, GeometryBuffer};
pub use listener::{ChangeNotifier, ListenerId, TextChangeListener};
pub use mesh_builder::{QuadLayout, QuadMeshBuilder};
pub use metrics::TextMetrics;
pub use presentation::{AutoFade, AutoScale, FadeParams, PresentationController, PresentationState};
pub use shared::SharedBitmapText;
