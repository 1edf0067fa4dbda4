//! # Bitmap Text
//!
//! Bitmap-font text layout and camera-driven presentation for 3D scenes.
//!
//! ## Features
//!
//! - **Layout**: kerning-aware cursor advance, tab stops, multi-line blocks,
//!   per-line justification and nine-way anchor alignment
//! - **Geometry**: reusable position/texcoord buffers with chunked growth
//! - **Presentation**: billboard rotation, distance driven auto-scale and
//!   auto-fade, evaluated every frame against a camera snapshot
//! - **Notifications**: size and alpha change listeners
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bitmap_text::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let descriptor = FontDescriptor::load_from_file("fonts/arial32.ron")?;
//!     let font: SharedFont = Arc::new(BitmapFont::from_descriptor(descriptor)?);
//!
//!     let mut label = BitmapText::new("label", "Hello\nWorld", Some(font))?;
//!     label.set_align(Align::Center)?;
//!     label.set_justify(Justify::Center)?;
//!
//!     let camera = Camera::default();
//!     let snapshot = CameraSnapshot::from_camera(&camera, 720.0);
//!     let mut sink = RecordingSink::default();
//!     label.draw(&snapshot, &mut sink);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_precision_loss
)]

pub mod foundation;
pub mod config;
pub mod font;
pub mod render;
pub mod text;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        foundation::math::{Vec2, Vec3, Vec4, Mat3, Mat4, Transform},
        config::{Config, ConfigError, TextStyleConfig},
        font::{BitmapFont, FontDescriptor, FontError, FontMetrics, GlyphMetric, SharedFont},
        render::{
            BlendMode, Camera, CameraSnapshot, GeometrySink, ProjectionMode,
            RecordingSink, TextDrawCall,
        },
        text::{
            AccessMode, Align, AutoFade, AutoScale, BitmapText, FadeParams,
            GeometryBuffer, Justify, ListenerId, SharedBitmapText,
            TextChangeListener, TextError, TextResult,
        },
    };
}
