//! Render-side collaborators of the text subsystem
//!
//! The camera types feed the per-frame presentation pass; the sink types are
//! the boundary where finished geometry leaves this crate.

pub mod camera;
pub mod sink;

pub use camera::{Camera, CameraSnapshot, ProjectionMode};
pub use sink::{BlendMode, GeometrySink, RecordedDraw, RecordingSink, TextDrawCall};
