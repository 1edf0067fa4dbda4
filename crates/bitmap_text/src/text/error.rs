//! Error types for the text subsystem

use crate::foundation::math::TransformError;

/// Result type for text operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors that can occur while laying out or presenting text
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Caller passed a value the operation cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation needs font metrics but no font is attached
    #[error("Text '{0}' has no font attached")]
    MissingFont(String),

    /// A rotation could not take a scale; recovered by renormalizing
    #[error("Degenerate transform: {0}")]
    DegenerateTransform(#[from] TransformError),

    /// Another thread panicked while holding the entity lock
    #[error("Text '{0}' lock was poisoned")]
    LockPoisoned(String),
}
