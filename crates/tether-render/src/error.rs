//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while preparing or rendering icons.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The vector graphic definition could not be parsed.
    #[error("invalid graphic definition: {0}")]
    InvalidGraphic(String),

    /// An icon size that is zero, negative, non-finite, or too large.
    #[error("invalid icon size: {width}x{height}")]
    InvalidIconSize { width: f32, height: f32 },

    /// A pixel buffer whose length does not match its dimensions.
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    PixelBufferMismatch { width: u32, height: u32, len: usize },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
