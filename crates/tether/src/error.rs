//! Error types for the widget layer.

use thiserror::Error;

use tether_render::{RenderError, Size};

/// Errors surfaced when building or reconfiguring widgets.
///
/// Teardown and signal rebinding never produce these; those failures are
/// logged and absorbed.
#[derive(Error, Debug)]
pub enum Error {
    /// The spinner graphic was rejected by the renderer.
    #[error("invalid spinner graphic: {0}")]
    InvalidGraphicDefinition(String),

    /// An icon size that is not a positive, finite size.
    #[error("invalid icon size {}x{}", .0.width, .0.height)]
    InvalidSizeArgument(Size),

    /// A color string that is not `#rrggbb`.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// Any other rendering failure.
    #[error(transparent)]
    Render(RenderError),

    /// A configuration document that could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration that cannot be written as TOML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A configuration file that could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidGraphic(reason) => Self::InvalidGraphicDefinition(reason),
            RenderError::InvalidIconSize { width, height } => {
                Self::InvalidSizeArgument(Size::new(width, height))
            }
            other => Self::Render(other),
        }
    }
}

/// Result type for widget operations.
pub type Result<T> = std::result::Result<T, Error>;
