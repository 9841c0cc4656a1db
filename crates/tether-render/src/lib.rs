//! Icon rendering for Tether widgets.
//!
//! This crate turns vector graphics into icons. Widgets hold [`Icon`]
//! handles and ask a [`FrameRenderer`] for new frames; they never touch
//! pixels directly.
//!
//! # Rendering a Spinner Frame
//!
//! ```
//! use tether_render::{Color, FrameRenderer, IconSize, SpinnerGraphic, SvgSpinnerRenderer};
//!
//! let graphic = SpinnerGraphic::default_spinner()
//!     .with_color(Color::from_hex("#1e88e5").unwrap())
//!     .unwrap();
//! let renderer = SvgSpinnerRenderer::new(graphic);
//!
//! let icon = renderer.render_frame(30.0, IconSize::square(24).unwrap(), 1.0);
//! assert!(!icon.is_empty());
//! ```

mod error;
mod icon;
mod spinner;
mod types;

pub use error::{RenderError, RenderResult};
pub use icon::{Icon, IconPixels, IconSize, IconSource, MAX_ICON_EDGE};
pub use spinner::{FrameRenderer, SpinnerGraphic, SvgSpinnerRenderer, DEFAULT_SPINNER_SVG};
pub use types::{Color, Size};
