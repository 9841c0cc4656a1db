//! Tether - spinning buttons and tracked signal subscriptions.
//!
//! This is the umbrella crate. It re-exports the core signal, timer, and
//! tracking APIs and adds the widget layer on top of them.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tether::prelude::*;
//!
//! let event_loop = EventLoop::new();
//! let button = SpinningButton::builder("Sync").timeout_secs(3).build(&event_loop)?;
//!
//! button.click();
//! event_loop.advance(Duration::from_secs(3));
//! assert!(!button.is_spinning());
//! # Ok::<(), tether::Error>(())
//! ```

pub use tether_core::*;

mod error;
pub mod prelude;
pub mod widget;

pub use error::{Error, Result};

/// Icon rendering module.
pub mod render {
    pub use tether_render::*;
}
