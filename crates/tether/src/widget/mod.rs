//! Widget system for Tether.
//!
//! - [`WidgetBase`]: Object identity, enabled state, and repaint requests
//! - [`SizeHint`]: Layout negotiation
//! - [`widgets`]: Concrete widgets
//!
//! Widgets are driven by a [`tether_core::EventLoop`]. Their callbacks run
//! on the thread that drives the loop, one at a time.

mod base;
mod geometry;
pub mod widgets;

pub use base::WidgetBase;
pub use geometry::SizeHint;
