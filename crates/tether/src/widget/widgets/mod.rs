//! Standard widgets for Tether.
//!
//! - [`SpinningButton`]: Button that spins until a stop signal, timeout, or direct call
//! - [`ButtonBase`]: Shared state for button widgets

mod button_base;
mod spinning_button;
mod spinning_button_config;

pub use button_base::ButtonBase;
pub use spinning_button::{SpinningButton, SpinningButtonBuilder, ROTATION_STEP, TICK_INTERVAL};
pub use spinning_button_config::{IconDimensions, SpinningButtonConfig};
