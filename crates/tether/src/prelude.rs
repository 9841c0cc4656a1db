//! Prelude module for Tether.
//!
//! ```
//! use tether::prelude::*;
//! ```
//!
//! This provides access to:
//! - Event loop and timers (`EventLoop`, `Timer`)
//! - Signal/slot system and subscription tracking (`Signal`, `SubscriptionTracker`)
//! - The spinning button, its builder and configuration
//! - Icon types (`Icon`, `IconSize`, `Size`)

// ============================================================================
// Event Loop and Timers
// ============================================================================

pub use crate::{EventLoop, Timer};

// ============================================================================
// Signal/Slot and Subscription Tracking
// ============================================================================

pub use crate::{
    disconnect_all_from, ConnectionId, Signal, SignalEmitter, SignalOwner, SignalSource,
    SubscriptionTracker,
};

// ============================================================================
// Object System
// ============================================================================

pub use crate::{Object, ObjectId};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{SpinningButton, SpinningButtonBuilder, SpinningButtonConfig};
pub use crate::widget::{SizeHint, WidgetBase};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::render::{FrameRenderer, Icon, IconSize, Size};
