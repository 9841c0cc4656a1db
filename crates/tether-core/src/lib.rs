//! Core systems for Tether.
//!
//! This crate provides the foundational components Tether widgets are built on:
//!
//! - **Signal/Slot System**: Type-safe inter-object communication
//! - **Subscription Tracking**: Recorded connections with best-effort bulk teardown
//! - **Event Loop**: Single-threaded dispatch against a virtual clock
//! - **Timers**: One-shot and repeating timers driven by the event loop
//! - **Object Model**: Object ids with parent-child relationships
//!
//! # Signal/Slot Example
//!
//! ```
//! use tether_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Tracked Subscriptions
//!
//! ```
//! use std::sync::Arc;
//! use tether_core::{Signal, SubscriptionTracker};
//!
//! let progress = Arc::new(Signal::<u8>::new());
//! let finished = Arc::new(Signal::<()>::new());
//!
//! let mut tracker = SubscriptionTracker::new();
//! tracker.connect(&progress, |pct: &u8| println!("{pct}%")).unwrap();
//! tracker.connect(&finished, |_| println!("done")).unwrap();
//!
//! // One call undoes everything, even if some signals are already gone.
//! drop(finished);
//! tracker.disconnect_all();
//! assert_eq!(progress.connection_count(), 0);
//! ```

mod error;
mod event_loop;
pub mod logging;
pub mod object;
pub mod signal;
mod timer;
pub mod tracker;

pub use error::{SignalError, TimerError};
pub use event_loop::EventLoop;
pub use logging::PerfSpan;
pub use object::{global_registry, Object, ObjectError, ObjectId, ObjectRegistry, ObjectResult, SharedObjectRegistry};
pub use signal::{ConnectionId, Signal, SignalEmitter, SignalSource, Slot};
pub use timer::{Timer, TimerId, TimerKind, MIN_REPEAT_INTERVAL};
pub use tracker::{
    disconnect_all_from, disconnect_signal, SignalOwner, SignalRegistry, SubscriptionRecord,
    SubscriptionTracker, DESTROYED_SIGNAL,
};
