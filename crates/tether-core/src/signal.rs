//! Signal/slot system for Tether.
//!
//! This module provides a type-safe, Qt-inspired signal/slot mechanism for
//! inter-object communication. Signals are emitted by objects when their state
//! changes, and connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`SignalEmitter`] - Type-erased view used for teardown
//! - [`SignalSource`] - Subscription side of a signal, which may refuse a connection
//!
//! # Re-entrancy
//!
//! Slots run on the emitting thread after the connection table has been
//! released, so a slot may connect to, disconnect from, or rebind the very
//! signal that is invoking it. A slot that is disconnected while an emission
//! is in progress is not called for the remainder of that emission.
//!
//! # Example
//!
//! ```
//! use tether_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let text_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! // Emit the signal
//! text_changed.emit("Hello, World!".to_string());
//!
//! // Disconnect when done
//! text_changed.disconnect(conn_id);
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

/// A connected slot. Shared so that emission can run without holding the
/// connection table lock.
pub type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`crate::SubscriptionTracker`] - Records connections for bulk teardown
pub struct Signal<Args> {
    /// All active connections, in connection order.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Connection order; slotmap iteration order is not insertion order once
    /// slots are reused.
    order: Mutex<Vec<ConnectionId>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
    /// Whether the signal refuses new connections.
    closed: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            order: Mutex::new(Vec::new()),
            blocked: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    /// Connecting to a closed signal yields an ID that is already dead; use
    /// [`SignalSource::try_connect`] to observe that case.
    ///
    /// # Example
    ///
    /// ```
    /// use tether_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        match self.connect_slot(Arc::new(slot)) {
            Ok(id) => id,
            Err(err) => {
                tracing::debug!(target: targets::SIGNAL, %err, "connect ignored");
                ConnectionId::default()
            }
        }
    }

    fn connect_slot(&self, slot: Slot<Args>) -> Result<ConnectionId, SignalError> {
        if self.is_closed() {
            return Err(SignalError::SignalClosed);
        }
        let id = self.connections.lock().insert(slot);
        self.order.lock().push(id);
        Ok(id)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.connections.lock().remove(id).is_some();
        if removed {
            self.order.lock().retain(|other| *other != id);
        }
        removed
    }

    /// Disconnect all slots from this signal.
    ///
    /// Returns the number of connections that were removed.
    pub fn disconnect_all(&self) -> usize {
        let removed = {
            let mut connections = self.connections.lock();
            let count = connections.len();
            connections.clear();
            count
        };
        self.order.lock().clear();
        removed
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// IDs of all live connections, oldest first.
    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.order.lock().clone()
    }

    /// Check whether a connection is still live.
    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.lock().contains_key(id)
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Close the signal: drop every connection and refuse new ones.
    ///
    /// Used when the owning object is being torn down.
    pub fn close(&self) -> usize {
        self.closed.store(true, Ordering::SeqCst);
        self.disconnect_all()
    }

    /// Check if the signal has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked or closed, this does nothing.
    #[tracing::instrument(skip_all, target = "tether_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() || self.is_closed() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let snapshot: Vec<(ConnectionId, Slot<Args>)> = {
            let connections = self.connections.lock();
            self.order
                .lock()
                .iter()
                .filter_map(|id| connections.get(*id).map(|slot| (*id, slot.clone())))
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, connection_count = snapshot.len(), "emitting signal");

        for (id, slot) in snapshot {
            if self.is_connected(id) {
                slot(&args);
            }
        }
    }
}

/// Type-erased signal emitter trait for dynamic signal access.
///
/// This is the teardown half of the signal capability: it lets trackers and
/// registries disconnect connections without knowing the argument type.
pub trait SignalEmitter: Send + Sync {
    /// Disconnect a connection by ID.
    fn disconnect(&self, id: ConnectionId) -> bool;

    /// Disconnect all connections, returning how many were removed.
    fn disconnect_all(&self) -> usize;

    /// Get the number of connections.
    fn connection_count(&self) -> usize;

    /// IDs of all live connections, oldest first.
    fn connection_ids(&self) -> Vec<ConnectionId>;

    /// Check if blocked.
    fn is_blocked(&self) -> bool;

    /// Set blocked state.
    fn set_blocked(&self, blocked: bool);

    /// Get this as Any for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Subscription half of the signal capability.
///
/// Unlike [`Signal::connect`], `try_connect` reports refusal, which lets a
/// caller fall back cleanly when binding to a source that has gone away.
pub trait SignalSource<Args>: SignalEmitter {
    /// Connect a slot, or report why the source refused it.
    fn try_connect(&self, slot: Slot<Args>) -> Result<ConnectionId, SignalError>;
}

impl<Args: Send + 'static> SignalEmitter for Signal<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        Signal::disconnect(self, id)
    }

    fn disconnect_all(&self) -> usize {
        Signal::disconnect_all(self)
    }

    fn connection_count(&self) -> usize {
        Signal::connection_count(self)
    }

    fn connection_ids(&self) -> Vec<ConnectionId> {
        Signal::connection_ids(self)
    }

    fn is_blocked(&self) -> bool {
        Signal::is_blocked(self)
    }

    fn set_blocked(&self, blocked: bool) {
        Signal::set_blocked(self, blocked);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<Args: Send + 'static> SignalSource<Args> for Signal<Args> {
    fn try_connect(&self, slot: Slot<Args>) -> Result<ConnectionId, SignalError> {
        self.connect_slot(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        let values = received.lock();
        assert_eq!(*values, vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        let values = received.lock();
        assert_eq!(*values, vec![1]);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        signal.set_blocked(false);
        signal.emit(3);

        let values = received.lock();
        assert_eq!(*values, vec![1, 3]);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..4 {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(n));
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
        assert_eq!(signal.connection_ids().len(), 4);
    }

    #[test]
    fn test_disconnect_all_reports_count() {
        let signal = Signal::<()>::new();

        for _ in 0..5 {
            signal.connect(|_| {});
        }

        assert_eq!(signal.connection_count(), 5);
        assert_eq!(signal.disconnect_all(), 5);
        assert_eq!(signal.connection_count(), 0);
        assert!(signal.connection_ids().is_empty());
    }

    #[test]
    fn test_slot_may_disconnect_itself_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let sig = signal.clone();
        let calls_clone = calls.clone();
        let own_id_clone = own_id.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *own_id_clone.lock() {
                sig.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_slot_disconnected_mid_emit_is_skipped() {
        let signal = Arc::new(Signal::<()>::new());
        let late_calls = Arc::new(AtomicUsize::new(0));
        let victim = Arc::new(Mutex::new(None));

        let sig = signal.clone();
        let victim_clone = victim.clone();
        signal.connect(move |_| {
            if let Some(id) = victim_clone.lock().take() {
                sig.disconnect(id);
            }
        });
        let late = late_calls.clone();
        let id = signal.connect(move |_| {
            late.fetch_add(1, Ordering::SeqCst);
        });
        *victim.lock() = Some(id);

        signal.emit(());
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_closed_signal_refuses_connections() {
        let signal = Signal::<()>::new();
        signal.connect(|_| {});

        assert_eq!(signal.close(), 1);
        let result = signal.try_connect(Arc::new(|_: &()| {}));
        assert_eq!(result, Err(SignalError::SignalClosed));
        assert_eq!(signal.connection_count(), 0);

        // The infallible path hands back a dead ID.
        let id = signal.connect(|_| {});
        assert!(!signal.is_connected(id));
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_signal_emitter_is_object_safe() {
        let signal: Arc<dyn SignalEmitter> = Arc::new(Signal::<u8>::new());
        assert_eq!(signal.connection_count(), 0);
        assert!(signal.as_any().downcast_ref::<Signal<u8>>().is_some());
    }
}
