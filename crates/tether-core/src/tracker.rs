//! Subscription lifecycle bookkeeping.
//!
//! A [`SubscriptionTracker`] records every `(signal, connection)` pair an owner
//! creates so that all of them can be torn down in one call, with no record
//! outliving its connection and no teardown failure escaping.
//!
//! Owners that want their *own* signals emptied of downstream observers expose
//! them through a [`SignalRegistry`] and implement [`SignalOwner`];
//! [`disconnect_all_from`] then walks that explicit registry.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tether_core::{Signal, SubscriptionTracker};
//!
//! let saved = Arc::new(Signal::<String>::new());
//! let mut tracker = SubscriptionTracker::new();
//!
//! tracker.connect(&saved, |path| println!("saved {path}")).unwrap();
//! assert_eq!(saved.connection_count(), 1);
//!
//! tracker.disconnect_all();
//! assert_eq!(saved.connection_count(), 0);
//! assert!(tracker.is_empty());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use crate::error::SignalError;
use crate::logging::{targets, PerfSpan};
use crate::signal::{ConnectionId, SignalEmitter, SignalSource};

/// Name of the lifecycle signal that bulk teardown leaves alone.
pub const DESTROYED_SIGNAL: &str = "destroyed";

/// One live subscription: the signal it was made on and its connection.
///
/// The signal is held weakly so that tracking a subscription never keeps a
/// signal alive. A record whose signal is gone counts as a teardown failure.
#[derive(Clone)]
pub struct SubscriptionRecord {
    signal: Weak<dyn SignalEmitter>,
    connection: ConnectionId,
}

impl SubscriptionRecord {
    /// Create a record for an existing connection on `signal`.
    pub fn new<S>(signal: &Arc<S>, connection: ConnectionId) -> Self
    where
        S: SignalEmitter + 'static,
    {
        let erased: Arc<dyn SignalEmitter> = signal.clone();
        Self {
            signal: Arc::downgrade(&erased),
            connection,
        }
    }

    /// The connection this record tracks.
    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    /// Whether the record's signal is still alive.
    pub fn is_signal_alive(&self) -> bool {
        self.signal.strong_count() > 0
    }

    /// Whether this record was made on `signal`.
    pub fn is_on<S>(&self, signal: &Arc<S>) -> bool
    where
        S: SignalEmitter + 'static,
    {
        std::ptr::addr_eq(self.signal.as_ptr(), Arc::as_ptr(signal))
    }

    /// Disconnect the tracked connection. Failures are logged, never raised.
    fn disconnect(self) -> bool {
        match self.signal.upgrade() {
            Some(signal) => disconnect_signal(signal.as_ref(), self.connection),
            None => {
                tracing::debug!(
                    target: targets::TRACKER,
                    connection = ?self.connection,
                    "could not disconnect: signal already dropped"
                );
                false
            }
        }
    }
}

impl fmt::Debug for SubscriptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRecord")
            .field("connection", &self.connection)
            .field("signal_alive", &self.is_signal_alive())
            .finish()
    }
}

/// Disconnect one connection from a signal, best effort.
///
/// Returns `true` if the connection was removed. A connection that is already
/// gone, or that belongs to another signal, is logged at debug level.
pub fn disconnect_signal(signal: &dyn SignalEmitter, connection: ConnectionId) -> bool {
    let removed = signal.disconnect(connection);
    if !removed {
        tracing::debug!(
            target: targets::TRACKER,
            ?connection,
            "could not disconnect: connection not found on signal"
        );
    }
    removed
}

/// Ordered set of subscriptions made by one owner, with bulk teardown.
///
/// Records are kept in insertion order. [`disconnect_all`](Self::disconnect_all)
/// tears them down newest first and always leaves the tracker empty.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    records: Vec<SubscriptionRecord>,
}

impl SubscriptionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect `handler` to `signal` and record the subscription.
    ///
    /// No deduplication is done: connecting the same handler twice yields two
    /// records and two live connections. If the signal refuses the
    /// connection, nothing is recorded and the error is returned.
    pub fn connect<Args, S, F>(
        &mut self,
        signal: &Arc<S>,
        handler: F,
    ) -> Result<ConnectionId, SignalError>
    where
        S: SignalSource<Args> + 'static,
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = signal.try_connect(Arc::new(handler))?;
        self.records.push(SubscriptionRecord::new(signal, connection));
        tracing::trace!(target: targets::TRACKER, ?connection, tracked = self.records.len(), "tracked subscription");
        Ok(connection)
    }

    /// Adopt a connection that was made elsewhere.
    pub fn track<S>(&mut self, signal: &Arc<S>, connection: ConnectionId)
    where
        S: SignalEmitter + 'static,
    {
        self.records.push(SubscriptionRecord::new(signal, connection));
    }

    /// Disconnect every tracked subscription, newest first.
    ///
    /// Each failure is logged and skipped; the tracker is empty on return.
    /// Returns the number of connections actually removed.
    pub fn disconnect_all(&mut self) -> usize {
        let mut removed = 0;
        while let Some(record) = self.records.pop() {
            if record.disconnect() {
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(target: targets::TRACKER, removed, "disconnected tracked subscriptions");
        }
        removed
    }

    /// Number of tracked subscriptions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tracked subscriptions in insertion order.
    pub fn records(&self) -> &[SubscriptionRecord] {
        &self.records
    }
}

impl Drop for SubscriptionTracker {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}

/// Explicit list of the signals an owner exposes, in registration order.
#[derive(Default)]
pub struct SignalRegistry {
    entries: Vec<(&'static str, Arc<dyn SignalEmitter>)>,
}

impl SignalRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named signal. Re-registering a name replaces the entry.
    pub fn register<S>(&mut self, name: &'static str, signal: &Arc<S>)
    where
        S: SignalEmitter + 'static,
    {
        let erased: Arc<dyn SignalEmitter> = signal.clone();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = erased;
        } else {
            self.entries.push((name, erased));
        }
    }

    /// Look up a signal by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn SignalEmitter>> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, s)| s)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Iterate over `(name, signal)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &dyn SignalEmitter)> + '_ {
        self.entries.iter().map(|(n, s)| (*n, s.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// An object that publishes its signals through a [`SignalRegistry`].
pub trait SignalOwner {
    /// The owner's registered signals.
    fn signal_registry(&self) -> &SignalRegistry;
}

/// Disconnect every observer from every signal `owner` exposes, except the
/// `destroyed` lifecycle signal.
///
/// Returns the total number of connections removed. Connections that vanish
/// while teardown is in progress are logged and skipped.
pub fn disconnect_all_from(owner: &dyn SignalOwner) -> usize {
    let _span = PerfSpan::new("disconnect_all_from");
    let mut removed = 0;
    for (name, signal) in owner.signal_registry().iter() {
        if name == DESTROYED_SIGNAL {
            continue;
        }
        for connection in signal.connection_ids() {
            if disconnect_signal(signal, connection) {
                removed += 1;
            }
        }
        tracing::trace!(target: targets::TRACKER, signal = name, "signal emptied");
    }
    removed
}
