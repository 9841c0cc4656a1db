//! Integration tests for tracked subscriptions driven by the event loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tether_core::{
    disconnect_all_from, ConnectionId, EventLoop, Signal, SignalOwner, SignalRegistry,
    SubscriptionTracker, Timer, DESTROYED_SIGNAL,
};

static_assertions::assert_impl_all!(SubscriptionTracker: Send, Sync, Default);
static_assertions::assert_impl_all!(EventLoop: Send, Sync, Clone);
static_assertions::assert_impl_all!(Timer: Send, Sync);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A download-like object with a progress signal driven by a timer.
struct Download {
    progress: Arc<Signal<u8>>,
    finished: Arc<Signal<()>>,
    destroyed: Arc<Signal<()>>,
    registry: SignalRegistry,
}

impl Download {
    fn new() -> Self {
        let progress = Arc::new(Signal::<u8>::new());
        let finished = Arc::new(Signal::<()>::new());
        let destroyed = Arc::new(Signal::<()>::new());
        let mut registry = SignalRegistry::new();
        registry.register("progress", &progress);
        registry.register("finished", &finished);
        registry.register(DESTROYED_SIGNAL, &destroyed);
        Self {
            progress,
            finished,
            destroyed,
            registry,
        }
    }
}

impl SignalOwner for Download {
    fn signal_registry(&self) -> &SignalRegistry {
        &self.registry
    }
}

#[test]
fn tracker_tears_down_timer_driven_subscriptions() {
    init_tracing();
    let event_loop = EventLoop::new();
    let download = Arc::new(Download::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let timer = Timer::new(&event_loop);
    let step = Arc::new(AtomicUsize::new(0));
    let download_clone = download.clone();
    let step_clone = step.clone();
    timer.timeout().connect(move |_| {
        let pct = (step_clone.fetch_add(1, Ordering::SeqCst) + 1) * 25;
        download_clone.progress.emit(pct as u8);
        if pct == 100 {
            download_clone.finished.emit(());
        }
    });

    let mut tracker = SubscriptionTracker::new();
    let seen_clone = seen.clone();
    tracker
        .connect(&download.progress, move |pct: &u8| seen_clone.lock().push(*pct))
        .unwrap();
    let finished = Arc::new(AtomicUsize::new(0));
    let finished_clone = finished.clone();
    tracker
        .connect(&download.finished, move |_| {
            finished_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    timer.start_with(Duration::from_millis(250));
    event_loop.advance(Duration::from_millis(500));
    assert_eq!(*seen.lock(), vec![25, 50]);

    assert_eq!(tracker.disconnect_all(), 2);
    assert!(tracker.is_empty());

    event_loop.advance(Duration::from_secs(1));
    assert_eq!(*seen.lock(), vec![25, 50]);
    assert_eq!(finished.load(Ordering::SeqCst), 0);
    assert_eq!(download.progress.connection_count(), 0);
}

#[test]
fn teardown_survives_signals_dropped_first() {
    init_tracing();
    let mut tracker = SubscriptionTracker::new();
    let survivors = Arc::new(Signal::<()>::new());

    {
        let download = Download::new();
        tracker.connect(&download.progress, |_| {}).unwrap();
        tracker.connect(&survivors, |_| {}).unwrap();
        tracker.connect(&download.finished, |_| {}).unwrap();
    }

    assert_eq!(tracker.len(), 3);
    assert_eq!(tracker.disconnect_all(), 1);
    assert!(tracker.is_empty());
    assert_eq!(survivors.connection_count(), 0);
}

#[test]
fn owner_teardown_spares_destroyed_observers() {
    let download = Download::new();
    let ids: Vec<ConnectionId> = vec![
        download.progress.connect(|_| {}),
        download.progress.connect(|_| {}),
        download.finished.connect(|_| {}),
    ];
    let destroyed = Arc::new(AtomicUsize::new(0));
    let destroyed_clone = destroyed.clone();
    download.destroyed.connect(move |_| {
        destroyed_clone.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(disconnect_all_from(&download), 3);
    assert_eq!(disconnect_all_from(&download), 0);
    assert!(ids
        .iter()
        .all(|id| !download.progress.is_connected(*id) && !download.finished.is_connected(*id)));

    download.destroyed.emit(());
    assert_eq!(destroyed.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_tracker_with_owner_disconnects() {
    struct Owner {
        _subscriptions: SubscriptionTracker,
    }

    let finished = Arc::new(Signal::<()>::new());
    let mut subscriptions = SubscriptionTracker::new();
    subscriptions.connect(&finished, |_| {}).unwrap();
    let owner = Owner {
        _subscriptions: subscriptions,
    };
    assert_eq!(finished.connection_count(), 1);

    drop(owner);
    assert_eq!(finished.connection_count(), 0);
}
