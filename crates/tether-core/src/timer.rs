//! Timer system for Tether.
//!
//! Provides one-shot and repeating timers that integrate with the
//! [`EventLoop`](crate::EventLoop). Deadlines are measured on the loop's
//! virtual clock, so a test can drive minutes of timer activity instantly with
//! [`EventLoop::advance`](crate::EventLoop::advance).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::TimerError;
use crate::event_loop::EventLoop;
use crate::logging::targets;
use crate::signal::Signal;

new_key_type! {
    /// A unique identifier for one scheduled run of a timer.
    ///
    /// Restarting a [`Timer`] allocates a fresh ID, so a stale ID can never
    /// fire a restarted timer.
    pub struct TimerId;
}

/// Shortest period a repeating timer may have. A zero period would never let
/// the clock move past the timer's deadline.
pub const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    next_fire: Duration,
    interval: Duration,
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, then FIFO).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Duration,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages all timers of one event loop against a virtual clock.
pub(crate) struct TimerManager {
    /// Current virtual time, measured from loop creation.
    now: Duration,
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
    sequence: u64,
}

impl TimerManager {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a timer that first fires `interval` from now.
    pub fn start(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let interval = match kind {
            TimerKind::OneShot => interval,
            TimerKind::Repeating => interval.max(MIN_REPEAT_INTERVAL),
        };
        // Saturates: a deadline past the end of time never fires.
        let next_fire = self.now.saturating_add(interval);
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.enqueue(id, next_fire);
        id
    }

    fn enqueue(&mut self, id: TimerId, fire_time: Duration) {
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.sequence,
        });
    }

    /// Stop and remove a timer.
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.timers
            .remove(id)
            .map(|_| ())
            .ok_or(TimerError::InvalidTimerId)
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Time until the next live timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.drop_dead_entries();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_sub(self.now))
    }

    fn drop_dead_entries(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }

    /// Pop the next timer due at or before `deadline`, moving the clock to its
    /// fire time.
    ///
    /// Returns the fired ID and whether the timer is now finished (one-shot).
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, bool)> {
        self.drop_dead_entries();
        let entry = *self.queue.peek()?;
        if entry.fire_time > deadline || entry.fire_time == Duration::MAX {
            return None;
        }
        self.queue.pop();
        self.now = self.now.max(entry.fire_time);

        let timer = self.timers.get_mut(entry.id)?;
        tracing::trace!(target: targets::TIMER, id = ?entry.id, at = ?entry.fire_time, "timer fired");
        match timer.kind {
            TimerKind::OneShot => {
                self.timers.remove(entry.id);
                Some((entry.id, true))
            }
            TimerKind::Repeating => {
                timer.next_fire = entry.fire_time.saturating_add(timer.interval);
                let next_fire = timer.next_fire;
                self.enqueue(entry.id, next_fire);
                Some((entry.id, false))
            }
        }
    }

    /// Move the clock forward to `time`; never moves it backwards.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

/// State of a [`Timer`] shared with the event loop's dispatch table.
pub(crate) struct TimerShared {
    event_loop: EventLoop,
    state: Mutex<TimerState>,
    timeout: Arc<Signal<()>>,
}

struct TimerState {
    interval: Duration,
    single_shot: bool,
    running: Option<TimerId>,
}

impl TimerShared {
    /// Deliver a fire of `id`. Fires of a superseded run are ignored.
    pub(crate) fn fire(&self, id: TimerId) {
        {
            let mut state = self.state.lock();
            if state.running != Some(id) {
                return;
            }
            if state.single_shot {
                state.running = None;
            }
        }
        self.timeout.emit(());
    }
}

/// A one-shot or repeating timer bound to an [`EventLoop`].
///
/// Connect to [`timeout`](Self::timeout) to be called back. Stopping is
/// synchronous: once [`stop`](Self::stop) returns, the timer will not fire
/// again until it is restarted. Dropping a timer stops it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tether_core::{EventLoop, Timer};
///
/// let event_loop = EventLoop::new();
/// let timer = Timer::new(&event_loop);
/// timer.set_single_shot(true);
/// timer.start_with(Duration::from_secs(2));
///
/// event_loop.advance(Duration::from_secs(1));
/// assert!(timer.is_active());
/// event_loop.advance(Duration::from_secs(1));
/// assert!(!timer.is_active());
/// ```
pub struct Timer {
    shared: Arc<TimerShared>,
}

impl Timer {
    /// Create a stopped, repeating timer with a zero interval.
    pub fn new(event_loop: &EventLoop) -> Self {
        Self {
            shared: Arc::new(TimerShared {
                event_loop: event_loop.clone(),
                state: Mutex::new(TimerState {
                    interval: Duration::ZERO,
                    single_shot: false,
                    running: None,
                }),
                timeout: Arc::new(Signal::new()),
            }),
        }
    }

    /// Signal emitted each time the timer fires.
    pub fn timeout(&self) -> &Arc<Signal<()>> {
        &self.shared.timeout
    }

    pub fn interval(&self) -> Duration {
        self.shared.state.lock().interval
    }

    /// Set the interval. Takes effect the next time the timer is started.
    pub fn set_interval(&self, interval: Duration) {
        self.shared.state.lock().interval = interval;
    }

    pub fn is_single_shot(&self) -> bool {
        self.shared.state.lock().single_shot
    }

    pub fn set_single_shot(&self, single_shot: bool) {
        self.shared.state.lock().single_shot = single_shot;
    }

    /// Start the timer, restarting it if it is already running.
    pub fn start(&self) {
        let mut state = self.shared.state.lock();
        if let Some(previous) = state.running.take() {
            self.shared.event_loop.cancel_timer(previous);
        }
        let kind = if state.single_shot {
            TimerKind::OneShot
        } else {
            TimerKind::Repeating
        };
        let id = self
            .shared
            .event_loop
            .schedule_timer(state.interval, kind, Arc::downgrade(&self.shared));
        state.running = Some(id);
    }

    /// Set the interval and start the timer.
    pub fn start_with(&self, interval: Duration) {
        self.set_interval(interval);
        self.start();
    }

    /// Stop the timer. Does nothing if it is not running.
    pub fn stop(&self) {
        let previous = self.shared.state.lock().running.take();
        if let Some(id) = previous {
            self.shared.event_loop.cancel_timer(id);
        }
    }

    /// Whether the timer is scheduled to fire.
    pub fn is_active(&self) -> bool {
        let running = self.shared.state.lock().running;
        running.is_some_and(|id| self.shared.event_loop.is_timer_active(id))
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}
