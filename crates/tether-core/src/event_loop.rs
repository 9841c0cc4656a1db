//! The single-threaded event loop that drives timers.
//!
//! All timer callbacks run on the thread that drives the loop, one at a time,
//! so widgets built on top of it need no locking discipline beyond not holding
//! their own locks while emitting.
//!
//! Time is virtual. [`EventLoop::advance`] moves the clock forward and
//! dispatches every timer that becomes due, in deadline order, which makes
//! timeout behaviour fully deterministic under test. [`EventLoop::run`] drives
//! the same machinery against the wall clock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;

use crate::logging::targets;
use crate::timer::{TimerId, TimerKind, TimerManager, TimerShared};

struct EventLoopInner {
    timers: Mutex<TimerManager>,
    /// Which [`Timer`](crate::Timer) each scheduled run belongs to.
    handlers: Mutex<HashMap<TimerId, Weak<TimerShared>>>,
    should_quit: AtomicBool,
}

/// Handle to an event loop. Cloning yields another handle to the same loop.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tether_core::{EventLoop, Timer};
///
/// let event_loop = EventLoop::new();
/// let ticks = Arc::new(AtomicUsize::new(0));
///
/// let timer = Timer::new(&event_loop);
/// let ticks_clone = ticks.clone();
/// timer.timeout().connect(move |_| {
///     ticks_clone.fetch_add(1, Ordering::SeqCst);
/// });
/// timer.start_with(Duration::from_millis(100));
///
/// event_loop.advance(Duration::from_secs(1));
/// assert_eq!(ticks.load(Ordering::SeqCst), 10);
/// ```
#[derive(Clone)]
pub struct EventLoop {
    inner: Arc<EventLoopInner>,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Create a new event loop with its clock at zero.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EventLoopInner {
                timers: Mutex::new(TimerManager::new()),
                handlers: Mutex::new(HashMap::new()),
                should_quit: AtomicBool::new(false),
            }),
        }
    }

    /// Current virtual time since the loop was created.
    pub fn now(&self) -> Duration {
        self.inner.timers.lock().now()
    }

    /// Advance the clock by `by`, dispatching every timer that falls due.
    ///
    /// The clock is moved to each timer's deadline before its callback runs,
    /// so callbacks observe the time they were scheduled for. Timers started
    /// by a callback are dispatched in the same call if they fall due.
    /// Returns the number of timeouts delivered.
    #[tracing::instrument(skip(self), target = "tether_core::event_loop", level = "trace")]
    pub fn advance(&self, by: Duration) -> usize {
        let deadline = self.now().saturating_add(by);
        let mut dispatched = 0;

        loop {
            let due = self.inner.timers.lock().pop_due(deadline);
            let Some((id, finished)) = due else {
                break;
            };

            let handler = {
                let mut handlers = self.inner.handlers.lock();
                if finished {
                    handlers.remove(&id)
                } else {
                    handlers.get(&id).cloned()
                }
            };

            if let Some(timer) = handler.and_then(|weak| weak.upgrade()) {
                timer.fire(id);
                dispatched += 1;
            } else {
                // Owner is gone; make sure the run does not keep repeating.
                self.cancel_timer(id);
            }
        }

        self.inner.timers.lock().advance_to(deadline);
        if dispatched > 0 {
            tracing::trace!(target: targets::EVENT_LOOP, dispatched, now = ?deadline, "advanced clock");
        }
        dispatched
    }

    /// Dispatch timers that are already due without moving the clock.
    pub fn process_expired(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Time until the next timer fires, or `None` if no timer is running.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.timers.lock().time_until_next()
    }

    /// Number of running timers.
    pub fn active_timer_count(&self) -> usize {
        self.inner.timers.lock().active_count()
    }

    /// Drive the loop against the wall clock until [`quit`](Self::quit) is
    /// called or no timer remains. Returns the number of timeouts delivered.
    pub fn run(&self) -> usize {
        self.inner.should_quit.store(false, Ordering::SeqCst);
        tracing::debug!(target: targets::EVENT_LOOP, "event loop started");

        let mut dispatched = 0;
        while !self.should_quit() {
            let Some(wait) = self.time_until_next() else {
                break;
            };
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            dispatched += self.advance(wait);
        }

        tracing::debug!(target: targets::EVENT_LOOP, dispatched, "event loop finished");
        dispatched
    }

    /// Ask a running loop to return after the current dispatch.
    pub fn quit(&self) {
        self.inner.should_quit.store(true, Ordering::SeqCst);
    }

    /// Whether [`quit`](Self::quit) has been requested.
    pub fn should_quit(&self) -> bool {
        self.inner.should_quit.load(Ordering::SeqCst)
    }

    pub(crate) fn schedule_timer(
        &self,
        interval: Duration,
        kind: TimerKind,
        owner: Weak<TimerShared>,
    ) -> TimerId {
        let id = self.inner.timers.lock().start(interval, kind);
        self.inner.handlers.lock().insert(id, owner);
        tracing::trace!(target: targets::TIMER, ?id, ?interval, ?kind, "timer scheduled");
        id
    }

    pub(crate) fn cancel_timer(&self, id: TimerId) -> bool {
        let stopped = self.inner.timers.lock().stop(id).is_ok();
        self.inner.handlers.lock().remove(&id);
        stopped
    }

    pub(crate) fn is_timer_active(&self, id: TimerId) -> bool {
        self.inner.timers.lock().is_active(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Timer;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_clock_advances_without_timers() {
        let event_loop = EventLoop::new();
        assert_eq!(event_loop.advance(Duration::from_secs(5)), 0);
        assert_eq!(event_loop.now(), Duration::from_secs(5));
        assert_eq!(event_loop.time_until_next(), None);
    }

    #[test]
    fn test_process_expired_keeps_the_clock() {
        let event_loop = EventLoop::new();
        let timer = Timer::new(&event_loop);
        timer.set_single_shot(true);
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();
        timer.timeout().connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        timer.start_with(Duration::from_millis(10));
        assert_eq!(event_loop.process_expired(), 0);

        timer.start_with(Duration::ZERO);
        assert_eq!(event_loop.process_expired(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(event_loop.now(), Duration::ZERO);
    }

    #[test]
    fn test_callbacks_see_their_deadline() {
        let event_loop = EventLoop::new();
        let timer = Timer::new(&event_loop);
        timer.set_single_shot(true);
        let seen = Arc::new(Mutex::new(None));

        let seen_clone = seen.clone();
        let loop_clone = event_loop.clone();
        timer.timeout().connect(move |_| {
            *seen_clone.lock() = Some(loop_clone.now());
        });
        timer.start_with(Duration::from_millis(250));

        event_loop.advance(Duration::from_secs(1));
        assert_eq!(*seen.lock(), Some(Duration::from_millis(250)));
        assert_eq!(event_loop.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_timer_started_in_callback_fires_same_advance() {
        let event_loop = EventLoop::new();
        let first = Arc::new(Timer::new(&event_loop));
        let second = Arc::new(Timer::new(&event_loop));
        first.set_single_shot(true);
        second.set_single_shot(true);
        let fired = Arc::new(AtomicUsize::new(0));

        let second_clone = second.clone();
        first.timeout().connect(move |_| {
            second_clone.start_with(Duration::from_millis(100));
        });
        let fired_clone = fired.clone();
        second.timeout().connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });

        first.start_with(Duration::from_millis(100));
        assert_eq!(event_loop.advance(Duration::from_millis(200)), 2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_timer_stopped_in_callback_does_not_fire_again() {
        let event_loop = EventLoop::new();
        let timer = Arc::new(Timer::new(&event_loop));
        let fired = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&timer);
        let fired_clone = fired.clone();
        timer.timeout().connect(move |_| {
            fired_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(timer) = weak.upgrade() {
                timer.stop();
            }
        });
        timer.start_with(Duration::from_millis(10));

        event_loop.advance(Duration::from_secs(1));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(event_loop.active_timer_count(), 0);
    }

    #[test]
    fn test_run_returns_when_idle() {
        let event_loop = EventLoop::new();
        let timer = Timer::new(&event_loop);
        timer.set_single_shot(true);
        timer.start_with(Duration::from_millis(5));

        assert_eq!(event_loop.run(), 1);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_quit_stops_run() {
        let event_loop = EventLoop::new();
        let timer = Timer::new(&event_loop);
        let loop_clone = event_loop.clone();
        timer.timeout().connect(move |_| loop_clone.quit());
        timer.start_with(Duration::from_millis(1));

        assert_eq!(event_loop.run(), 1);
        assert!(event_loop.should_quit());
        assert!(timer.is_active());
    }
}
