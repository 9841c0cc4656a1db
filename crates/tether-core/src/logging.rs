//! Logging facilities for Tether.
//!
//! Tether uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Subscription teardown failures are logged at `debug`, since they are
//! expected whenever a signal has already been dropped or disconnected
//! elsewhere. Failed stop-signal binds log at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=tether_core::tracker=debug`.
pub mod targets {
    /// Event loop target.
    pub const EVENT_LOOP: &str = "tether_core::event_loop";
    /// Timer system target.
    pub const TIMER: &str = "tether_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "tether_core::signal";
    /// Subscription tracker target.
    pub const TRACKER: &str = "tether_core::tracker";
    /// Object model target.
    pub const OBJECT: &str = "tether_core::object";
}

/// A performance tracing span guard.
///
/// The span is active until the guard is dropped.
///
/// ```
/// use tether_core::PerfSpan;
///
/// let _span = PerfSpan::new("bulk_teardown");
/// // ... timed work ...
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "tether_core::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("test_operation");
    }
}
