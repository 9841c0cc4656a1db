//! Error types for Tether core.

use std::fmt;

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The timer ID is invalid or has already been removed.
    InvalidTimerId,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimerId => write!(f, "Invalid or expired timer ID"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The signal has been closed and accepts no new connections.
    SignalClosed,
    /// The signal source refused the connection.
    BindRejected(String),
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignalClosed => write!(f, "Signal has been closed"),
            Self::BindRejected(reason) => write!(f, "Signal refused connection: {reason}"),
        }
    }
}

impl std::error::Error for SignalError {}
