//! Error types for timer operations and logger installation.

use std::fmt;

/// Which timing session an operation expected to be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    /// The primary run bounded by `start`/`end`.
    Primary,
    /// The audit sub-run bounded by `audit_start`/`audit_end`.
    Audit,
    /// Either session would have satisfied the operation.
    Any,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Audit => f.write_str("audit"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// Errors raised by [`PerformanceTimer`](crate::PerformanceTimer) operations.
///
/// Calling `mark`, `measure` or `log_measures` before any session is running
/// is not an error: those degrade to a single warning line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The required session is not running.
    #[error("{session} session has not been started")]
    NotStarted {
        /// The session the operation needed.
        session: SessionKind,
    },

    /// A measure referenced a mark that was never recorded.
    #[error("mark not found: {name}")]
    MissingMark {
        /// Name of the missing mark.
        name: String,
    },
}

impl TimerError {
    pub(crate) fn not_started(session: SessionKind) -> Self {
        Self::NotStarted { session }
    }

    pub(crate) fn missing_mark(name: impl Into<String>) -> Self {
        Self::MissingMark { name: name.into() }
    }

    /// Whether this is a [`TimerError::NotStarted`] error.
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted { .. })
    }

    /// Name of the missing mark, if this is a [`TimerError::MissingMark`] error.
    pub fn missing_mark_name(&self) -> Option<&str> {
        match self {
            Self::MissingMark { name } => Some(name),
            Self::NotStarted { .. } => None,
        }
    }
}

/// Errors from installing the global `tracing` subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The level directive could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// The rejected directive.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for timer operations.
pub type Result<T, E = TimerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_started_display() {
        let err = TimerError::not_started(SessionKind::Primary);
        assert_eq!(err.to_string(), "primary session has not been started");
        assert!(err.is_not_started());
        assert_eq!(err.missing_mark_name(), None);
    }

    #[test]
    fn missing_mark_carries_name() {
        let err = TimerError::missing_mark("nope");
        assert_eq!(err.to_string(), "mark not found: nope");
        assert_eq!(err.missing_mark_name(), Some("nope"));
        assert!(!err.is_not_started());
    }

    #[test]
    fn filter_error_display() {
        let err = LogError::Filter {
            filter: "debug,=".into(),
            reason: "bad directive".into(),
        };
        assert_eq!(err.to_string(), "invalid filter 'debug,=': bad directive");
    }
}
