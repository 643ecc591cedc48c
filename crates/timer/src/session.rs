//! Primary and audit session lifecycle.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SessionKind, TimerError};

/// Which sessions are currently running.
///
/// The primary and audit sessions are independent: both may run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session is running.
    Idle,
    /// Only the primary session is running.
    Primary,
    /// Only the audit session is running.
    Audit,
    /// Both sessions are running.
    Both,
}

impl Phase {
    /// Whether at least one session is running
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Primary => f.write_str("primary"),
            Self::Audit => f.write_str("audit"),
            Self::Both => f.write_str("both"),
        }
    }
}

/// Start timestamps of the two sessions, in clock milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SessionState {
    primary_started_at: Option<f64>,
    audit_started_at: Option<f64>,
}

impl SessionState {
    pub(crate) fn begin_primary(&mut self, now: f64) {
        self.primary_started_at = Some(now);
    }

    pub(crate) fn begin_audit(&mut self, now: f64) {
        self.audit_started_at = Some(now);
    }

    /// Clear the primary session, returning its start time.
    pub(crate) fn finish_primary(&mut self) -> Result<f64> {
        self.primary_started_at
            .take()
            .ok_or(TimerError::not_started(SessionKind::Primary))
    }

    /// Clear the audit session, returning its start time.
    pub(crate) fn finish_audit(&mut self) -> Result<f64> {
        self.audit_started_at
            .take()
            .ok_or(TimerError::not_started(SessionKind::Audit))
    }

    /// Start time elapsed time is measured from.
    ///
    /// The primary session wins whenever it is running; the audit start is
    /// only consulted on its own.
    pub(crate) fn reference_start(&self) -> Result<f64> {
        self.primary_started_at
            .or(self.audit_started_at)
            .ok_or(TimerError::not_started(SessionKind::Any))
    }

    pub(crate) fn primary_started_at(&self) -> Option<f64> {
        self.primary_started_at
    }

    pub(crate) fn audit_started_at(&self) -> Option<f64> {
        self.audit_started_at
    }

    pub(crate) fn phase(&self) -> Phase {
        match (self.primary_started_at, self.audit_started_at) {
            (None, None) => Phase::Idle,
            (Some(_), None) => Phase::Primary,
            (None, Some(_)) => Phase::Audit,
            (Some(_), Some(_)) => Phase::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn starts_idle() {
        let state = SessionState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.phase().is_active());
        assert_eq!(
            state.reference_start(),
            Err(TimerError::not_started(SessionKind::Any))
        );
    }

    #[rstest]
    #[case(Some(10.0), None, Phase::Primary, 10.0)]
    #[case(None, Some(20.0), Phase::Audit, 20.0)]
    #[case(Some(10.0), Some(20.0), Phase::Both, 10.0)]
    #[case(Some(30.0), Some(20.0), Phase::Both, 30.0)]
    fn primary_takes_precedence(
        #[case] primary: Option<f64>,
        #[case] audit: Option<f64>,
        #[case] phase: Phase,
        #[case] reference: f64,
    ) {
        let mut state = SessionState::default();
        if let Some(at) = primary {
            state.begin_primary(at);
        }
        if let Some(at) = audit {
            state.begin_audit(at);
        }

        assert_eq!(state.phase(), phase);
        assert_eq!(state.reference_start(), Ok(reference));
    }

    #[test]
    fn finishing_clears_only_that_session() {
        let mut state = SessionState::default();
        state.begin_primary(1.0);
        state.begin_audit(2.0);

        assert_eq!(state.finish_primary(), Ok(1.0));
        assert_eq!(state.phase(), Phase::Audit);
        assert_eq!(state.primary_started_at(), None);
        assert_eq!(state.audit_started_at(), Some(2.0));

        assert_eq!(state.finish_audit(), Ok(2.0));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn finishing_twice_fails() {
        let mut state = SessionState::default();
        state.begin_primary(1.0);
        state.begin_audit(1.0);
        assert!(state.finish_primary().is_ok());
        assert!(state.finish_audit().is_ok());

        assert_eq!(
            state.finish_primary(),
            Err(TimerError::not_started(SessionKind::Primary))
        );
        assert_eq!(
            state.finish_audit(),
            Err(TimerError::not_started(SessionKind::Audit))
        );
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Both.to_string(), "both");
        assert!(Phase::Audit.is_active());
    }
}
