//! The performance timer: sessions, marks, measures and their log lines.

use std::fmt;

use crate::clock::{Clock, MonotonicClock};
use crate::error::Result;
use crate::format::{self, NOT_STARTED_WARNING};
use crate::report::Report;
use crate::session::{Phase, SessionState};
use crate::sink::{Sink, TracingSink};
use crate::store::{MarkStore, Measure, MeasureStore};

/// Records named marks and measures and times a primary run and an audit sub-run.
///
/// The timer owns its state and is driven by a single caller at a time. For
/// multi-threaded hosts wrap it in a [`SharedTimer`](crate::SharedTimer).
///
/// Two kinds of "not started" exist on purpose:
/// - [`end`](Self::end), [`audit_end`](Self::audit_end) and
///   [`time_elapsed`](Self::time_elapsed) fail with
///   [`TimerError::NotStarted`](crate::TimerError::NotStarted);
/// - [`mark`](Self::mark), [`measure`](Self::measure) and
///   [`log_measures`](Self::log_measures) emit one warning line and do nothing.
///
/// # Example
///
/// ```rust
/// use perf_timer::{ManualClock, MemorySink, PerformanceTimer};
///
/// let clock = ManualClock::new();
/// let sink = MemorySink::new();
/// let mut timer = PerformanceTimer::new(clock.clone(), sink.clone());
///
/// timer.start();
/// timer.mark("rules_start");
/// clock.advance(100.0);
/// timer.mark("rules_end");
/// timer.measure("rules", "rules_start", "rules_end")?;
/// timer.log_measures(Some("rules"));
///
/// assert_eq!(sink.lines(), vec!["Measure rules took 100ms"]);
/// assert_eq!(timer.time_elapsed()?, 100.0);
/// # Ok::<(), perf_timer::TimerError>(())
/// ```
pub struct PerformanceTimer {
    clock: Box<dyn Clock>,
    sink: Box<dyn Sink>,
    session: SessionState,
    marks: MarkStore,
    measures: MeasureStore,
    warned: bool,
}

impl PerformanceTimer {
    /// Create a timer reading time from `clock` and writing lines to `sink`
    pub fn new(clock: impl Clock + 'static, sink: impl Sink + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            sink: Box::new(sink),
            session: SessionState::default(),
            marks: MarkStore::default(),
            measures: MeasureStore::default(),
            warned: false,
        }
    }

    /// Begin the primary session.
    ///
    /// Discards all marks and measures. Calling it again restarts the session.
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.session.begin_primary(now);
        self.marks.clear();
        self.measures.clear();
        self.warned = false;
        tracing::debug!(at_ms = now, phase = %self.phase(), "primary session started");
    }

    /// End the primary session and log `Measure axe took {elapsed}ms`.
    ///
    /// Returns the elapsed milliseconds. Fails if the primary session is not running.
    pub fn end(&mut self) -> Result<f64> {
        let now = self.clock.now();
        let started_at = self.session.finish_primary()?;
        let elapsed = now - started_at;
        self.sink.emit(&format::primary_line(elapsed));
        tracing::debug!(elapsed_ms = elapsed, phase = %self.phase(), "primary session ended");
        Ok(elapsed)
    }

    /// Begin the audit session. Marks, measures and the primary session are untouched.
    pub fn audit_start(&mut self) {
        let now = self.clock.now();
        self.session.begin_audit(now);
        self.warned = false;
        tracing::debug!(at_ms = now, phase = %self.phase(), "audit session started");
    }

    /// End the audit session and log `Measure audit_start_to_end took {elapsed}ms`.
    ///
    /// Returns the elapsed milliseconds. Fails if the audit session is not running.
    pub fn audit_end(&mut self) -> Result<f64> {
        let now = self.clock.now();
        let started_at = self.session.finish_audit()?;
        let elapsed = now - started_at;
        self.sink.emit(&format::audit_line(elapsed));
        tracing::debug!(elapsed_ms = elapsed, phase = %self.phase(), "audit session ended");
        Ok(elapsed)
    }

    /// Record the current time under `name`, replacing any earlier mark of that name.
    ///
    /// Without a running session this only warns.
    pub fn mark(&mut self, name: &str) {
        if !self.ensure_started() {
            return;
        }
        let now = self.clock.now();
        self.marks.record(name, now);
        tracing::trace!(mark = name, at_ms = now, "mark recorded");
    }

    /// Record `name` as the time from `start_mark` to `end_mark`.
    ///
    /// The duration is stored as is, even when negative. Without a running
    /// session this only warns and returns `Ok`.
    ///
    /// # Errors
    ///
    /// [`TimerError::MissingMark`](crate::TimerError::MissingMark) naming the
    /// first of the two marks that does not exist.
    pub fn measure(&mut self, name: &str, start_mark: &str, end_mark: &str) -> Result<()> {
        if !self.ensure_started() {
            return Ok(());
        }
        let duration_ms = self.marks.span(start_mark, end_mark)?;
        self.measures.record(name, duration_ms);
        tracing::trace!(measure = name, duration_ms, "measure recorded");
        Ok(())
    }

    /// Log recorded measures as `Measure {name} took {duration}ms`.
    ///
    /// With a name, logs only that measure, or nothing if it was never
    /// measured. Without one, logs every measure in recording order. The
    /// measures are kept.
    pub fn log_measures(&mut self, name: Option<&str>) {
        if !self.ensure_started() {
            return;
        }
        match name {
            Some(name) => {
                if let Some(measure) = self.measures.get(name) {
                    self.sink
                        .emit(&format::measure_line(&measure.name, measure.duration_ms));
                }
            }
            None => {
                for measure in self.measures.iter() {
                    self.sink
                        .emit(&format::measure_line(&measure.name, measure.duration_ms));
                }
            }
        }
    }

    /// Milliseconds since the running session started.
    ///
    /// Measured from the primary start whenever the primary session is
    /// running, even if an audit session started later.
    ///
    /// # Errors
    ///
    /// [`TimerError::NotStarted`](crate::TimerError::NotStarted) when no session is running.
    pub fn time_elapsed(&self) -> Result<f64> {
        let reference = self.session.reference_start()?;
        Ok(self.clock.now() - reference)
    }

    /// Time `f` as the measure `name`, using marks `{name}_start` and `{name}_end`.
    ///
    /// Without a running session `f` still runs and only the warning is logged.
    pub fn time<R>(&mut self, name: &str, f: impl FnOnce() -> R) -> Result<R> {
        let start_mark = format!("{name}_start");
        let end_mark = format!("{name}_end");
        self.mark(&start_mark);
        let value = f();
        self.mark(&end_mark);
        self.measure(name, &start_mark, &end_mark)?;
        Ok(value)
    }

    /// Current session phase
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Whether a primary or audit session is running
    pub fn is_started(&self) -> bool {
        self.phase().is_active()
    }

    /// Timestamp of the named mark
    pub fn mark_timestamp(&self, name: &str) -> Option<f64> {
        self.marks.get(name).map(|mark| mark.timestamp)
    }

    /// Duration of the named measure
    pub fn measure_duration(&self, name: &str) -> Option<f64> {
        self.measures.get(name).map(|measure| measure.duration_ms)
    }

    /// Recorded measures in recording order
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.measures.iter()
    }

    /// Snapshot of the current phase and measures
    pub fn report(&self) -> Report {
        Report::new(self.phase(), self.measures.iter().cloned().collect())
    }

    /// Warn once per idle stretch. Returns whether a session is running.
    fn ensure_started(&mut self) -> bool {
        if self.is_started() {
            return true;
        }
        if !self.warned {
            self.warned = true;
            tracing::debug!(phase = %self.phase(), "timer used before any session was started");
            self.sink.emit(NOT_STARTED_WARNING);
        }
        false
    }
}

impl Default for PerformanceTimer {
    /// Monotonic clock, lines forwarded to `tracing` at INFO.
    fn default() -> Self {
        Self::new(MonotonicClock::new(), TracingSink::default())
    }
}

impl fmt::Debug for PerformanceTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceTimer")
            .field("phase", &self.phase())
            .field("primary_started_at", &self.session.primary_started_at())
            .field("audit_started_at", &self.session.audit_started_at())
            .field("marks", &self.marks.len())
            .field("measures", &self.measures.len())
            .finish()
    }
}
