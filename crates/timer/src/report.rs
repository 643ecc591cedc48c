//! Snapshot of recorded measures.

use std::fmt;

use serde::Serialize;

use crate::format::measure_line;
use crate::session::Phase;
use crate::store::Measure;

/// Point-in-time copy of a timer's measures, in recording order.
///
/// A report is detached from the timer: it can be sent to another thread,
/// serialized, or printed after the timer has been restarted.
///
/// # Example
///
/// ```rust
/// use perf_timer::{ManualClock, MemorySink, PerformanceTimer};
///
/// let clock = ManualClock::new();
/// let mut timer = PerformanceTimer::new(clock.clone(), MemorySink::new());
/// timer.start();
/// timer.mark("load_start");
/// clock.advance(8.0);
/// timer.mark("load_end");
/// timer.measure("load", "load_start", "load_end")?;
///
/// let report = timer.report();
/// assert_eq!(report.to_string(), "Measure load took 8ms\n");
/// # Ok::<(), perf_timer::TimerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    phase: Phase,
    measures: Vec<Measure>,
}

impl Report {
    pub(crate) fn new(phase: Phase, measures: Vec<Measure>) -> Self {
        Self { phase, measures }
    }

    /// Session phase at the time of the snapshot
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Measures in recording order
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Duration of the named measure
    pub fn duration(&self, name: &str) -> Option<f64> {
        self.measures
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.duration_ms)
    }

    /// Whether no measures were recorded
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Serialize the report as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for measure in &self.measures {
            writeln!(f, "{}", measure_line(&measure.name, measure.duration_ms))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Report {
        Report::new(
            Phase::Primary,
            vec![
                Measure {
                    name: "foo".into(),
                    duration_ms: 1.5,
                },
                Measure {
                    name: "bar".into(),
                    duration_ms: 20.0,
                },
            ],
        )
    }

    #[test]
    fn display_renders_one_line_per_measure() {
        assert_eq!(
            sample().to_string(),
            "Measure foo took 1.5ms\nMeasure bar took 20ms\n"
        );
    }

    #[test]
    fn empty_report_renders_nothing() {
        let report = Report::new(Phase::Idle, Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn looks_up_durations() {
        let report = sample();
        assert_eq!(report.duration("bar"), Some(20.0));
        assert_eq!(report.duration("baz"), None);
        assert_eq!(report.phase(), Phase::Primary);
    }

    #[test]
    fn serializes_to_json() {
        let json = sample().to_json().expect("report serializes");
        assert_eq!(
            json,
            r#"{"phase":"primary","measures":[{"name":"foo","duration_ms":1.5},{"name":"bar","duration_ms":20.0}]}"#
        );
    }
}
