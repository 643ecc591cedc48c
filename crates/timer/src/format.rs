//! Line formats scraped by downstream tooling. These must not change.

/// Emitted when marks or measures are used before any session has started.
pub const NOT_STARTED_WARNING: &str = "Axe must be started before using performanceTimer";

/// Measure name reported when the primary session ends.
pub const PRIMARY_MEASURE: &str = "axe";

/// Measure name reported when the audit session ends.
pub const AUDIT_MEASURE: &str = "audit_start_to_end";

/// `Measure {name} took {duration_ms}ms`
///
/// Durations use the shortest representation that round-trips, so
/// sub-millisecond differences survive and whole values print without a
/// trailing `.0`.
pub fn measure_line(name: &str, duration_ms: f64) -> String {
    format!("Measure {name} took {duration_ms}ms")
}

/// Line logged by [`PerformanceTimer::end`](crate::PerformanceTimer::end).
pub fn primary_line(duration_ms: f64) -> String {
    measure_line(PRIMARY_MEASURE, duration_ms)
}

/// Line logged by [`PerformanceTimer::audit_end`](crate::PerformanceTimer::audit_end).
pub fn audit_line(duration_ms: f64) -> String {
    measure_line(AUDIT_MEASURE, duration_ms)
}

/// Pull the duration back out of a `Measure ... took {value}ms` line.
pub fn parse_duration(line: &str) -> Option<f64> {
    let rest = line.strip_suffix("ms")?;
    let (_, value) = rest.rsplit_once(" took ")?;
    value.parse().ok()
}
