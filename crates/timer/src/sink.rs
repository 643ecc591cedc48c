//! Output sinks for formatted timer lines.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for fully formatted log lines.
///
/// Implementations should be fast and non-blocking. Any `Fn(&str)` closure
/// is a sink.
///
/// # Example
///
/// ```rust
/// use perf_timer::{ManualClock, PerformanceTimer};
///
/// let mut timer = PerformanceTimer::new(ManualClock::new(), |line: &str| println!("{line}"));
/// timer.start();
/// ```
pub trait Sink: Send + Sync {
    /// Receive one line of output
    fn emit(&self, line: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line);
    }
}

/// Default sink: forwards every line as a `tracing` event.
///
/// Events are emitted under the `perf_timer` target so they can be filtered
/// independently of the host application's own logs.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Create a sink emitting at `level`
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }

    /// Level lines are emitted at
    pub fn level(&self) -> tracing::Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::INFO)
    }
}

impl Sink for TracingSink {
    fn emit(&self, line: &str) {
        match self.level {
            tracing::Level::ERROR => tracing::error!(target: "perf_timer", "{line}"),
            tracing::Level::WARN => tracing::warn!(target: "perf_timer", "{line}"),
            tracing::Level::INFO => tracing::info!(target: "perf_timer", "{line}"),
            tracing::Level::DEBUG => tracing::debug!(target: "perf_timer", "{line}"),
            tracing::Level::TRACE => tracing::trace!(target: "perf_timer", "{line}"),
        }
    }
}

/// Sink that keeps every line in memory, in emission order.
///
/// Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all captured lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain all captured lines
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    /// Number of captured lines
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing has been captured
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Discard all captured lines
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("lines", &self.len())
            .finish()
    }
}
