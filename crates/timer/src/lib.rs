//! # Perf Timer - Marks, Measures and Session Timing
//!
//! Instrumentation for a single analysis run: record named timestamps
//! ("marks"), derive named durations between them ("measures"), and log
//! them as `Measure {name} took {duration}ms` lines.
//!
//! Two sessions are tracked: the primary run (`start`/`end`) and a nested
//! audit run (`audit_start`/`audit_end`). Both may be active at once.
//!
//! ## Quick Start
//!
//! ```rust
//! use perf_timer::prelude::*;
//!
//! fn main() -> Result<(), TimerError> {
//!     let mut timer = PerformanceTimer::default();
//!
//!     timer.start();
//!     timer.mark("parse_start");
//!     // ... work ...
//!     timer.mark("parse_end");
//!     timer.measure("parse", "parse_start", "parse_end")?;
//!     timer.log_measures(None);
//!     timer.end()?;
//!     Ok(())
//! }
//! ```
//!
//! The clock and the output sink are injected, so tests can drive time with
//! a [`ManualClock`] and capture lines with a [`MemorySink`].

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod clock;
mod config;
mod error;
pub mod format;
mod report;
mod session;
mod shared;
mod sink;
mod store;
mod timer;

// Public API
pub use builder::LoggerBuilder;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, Result, SessionKind, TimerError};
pub use report::Report;
pub use session::Phase;
pub use shared::SharedTimer;
pub use sink::{MemorySink, Sink, TracingSink};
pub use store::{Mark, Measure};
pub use timer::PerformanceTimer;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Clock, ManualClock, MemorySink, MonotonicClock, PerformanceTimer, Phase, SharedTimer,
        Sink, TimerError, TracingSink,
    };
}

/// Install a `tracing` subscriber configured from the environment
pub fn init() -> Result<(), LogError> {
    init_with(Config::from_env())
}

/// Install a `tracing` subscriber with custom configuration
pub fn init_with(config: Config) -> Result<(), LogError> {
    LoggerBuilder::from_config(config).build()
}
