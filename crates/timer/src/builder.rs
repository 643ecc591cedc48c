//! Logger builder implementation

// External dependencies
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Internal crates
use crate::config::{Config, Format};
use crate::error::LogError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs a global `tracing` subscriber from a [`Config`]
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    config: Config,
}

impl LoggerBuilder {
    /// Create builder from config
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Config the subscriber will be built from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse the level directive
    pub fn filter(&self) -> Result<EnvFilter, LogError> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    /// Build and install the subscriber.
    ///
    /// Fails instead of panicking when a global subscriber already exists.
    pub fn build(self) -> Result<(), LogError> {
        let filter = self.filter()?;

        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(filter)
            .try_init()
            .map_err(|e| LogError::AlreadyInitialized(e.to_string()))
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let display = &self.config.display;
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(display.colors)
            .with_target(display.target);

        match (self.config.format, display.time) {
            (Format::Pretty, true) => layer.pretty().boxed(),
            (Format::Pretty, false) => layer.pretty().without_time().boxed(),
            (Format::Compact, true) => layer.compact().boxed(),
            (Format::Compact, false) => layer.compact().without_time().boxed(),
            (Format::Json, true) => layer.json().boxed(),
            (Format::Json, false) => layer.json().without_time().boxed(),
        }
    }
}
