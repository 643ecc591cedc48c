//! Logging configuration

use serde::{Deserialize, Serialize};

/// Configuration for the `tracing` subscriber installed by [`init_with`](crate::init_with)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter directive (e.g., "info", "debug,perf_timer=trace")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable, multi-line
    Pretty,
    /// Compact single-line output
    Compact,
    /// Structured JSON output
    Json,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show target module
    pub target: bool,
    /// Use ANSI colors
    pub colors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            target: true,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from any key/value source.
    ///
    /// Reads `PERF_TIMER_LOG` (falling back to `RUST_LOG`), `PERF_TIMER_LOG_FORMAT`,
    /// `PERF_TIMER_LOG_TIME` and `PERF_TIMER_LOG_COLORS`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("PERF_TIMER_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("PERF_TIMER_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "pretty" => Format::Pretty,
                "json" => Format::Json,
                _ => Format::Compact,
            };
        }

        if let Some(v) = lookup("PERF_TIMER_LOG_TIME") {
            config.display.time = flag(&v);
        }
        if let Some(v) = lookup("PERF_TIMER_LOG_COLORS") {
            config.display.colors = flag(&v);
        }

        config
    }

    /// Development configuration (pretty, debug level)
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                ..DisplayConfig::default()
            },
        }
    }

    /// Production configuration (JSON, info level)
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
        }
    }
}

fn flag(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, Format::Compact);
        assert!(config.display.time);
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("PERF_TIMER_LOG", "perf_timer=trace"),
            ("RUST_LOG", "warn"),
            ("PERF_TIMER_LOG_FORMAT", "JSON"),
            ("PERF_TIMER_LOG_TIME", "false"),
            ("PERF_TIMER_LOG_COLORS", "0"),
        ]));

        assert_eq!(config.level, "perf_timer=trace");
        assert_eq!(config.format, Format::Json);
        assert!(!config.display.time);
        assert!(!config.display.colors);
    }

    #[test]
    fn falls_back_to_rust_log() {
        let config = Config::from_lookup(lookup_from(&[("RUST_LOG", "debug")]));
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn unknown_format_is_compact() {
        let config = Config::from_lookup(lookup_from(&[("PERF_TIMER_LOG_FORMAT", "xml")]));
        assert_eq!(config.format, Format::Compact);
    }

    #[test]
    fn presets() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::development().level, "debug");
        assert_eq!(Config::production().format, Format::Json);
        assert!(!Config::production().display.colors);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"level":"trace","format":"pretty","display":{"time":false}}"#)
                .expect("valid config");

        assert_eq!(config.level, "trace");
        assert_eq!(config.format, Format::Pretty);
        assert!(!config.display.time);
        assert!(config.display.target);
    }
}
