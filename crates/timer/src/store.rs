//! Mark and measure storage.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, TimerError};

/// A named timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    /// Mark name, unique within the store
    pub name: String,
    /// Clock reading in milliseconds
    pub timestamp: f64,
}

/// A named duration between two marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    /// Measure name, unique within the store
    pub name: String,
    /// End mark minus start mark. Negative when the marks were taken out of order.
    pub duration_ms: f64,
}

/// Marks by name. Lookup only, order is irrelevant.
#[derive(Debug, Clone, Default)]
pub(crate) struct MarkStore {
    marks: HashMap<String, Mark>,
}

impl MarkStore {
    /// Record a mark, replacing any earlier one with the same name
    pub(crate) fn record(&mut self, name: &str, timestamp: f64) {
        self.marks.insert(
            name.to_owned(),
            Mark {
                name: name.to_owned(),
                timestamp,
            },
        );
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Mark> {
        self.marks.get(name)
    }

    /// Duration from `start` to `end`.
    ///
    /// The start mark is checked first, so when both are missing the error
    /// names the start mark.
    pub(crate) fn span(&self, start: &str, end: &str) -> Result<f64> {
        let start_mark = self
            .get(start)
            .ok_or_else(|| TimerError::missing_mark(start))?;
        let end_mark = self.get(end).ok_or_else(|| TimerError::missing_mark(end))?;
        Ok(end_mark.timestamp - start_mark.timestamp)
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn clear(&mut self) {
        self.marks.clear();
    }
}

/// Measures by name, in the order they were first recorded.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeasureStore {
    measures: IndexMap<String, Measure>,
}

impl MeasureStore {
    /// Record a measure.
    ///
    /// Re-recording an existing name replaces its duration but keeps its
    /// original position.
    pub(crate) fn record(&mut self, name: &str, duration_ms: f64) {
        if let Some(existing) = self.measures.get_mut(name) {
            existing.duration_ms = duration_ms;
            return;
        }
        self.measures.insert(
            name.to_owned(),
            Measure {
                name: name.to_owned(),
                duration_ms,
            },
        );
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Measure> {
        self.measures.get(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Measure> {
        self.measures.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.measures.len()
    }

    pub(crate) fn clear(&mut self) {
        self.measures.clear();
    }
}
