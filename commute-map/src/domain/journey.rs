//! Journeys as reported by a directions service.

use chrono::Duration;

/// One continuous ride on a single transportation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Short line name, e.g. `S1` or `U6`.
    pub line_name: String,
}

impl Leg {
    pub fn new(line_name: impl Into<String>) -> Self {
        Self {
            line_name: line_name.into(),
        }
    }
}

/// A computed transit route between two stations.
///
/// Legs are kept in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub duration: Duration,
    pub legs: Vec<Leg>,
}

impl Journey {
    pub fn new(duration: Duration, legs: Vec<Leg>) -> Self {
        Self { duration, legs }
    }

    /// Total travel time in (fractional) minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration.num_milliseconds() as f64 / 60_000.0
    }

    /// Number of changes: one fewer than the number of legs.
    pub fn changes(&self) -> u32 {
        self.legs.len().saturating_sub(1) as u32
    }

    /// Line names in travel order.
    pub fn line_names(&self) -> Vec<String> {
        self.legs.iter().map(|leg| leg.line_name.clone()).collect()
    }
}
