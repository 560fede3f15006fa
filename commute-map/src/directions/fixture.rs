//! Fixture directions service for offline runs and tests.
//!
//! Serves pre-recorded journeys from a JSON file instead of a live API.
//! The file maps `"<origin>-><destination>"` keys to journeys:
//!
//! ```json
//! {
//!     "de:08111:6056->de:08111:6118": { "duration_secs": 1800, "lines": ["S1", "U6"] }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use crate::domain::{Journey, Leg, StationId};

use super::DirectionsService;
use super::error::DirectionsError;

/// Separator between origin and destination in fixture keys.
const KEY_SEPARATOR: &str = "->";

/// A recorded journey in the fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTrip {
    pub duration_secs: i64,
    pub lines: Vec<String>,
}

impl FixtureTrip {
    /// Validate the recorded duration, naming `key` on failure.
    fn to_journey(&self, key: &str) -> Result<Journey, DirectionsError> {
        let invalid = |reason: &str| DirectionsError::Json {
            message: format!("fixture {key:?}: {reason}"),
            body: None,
        };

        if self.duration_secs < 0 {
            return Err(invalid("duration_secs must not be negative"));
        }
        let duration = Duration::try_seconds(self.duration_secs)
            .ok_or_else(|| invalid("duration_secs out of range"))?;

        Ok(Journey::new(
            duration,
            self.lines.iter().map(Leg::new).collect(),
        ))
    }
}

/// Directions service answering from a fixed table.
///
/// The query time is ignored. Pairs without an entry fail with
/// [`DirectionsError::NoRoute`].
#[derive(Debug, Clone, Default)]
pub struct StaticDirections {
    trips: HashMap<(StationId, StationId), Journey>,
}

impl StaticDirections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DirectionsError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&json)
    }

    /// Parse a fixture table from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DirectionsError> {
        let raw: HashMap<String, FixtureTrip> =
            serde_json::from_str(json).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: None,
            })?;

        let mut directions = Self::new();
        for (key, trip) in raw {
            let (origin, destination) = parse_key(&key)?;
            let journey = trip.to_journey(&key)?;
            directions.insert(origin, destination, journey);
        }

        Ok(directions)
    }

    /// Record the journey returned for a pair.
    pub fn insert(&mut self, origin: StationId, destination: StationId, journey: Journey) {
        self.trips.insert((origin, destination), journey);
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

fn parse_key(key: &str) -> Result<(StationId, StationId), DirectionsError> {
    let invalid = |reason: String| DirectionsError::Json {
        message: format!("invalid fixture key {key:?}: {reason}"),
        body: None,
    };

    let (origin, destination) = key
        .split_once(KEY_SEPARATOR)
        .ok_or_else(|| invalid(format!("expected \"<origin>{KEY_SEPARATOR}<destination>\"")))?;

    Ok((
        StationId::parse(origin).map_err(|e| invalid(e.to_string()))?,
        StationId::parse(destination).map_err(|e| invalid(e.to_string()))?,
    ))
}

impl DirectionsService for StaticDirections {
    async fn query(
        &self,
        origin: &StationId,
        destination: &StationId,
        _when: NaiveDateTime,
    ) -> Result<Journey, DirectionsError> {
        self.trips
            .get(&(origin.clone(), destination.clone()))
            .cloned()
            .ok_or_else(|| {
                DirectionsError::NoRoute(format!("no fixture for {origin} -> {destination}"))
            })
    }
}
