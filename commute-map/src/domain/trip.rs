//! Per-origin trip results and their per-destination grouping.

use serde::Serialize;

use super::journey::Journey;
use super::station::{Coordinates, Station, StationId};

/// Duration reported for a trip that could not be obtained.
pub const NO_RESULT_DURATION: f64 = -1.0;

/// Outcome of one (origin, destination) query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripResult {
    /// The origin station.
    pub station: Station,

    /// Travel time in minutes, or [`NO_RESULT_DURATION`].
    pub duration: f64,

    /// Number of changes, `0` when no result was obtained.
    pub changes: u32,

    /// Line names in travel order, empty when no result was obtained.
    pub transportation: Vec<String>,
}

impl TripResult {
    /// Result for a successful query.
    pub fn from_journey(station: Station, journey: &Journey) -> Self {
        Self {
            station,
            duration: journey.duration_minutes(),
            changes: journey.changes(),
            transportation: journey.line_names(),
        }
    }

    /// Sentinel result for a query that failed for any reason.
    pub fn unavailable(station: Station) -> Self {
        Self {
            station,
            duration: NO_RESULT_DURATION,
            changes: 0,
            transportation: Vec::new(),
        }
    }

    /// Whether this result carries a real journey.
    pub fn is_available(&self) -> bool {
        self.duration >= 0.0
    }
}

/// Metadata of a destination station as written to the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub id: StationId,
    pub name: String,
    pub coordinates: Coordinates,
}

impl Destination {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            coordinates: station.coordinates,
        }
    }

    /// Stand-in for a destination missing from the station directory.
    pub fn placeholder(id: StationId) -> Self {
        Self {
            id,
            name: String::new(),
            coordinates: Coordinates::new(0.0, 0.0),
        }
    }
}

/// All trip results towards one destination, aligned with the origin list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationBatch {
    pub destination: Destination,
    pub stations: Vec<TripResult>,
}

/// Batches for every configured destination, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<DestinationBatch>);

impl ResultSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, batch: DestinationBatch) {
        self.0.push(batch);
    }

    pub fn batches(&self) -> &[DestinationBatch] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
