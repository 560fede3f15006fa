//! In-memory station directory.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Station, StationId};

use super::error::StationError;
use super::parse::{Encoding, parse_stations};

/// All known stations, in file order, with lookup by identifier.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_id: HashMap<StationId, usize>,
}

impl StationDirectory {
    /// Build a directory from stations.
    ///
    /// If an identifier occurs more than once, lookup returns the first.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            by_id.entry(station.id.clone()).or_insert(idx);
        }

        Self { stations, by_id }
    }

    /// Load the station export at `path`.
    pub fn load(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self, StationError> {
        let bytes = std::fs::read(path)?;
        let text = encoding.decode(bytes)?;
        Ok(Self::new(parse_stations(&text)?))
    }

    /// Look up a station by identifier.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.by_id.get(id).map(|&idx| &self.stations[idx])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations lying in at least one of `zones`, in file order.
    pub fn origins_in_zones(&self, zones: &[String]) -> Vec<Station> {
        self.stations
            .iter()
            .filter(|s| s.in_any_zone(zones))
            .cloned()
            .collect()
    }
}
