//! Station identity and location types.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer};

/// Column names of the VVS station export.
pub mod column {
    pub const NAME: &str = "#Name";
    pub const ID: &str = "Globale ID";
    pub const LONGITUDE: &str = "X-Koordinate";
    pub const LATITUDE: &str = "Y-Koordinate";
    pub const FARE_ZONES: &str = "Tarifzonen";
}

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A globally unique station identifier, e.g. `de:08111:6118`.
///
/// Identifiers are opaque: the only guarantee is that they are
/// non-empty and carry no surrounding whitespace.
///
/// # Examples
///
/// ```
/// use commute_map::domain::StationId;
///
/// let id = StationId::parse(" de:08111:6118 ").unwrap();
/// assert_eq!(id.as_str(), "de:08111:6118");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StationId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a coordinate value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {value:?}")]
pub struct InvalidCoordinate {
    value: String,
}

/// Parse a decimal number that may use a comma as decimal separator.
///
/// The station export writes `48,7835`; both that and `48.7835` are accepted.
pub fn parse_decimal(s: &str) -> Result<f64, InvalidCoordinate> {
    let normalized = s.trim().replace(',', ".");

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InvalidCoordinate {
            value: s.to_string(),
        }),
    }
}

/// WGS84 position of a station.
///
/// Serializes as a `[lat, lon]` pair, which is what map libraries expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse from the raw latitude (`Y-Koordinate`) and longitude
    /// (`X-Koordinate`) strings of the station export.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, InvalidCoordinate> {
        Ok(Self {
            lat: parse_decimal(lat)?,
            lon: parse_decimal(lon)?,
        })
    }
}

impl Serialize for Coordinates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.lat, self.lon).serialize(serializer)
    }
}

/// A station from the station directory.
///
/// Besides the typed fields, a station keeps the source record it was
/// read from (every column, in file order). Serialization emits that
/// record so downstream consumers see the same keys as the export.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinates: Coordinates,
    pub fare_zones: Vec<String>,
    record: Vec<(String, String)>,
}

impl Station {
    /// Create a station, synthesizing its source record from the typed fields.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        coordinates: Coordinates,
        fare_zones: Vec<String>,
    ) -> Self {
        let name = name.into();
        let record = vec![
            (column::NAME.to_string(), name.clone()),
            (column::ID.to_string(), id.to_string()),
            (column::LONGITUDE.to_string(), coordinates.lon.to_string()),
            (column::LATITUDE.to_string(), coordinates.lat.to_string()),
            (column::FARE_ZONES.to_string(), fare_zones.join(",")),
        ];

        Self {
            id,
            name,
            coordinates,
            fare_zones,
            record,
        }
    }

    /// Create a station keeping the `(column, value)` pairs it was read from.
    pub fn from_record(
        id: StationId,
        name: impl Into<String>,
        coordinates: Coordinates,
        fare_zones: Vec<String>,
        record: Vec<(String, String)>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates,
            fare_zones,
            record,
        }
    }

    /// The source record as `(column, value)` pairs.
    pub fn record(&self) -> &[(String, String)] {
        &self.record
    }

    /// Whether this station lies in at least one of the given fare zones.
    pub fn in_any_zone(&self, zones: &[String]) -> bool {
        self.fare_zones.iter().any(|z| zones.contains(z))
    }
}

/// Split a `Tarifzonen` cell such as `"1,2"` into zone labels.
pub fn parse_fare_zones(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(str::to_string)
        .collect()
}

impl Serialize for Station {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len()))?;
        for (key, value) in &self.record {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
