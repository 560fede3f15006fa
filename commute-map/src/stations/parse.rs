//! Reader for the semicolon-delimited station export.

use serde::Deserialize;

use crate::domain::{Coordinates, Station, StationId, column, parse_fare_zones};

use super::error::StationError;

/// Text encoding of the station file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// ISO-8859-1, as the VVS export ships.
    #[default]
    Latin1,
    Utf8,
}

impl Encoding {
    /// Decode raw file contents.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, StationError> {
        match self {
            // Every Latin-1 byte is the Unicode code point of the same value.
            Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
            Encoding::Utf8 => Ok(String::from_utf8(bytes)?),
        }
    }
}

/// Parse stations from decoded text.
///
/// The first row is the header. Stations are returned in file order,
/// each keeping its full source record.
pub fn parse_stations(text: &str) -> Result<Vec<Station>, StationError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let position = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(StationError::MissingColumn(name))
    };

    let name_idx = position(column::NAME)?;
    let id_idx = position(column::ID)?;
    let lon_idx = position(column::LONGITUDE)?;
    let lat_idx = position(column::LATITUDE)?;
    let zones_idx = position(column::FARE_ZONES)?;

    let mut stations = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let id = StationId::parse(field(id_idx)).map_err(|_| StationError::InvalidId { line })?;
        let coordinates = Coordinates::parse(field(lat_idx), field(lon_idx))
            .map_err(|source| StationError::InvalidCoordinate { line, source })?;

        let raw = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        stations.push(Station::from_record(
            id,
            field(name_idx),
            coordinates,
            parse_fare_zones(field(zones_idx)),
            raw,
        ));
    }

    Ok(stations)
}
