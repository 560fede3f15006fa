//! Domain types for the commute map.
//!
//! Stations come from the station directory, journeys from a directions
//! service, and trip results tie the two together per destination.

mod journey;
mod station;
mod trip;

pub use journey::{Journey, Leg};
pub use station::{
    Coordinates, InvalidCoordinate, InvalidStationId, Station, StationId, column, parse_decimal,
    parse_fare_zones,
};
pub use trip::{Destination, DestinationBatch, NO_RESULT_DURATION, ResultSet, TripResult};
