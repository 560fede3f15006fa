//! Transit directions services.
//!
//! A directions service answers one question: what is the best journey
//! from an origin stop to a destination stop, departing at a given time?
//! The survey only depends on the [`DirectionsService`] trait:
//! - [`EfaClient`] queries a live EFA installation (VVS by default)
//! - [`StaticDirections`] answers from a recorded fixture table

mod client;
mod convert;
mod error;
mod fixture;
mod types;

use chrono::NaiveDateTime;

use crate::domain::{Journey, StationId};

pub use client::{EfaClient, EfaConfig};
pub use convert::{ConversionError, convert_trip_response};
pub use error::DirectionsError;
pub use fixture::{FixtureTrip, StaticDirections};
pub use types::{JourneyDto, LegDto, ProductDto, SystemMessage, TransportationDto, TripResponse};

/// Source of journeys between two stations.
///
/// This abstraction allows the survey to be tested with stubbed services.
pub trait DirectionsService {
    /// Find the best journey from `origin` to `destination` departing at `when`.
    async fn query(
        &self,
        origin: &StationId,
        destination: &StationId,
        when: NaiveDateTime,
    ) -> Result<Journey, DirectionsError>;
}
