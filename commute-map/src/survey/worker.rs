//! Single trip query.

use chrono::NaiveDateTime;
use tracing::info;

use crate::directions::{DirectionsError, DirectionsService};
use crate::domain::{Journey, Station, StationId, TripResult};

/// Query the best trip from `origin` to `destination`.
///
/// Never fails: any service error becomes the sentinel result.
pub async fn query_trip<S: DirectionsService>(
    service: &S,
    origin: &Station,
    destination: &StationId,
    when: NaiveDateTime,
) -> TripResult {
    let outcome = service.query(&origin.id, destination, when).await;
    trip_result(origin, outcome)
}

/// Fold a service outcome into a trip result, logging it.
pub fn trip_result(origin: &Station, outcome: Result<Journey, DirectionsError>) -> TripResult {
    match outcome {
        Ok(journey) => {
            let result = TripResult::from_journey(origin.clone(), &journey);
            info!(
                station = %origin.name,
                duration_mins = result.duration,
                changes = result.changes,
                lines = ?result.transportation,
                "trip found"
            );
            result
        }
        Err(e) => {
            info!(station = %origin.name, error = %e, "no trip");
            TripResult::unavailable(origin.clone())
        }
    }
}
