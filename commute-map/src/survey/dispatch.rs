//! Bounded fan-out of trip queries for one destination.

use chrono::NaiveDateTime;
use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::directions::DirectionsService;
use crate::domain::{Station, StationId, TripResult};

use super::config::DispatchConfig;
use super::worker::query_trip;

/// Runs trip queries for many origins with bounded concurrency.
pub struct Dispatcher<'a, S> {
    service: &'a S,
    max_concurrency: usize,
}

impl<'a, S: DirectionsService> Dispatcher<'a, S> {
    pub fn new(service: &'a S, config: &DispatchConfig) -> Self {
        Self {
            service,
            max_concurrency: config.effective_concurrency(),
        }
    }

    /// Query every origin towards `destination` and wait for all of them.
    ///
    /// The returned vector has one entry per origin and `result[i]` belongs
    /// to `origins[i]`, whatever order the queries completed in. Failed
    /// queries appear as sentinel results, never as gaps.
    pub async fn dispatch(
        &self,
        origins: &[Station],
        destination: &StationId,
        when: NaiveDateTime,
    ) -> Vec<TripResult> {
        let mut slots: Vec<Option<TripResult>> = (0..origins.len()).map(|_| None).collect();

        let mut completed = stream::iter(origins.iter().enumerate())
            .map(|(index, origin)| async move {
                let result = query_trip(self.service, origin, destination, when).await;
                (index, result)
            })
            .buffer_unordered(self.max_concurrency);

        while let Some((index, result)) = completed.next().await {
            debug_assert!(slots[index].is_none(), "slot {index} written twice");
            slots[index] = Some(result);
        }

        debug!(
            destination = %destination,
            origins = origins.len(),
            "dispatch complete"
        );

        slots
            .into_iter()
            .zip(origins)
            .map(|(slot, origin)| slot.unwrap_or_else(|| TripResult::unavailable(origin.clone())))
            .collect()
    }
}
