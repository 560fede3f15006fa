//! Survey over all configured destinations.

use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::directions::DirectionsService;
use crate::domain::{Destination, DestinationBatch, ResultSet, Station, StationId};
use crate::stations::StationDirectory;

use super::config::{DispatchConfig, MissingDestinationPolicy};
use super::dispatch::Dispatcher;

/// Error from running a survey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    /// A configured destination is not in the station directory
    #[error("destination {0} is not in the station directory")]
    UnknownDestination(StationId),
}

/// Runs one dispatch round per destination, in order.
pub struct Orchestrator<'a, S> {
    dispatcher: Dispatcher<'a, S>,
    missing_destination: MissingDestinationPolicy,
}

impl<'a, S: DirectionsService> Orchestrator<'a, S> {
    pub fn new(service: &'a S, config: &DispatchConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(service, config),
            missing_destination: MissingDestinationPolicy::default(),
        }
    }

    /// Set how destinations missing from the directory are handled.
    pub fn with_missing_destination(mut self, policy: MissingDestinationPolicy) -> Self {
        self.missing_destination = policy;
        self
    }

    /// Query every origin towards every destination.
    ///
    /// Destinations are processed one after another; only the origins of a
    /// single destination are queried concurrently. All destinations are
    /// resolved before the first query, so a failing lookup costs nothing.
    pub async fn run(
        &self,
        directory: &StationDirectory,
        origins: &[Station],
        destinations: &[StationId],
        when: NaiveDateTime,
    ) -> Result<ResultSet, SurveyError> {
        let resolved = self.resolve(directory, destinations)?;

        let started = Instant::now();
        let mut results = ResultSet::new();

        for destination in resolved {
            info!(
                destination = %destination.name,
                id = %destination.id,
                origins = origins.len(),
                "querying trips"
            );

            let stations = self
                .dispatcher
                .dispatch(origins, &destination.id, when)
                .await;

            results.push(DestinationBatch {
                destination,
                stations,
            });
        }

        info!(
            destinations = results.len(),
            elapsed_secs = started.elapsed().as_secs_f64(),
            "fetched trip data"
        );

        Ok(results)
    }

    fn resolve(
        &self,
        directory: &StationDirectory,
        destinations: &[StationId],
    ) -> Result<Vec<Destination>, SurveyError> {
        let mut resolved = Vec::with_capacity(destinations.len());

        for id in destinations {
            match (directory.get(id), self.missing_destination) {
                (Some(station), _) => resolved.push(Destination::from_station(station)),
                (None, MissingDestinationPolicy::Fail) => {
                    return Err(SurveyError::UnknownDestination(id.clone()));
                }
                (None, MissingDestinationPolicy::Skip) => {
                    warn!(id = %id, "destination not in station directory, skipping");
                }
                (None, MissingDestinationPolicy::Placeholder) => {
                    warn!(id = %id, "destination not in station directory, using placeholder");
                    resolved.push(Destination::placeholder(id.clone()));
                }
            }
        }

        Ok(resolved)
    }
}
