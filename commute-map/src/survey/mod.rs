//! Concurrent trip survey.
//!
//! For every destination, every origin station is queried against a
//! directions service:
//! - the worker turns one query into a [`TripResult`](crate::domain::TripResult),
//!   absorbing failures as sentinel results
//! - the dispatcher fans the queries for one destination out with bounded
//!   concurrency and reassembles them in input order
//! - the orchestrator repeats that per destination, sequentially

mod config;
mod dispatch;
mod orchestrate;
mod worker;

#[cfg(test)]
mod dispatch_tests;

pub use config::{DEFAULT_MAX_CONCURRENCY, DispatchConfig, MissingDestinationPolicy};
pub use dispatch::Dispatcher;
pub use orchestrate::{Orchestrator, SurveyError};
pub use worker::{query_trip, trip_result};
