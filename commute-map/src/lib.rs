//! Commute map generator.
//!
//! Answers: "from which stations in my fare zones can I reach these
//! destinations quickly?" Every origin station is queried against a
//! transit directions service, and the results are written as JSON and
//! as a script a static map page can include.

pub mod app;
pub mod config;
pub mod directions;
pub mod domain;
pub mod error;
pub mod output;
pub mod stations;
pub mod survey;
