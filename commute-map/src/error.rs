//! Top-level application error.

use crate::config::ConfigError;
use crate::directions::DirectionsError;
use crate::output::OutputError;
use crate::stations::StationError;
use crate::survey::SurveyError;

/// Any failure that ends a run.
///
/// Per-query directions failures never reach this type during a survey;
/// `Directions` only covers setting up the service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stations(#[from] StationError),

    #[error("failed to set up directions service: {0}")]
    Directions(#[from] DirectionsError),

    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
