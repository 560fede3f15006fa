//! Directions service error types.

use std::fmt;
use std::path::PathBuf;

use super::convert::ConversionError;

/// Errors from querying a directions service.
///
/// Callers in the survey treat every variant the same way; the
/// distinction exists for logging.
#[derive(Debug)]
pub enum DirectionsError {
    /// The trip request never got a response (connect failure, timeout)
    Http(reqwest::Error),

    /// The EFA answer or fixture table is not a usable trip document
    Json {
        message: String,
        body: Option<String>,
    },

    /// EFA answered with a non-success status
    ApiError { status: u16, message: String },

    /// EFA answered 429
    RateLimited,

    /// The service answered but found no journey
    NoRoute(String),

    /// A fixture table could not be read from disk
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionsError::Http(e) => write!(f, "trip request failed: {e}"),
            DirectionsError::Json { message, body } => {
                write!(f, "malformed trip response: {message}")?;
                match body {
                    Some(body) => write!(f, " (body: {body})"),
                    None => Ok(()),
                }
            }
            DirectionsError::ApiError { status, message } => {
                write!(f, "EFA returned status {status}: {message}")
            }
            DirectionsError::RateLimited => write!(f, "rate limited by directions API"),
            DirectionsError::NoRoute(msg) => write!(f, "no route found: {msg}"),
            DirectionsError::Fixture { path, source } => {
                write!(f, "failed to read fixture {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectionsError::Http(e) => Some(e),
            DirectionsError::Fixture { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}

/// An empty answer is a missing route; anything else is a malformed one.
impl From<ConversionError> for DirectionsError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::NoJourneys { .. } | ConversionError::NoLegs => {
                DirectionsError::NoRoute(err.to_string())
            }
            ConversionError::NegativeDuration { .. } | ConversionError::DurationOutOfRange { .. } => {
                DirectionsError::Json {
                    message: err.to_string(),
                    body: None,
                }
            }
        }
    }
}
