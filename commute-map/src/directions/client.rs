//! EFA trip request HTTP client.
//!
//! Queries the `XML_TRIP_REQUEST2` endpoint of an EFA installation (VVS by
//! default) and converts the best journey into a domain [`Journey`].

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Semaphore;

use crate::domain::{Journey, StationId};

use super::DirectionsService;
use super::convert::convert_trip_response;
use super::error::DirectionsError;
use super::types::TripResponse;

/// VVS mobile EFA installation.
const DEFAULT_BASE_URL: &str = "https://www3.vvs.de/mngvvs";

/// Trip requests in flight at once, matching the survey's default fan-out.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Where and how hard to query EFA.
#[derive(Debug, Clone)]
pub struct EfaConfig {
    /// EFA root; `XML_TRIP_REQUEST2` is appended to it
    pub base_url: String,
    /// Cap on simultaneous trip requests from one client
    pub max_concurrent: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl EfaConfig {
    /// VVS defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Point at another EFA installation or a local mock.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for EfaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for EFA trip requests.
///
/// A semaphore caps requests per client, whatever the caller's fan-out.
#[derive(Debug, Clone)]
pub struct EfaClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl EfaClient {
    pub fn new(config: EfaConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Request the best journey departing at `when`.
    pub async fn get_trip(
        &self,
        origin: &StationId,
        destination: &StationId,
        when: NaiveDateTime,
    ) -> Result<Journey, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/XML_TRIP_REQUEST2", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&trip_query(origin, destination, when))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let trip: TripResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_trip_response(&trip)?)
    }
}

impl DirectionsService for EfaClient {
    async fn query(
        &self,
        origin: &StationId,
        destination: &StationId,
        when: NaiveDateTime,
    ) -> Result<Journey, DirectionsError> {
        self.get_trip(origin, destination, when).await
    }
}

/// Query parameters for a departure-time trip request between two stops.
fn trip_query(
    origin: &StationId,
    destination: &StationId,
    when: NaiveDateTime,
) -> Vec<(&'static str, String)> {
    vec![
        ("outputFormat", "rapidJSON".to_string()),
        ("coordOutputFormat", "EPSG:4326".to_string()),
        ("language", "de".to_string()),
        ("type_origin", "any".to_string()),
        ("name_origin", origin.as_str().to_string()),
        ("type_destination", "any".to_string()),
        ("name_destination", destination.as_str().to_string()),
        ("itdDate", when.format("%Y%m%d").to_string()),
        ("itdTime", when.format("%H%M").to_string()),
        ("itdTripDateTimeDepArr", "dep".to_string()),
        ("routeType", "leasttime".to_string()),
        ("calcOneDirection", "1".to_string()),
        ("useRealtime", "1".to_string()),
    ]
}
