//! End-to-end run: stations in, result files out.

use tracing::info;

use crate::config::{AppConfig, ConfigError, DirectionsMode};
use crate::directions::{DirectionsService, EfaClient, StaticDirections};
use crate::domain::{ResultSet, Station};
use crate::error::AppError;
use crate::output::{write_js, write_json};
use crate::stations::StationDirectory;
use crate::survey::{Orchestrator, SurveyError};

/// Load stations, survey every destination and write both output files.
pub async fn run(config: &AppConfig) -> Result<ResultSet, AppError> {
    let directory =
        StationDirectory::load(&config.station_data_path, config.station_data_encoding)?;
    info!(count = directory.len(), "loaded stations");

    let origins = directory.origins_in_zones(&config.fare_zones);
    info!(
        count = origins.len(),
        zones = ?config.fare_zones,
        "limited search to fare zones"
    );

    let results = match config.directions.mode {
        DirectionsMode::Efa => {
            let client = EfaClient::new(config.efa_config())?;
            survey(&client, config, &directory, &origins).await?
        }
        DirectionsMode::Fixture => {
            let path = config.directions.fixture_path.as_ref().ok_or_else(|| {
                ConfigError::Invalid(
                    "directions.fixture_path is required in fixture mode".to_string(),
                )
            })?;
            let fixture = StaticDirections::load(path)?;
            info!(trips = fixture.len(), path = %path.display(), "loaded fixture trips");
            survey(&fixture, config, &directory, &origins).await?
        }
    };

    write_json(&results, &config.json_data_path)?;
    write_js(&results, &config.js_data_path)?;
    info!(
        json = %config.json_data_path.display(),
        js = %config.js_data_path.display(),
        "wrote results"
    );

    Ok(results)
}

async fn survey<S: DirectionsService>(
    service: &S,
    config: &AppConfig,
    directory: &StationDirectory,
    origins: &[Station],
) -> Result<ResultSet, SurveyError> {
    Orchestrator::new(service, &config.dispatch)
        .with_missing_destination(config.missing_destination)
        .run(
            directory,
            origins,
            &config.destination_stations,
            config.trip_date,
        )
        .await
}
