use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use commute_map::app;
use commute_map::config::{AppConfig, config_path};
use commute_map::error::AppError;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "commute_map=info";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let path = config_path();
    let config = AppConfig::load(&path)?;
    println!(
        "Surveying {} destination(s) departing {}",
        config.destination_stations.len(),
        config.trip_date
    );

    let results = app::run(&config).await?;

    let reachable: usize = results
        .batches()
        .iter()
        .map(|b| b.stations.iter().filter(|r| r.is_available()).count())
        .sum();
    println!(
        "Wrote {} batch(es), {} reachable origin(s)",
        results.len(),
        reachable
    );

    Ok(())
}
