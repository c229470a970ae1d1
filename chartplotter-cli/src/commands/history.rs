//! Fetch position history with sensor failover.

use chrono::{Duration, Utc};

use chartplotter::config::ConfigFile;
use chartplotter::history::FailoverController;
use chartplotter::track::positions_from_history;

use super::common::HistoryBackend;
use crate::error::CliError;

/// Query `sensor`'s history for the last `hours` (config lookback when
/// `None`), failing over through `alternates` in order.
pub async fn run(
    sensor: &str,
    alternates: Vec<String>,
    hours: Option<u64>,
    config: &ConfigFile,
) -> Result<(), CliError> {
    let backend = HistoryBackend::from_config(config)?;
    let mut controller = FailoverController::new(backend)
        .with_preferred(sensor)
        .with_alternates(alternates)
        .with_timeout(Some(config.history.timeout()));

    let lookback = match hours {
        Some(h) => Duration::hours(h as i64),
        None => config.history.lookback(),
    };
    let start = Utc::now() - lookback;

    let points = controller.fetch(start).await?;
    let answered_by = controller.routing().preferred();

    if points.is_empty() {
        println!("No history since {}", start.to_rfc3339());
        return Ok(());
    }

    if answered_by != sensor {
        println!("Sensor '{}' had no history; using '{}'", sensor, answered_by);
    }

    let positions = positions_from_history(&points);
    println!(
        "{} sample(s), {} with a position, from '{}'",
        points.len(),
        positions.len(),
        answered_by
    );
    for position in &positions {
        let ts = position
            .ts
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!("  {}  {:.5}, {:.5}", ts, position.lat, position.lng);
    }

    Ok(())
}
