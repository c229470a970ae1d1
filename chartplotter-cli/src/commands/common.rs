//! Common types and utilities shared across CLI commands.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use chartplotter::config::ConfigFile;
use chartplotter::history::{HistoryError, HistoryPoint, HistoryQuery, HttpHistoryClient};
use chartplotter::resource::Resource;
use chartplotter::session::ChartSession;
use chartplotter::sensor::StaticCapabilities;

use crate::error::CliError;

/// Offline device description: resource list plus capability flags.
#[derive(Debug, Deserialize)]
pub struct DeviceDescription {
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub capabilities: StaticCapabilities,
}

/// History backend chosen from config.
///
/// Without a configured endpoint every query fails with
/// [`HistoryError::NoEndpoint`].
pub enum HistoryBackend {
    Http(HttpHistoryClient),
    Unconfigured,
}

impl HistoryBackend {
    pub fn from_config(config: &ConfigFile) -> Result<Self, CliError> {
        match &config.history.endpoint {
            Some(endpoint) => Ok(HistoryBackend::Http(HttpHistoryClient::new(
                endpoint.as_str(),
                config.history.timeout(),
            )?)),
            None => Ok(HistoryBackend::Unconfigured),
        }
    }
}

impl HistoryQuery for HistoryBackend {
    async fn position_history(
        &self,
        sensor: &str,
        start: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>, HistoryError> {
        match self {
            HistoryBackend::Http(client) => client.position_history(sensor, start).await,
            HistoryBackend::Unconfigured => Err(HistoryError::NoEndpoint),
        }
    }
}

/// Load config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) => Ok(ConfigFile::load_from(path)?),
        None => Ok(ConfigFile::load()?),
    }
}

/// Build a chart session wired to the configured history backend.
pub fn build_session(config: &ConfigFile) -> Result<ChartSession<HistoryBackend>, CliError> {
    let backend = HistoryBackend::from_config(config)?;
    Ok(ChartSession::new(config, backend))
}

/// Read a JSON file into `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = std::fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: path.display().to_string(),
        error,
    })?;
    serde_json::from_str(&content).map_err(|error| CliError::Parse {
        path: path.display().to_string(),
        error,
    })
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format output: {}", e),
    }
}
