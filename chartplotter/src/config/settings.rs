//! Settings structs for each configuration section.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Device (movement sensor) settings
    pub device: DeviceSettings,
    /// Position history service settings
    pub history: HistorySettings,
    /// Layer visibility overrides
    pub layers: LayerSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Device configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSettings {
    /// Per-sensor capability query timeout in seconds
    pub capability_timeout: u64,
}

impl DeviceSettings {
    pub fn capability_timeout(&self) -> Duration {
        Duration::from_secs(self.capability_timeout)
    }
}

/// Position history configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySettings {
    /// Aggregation service URL; history queries are unavailable without it
    pub endpoint: Option<String>,
    /// Per-attempt query timeout in seconds
    pub timeout: u64,
    /// How far back a history query reaches, in hours
    pub lookback_hours: u64,
    /// Sensor to query first; seeds the routing state
    pub preferred_sensor: Option<String>,
}

impl HistorySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::hours(self.lookback_hours as i64)
    }
}

/// Per-layer desired visibility overrides, keyed by layer name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerSettings {
    pub overrides: BTreeMap<String, bool>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
