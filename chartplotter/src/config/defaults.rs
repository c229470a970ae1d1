//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::history::DEFAULT_HISTORY_TIMEOUT;
use crate::logging::{default_log_dir, default_log_file};
use crate::sensor::DEFAULT_CAPABILITY_TIMEOUT;

/// Default capability query timeout (seconds).
pub const DEFAULT_CAPABILITY_TIMEOUT_SECS: u64 = DEFAULT_CAPABILITY_TIMEOUT.as_secs();

/// Default history query timeout (seconds).
pub const DEFAULT_HISTORY_TIMEOUT_SECS: u64 = DEFAULT_HISTORY_TIMEOUT.as_secs();

/// Default history lookback window (hours).
pub const DEFAULT_LOOKBACK_HOURS: u64 = 24;

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            device: DeviceSettings {
                capability_timeout: DEFAULT_CAPABILITY_TIMEOUT_SECS,
            },
            history: HistorySettings {
                endpoint: None,
                timeout: DEFAULT_HISTORY_TIMEOUT_SECS,
                lookback_hours: DEFAULT_LOOKBACK_HOURS,
                preferred_sensor: None,
            },
            layers: LayerSettings::default(),
            logging: LoggingSettings {
                directory: PathBuf::from(default_log_dir()),
                file: default_log_file().to_string(),
            },
        }
    }
}
