//! User configuration from `~/.chartplotter/config.ini`.
//!
//! Settings structs live in [`settings`], constants in `defaults`, parsing
//! in `parser` and serialization in `writer`.
//!
//! ```ini
//! [device]
//! capability_timeout = 5
//!
//! [history]
//! endpoint = https://boat.example/api/history
//! preferred_sensor = gps
//!
//! [layers]
//! open street map = on
//! ```

mod defaults;
mod file;
mod parser;
pub mod settings;
mod writer;

pub use defaults::{
    DEFAULT_CAPABILITY_TIMEOUT_SECS, DEFAULT_HISTORY_TIMEOUT_SECS, DEFAULT_LOOKBACK_HOURS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, DeviceSettings, HistorySettings, LayerSettings, LoggingSettings};
