//! INI serialization: `ConfigFile` → commented INI string.

use std::path::Path;

use super::settings::ConfigFile;
use crate::layers::LAYER_NAMES;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let endpoint = config.history.endpoint.as_deref().unwrap_or("");
    let preferred_sensor = config.history.preferred_sensor.as_deref().unwrap_or("");

    let mut layers = String::new();
    for (name, on) in &config.layers.overrides {
        layers.push_str(&format!("{} = {}\n", name, if *on { "on" } else { "off" }));
    }

    format!(
        r#"[device]
; Seconds to wait for each movement sensor's capability answer (default: 5)
; A sensor that does not answer in time is skipped
capability_timeout = {}

[history]
; Aggregation service URL for position history queries
; Example: endpoint = https://boat.example/api/history
endpoint = {}
; Seconds to wait for each history query attempt (default: 30)
timeout = {}
; How many hours of history to fetch (default: 24)
lookback_hours = {}
; Sensor to query first; left empty, the selected movement sensor is used
preferred_sensor = {}

[layers]
; Override a layer's default visibility: <layer name> = on|off
; Layers: {}
{}
[logging]
; Directory for log files (default: logs)
directory = {}
; Log file name, cleared on each start (default: chartplotter.log)
file = {}
"#,
        config.device.capability_timeout,
        endpoint,
        config.history.timeout,
        config.history.lookback_hours,
        preferred_sensor,
        LAYER_NAMES.join(", "),
        layers,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
