//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [device] section
    if let Some(section) = ini.section(Some("device")) {
        if let Some(v) = section.get("capability_timeout") {
            config.device.capability_timeout = parse_seconds("device", "capability_timeout", v)?;
        }
    }

    // [history] section
    if let Some(section) = ini.section(Some("history")) {
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.is_empty() {
                if !(v.starts_with("http://") || v.starts_with("https://")) {
                    return Err(ConfigFileError::InvalidValue {
                        section: "history".to_string(),
                        key: "endpoint".to_string(),
                        value: v.to_string(),
                        reason: "must be an http:// or https:// URL".to_string(),
                    });
                }
                config.history.endpoint = Some(v.to_string());
            }
        }
        if let Some(v) = section.get("timeout") {
            config.history.timeout = parse_seconds("history", "timeout", v)?;
        }
        if let Some(v) = section.get("lookback_hours") {
            config.history.lookback_hours =
                v.trim().parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "history".to_string(),
                    key: "lookback_hours".to_string(),
                    value: v.to_string(),
                    reason: "must be a non-negative integer (hours)".to_string(),
                })?;
        }
        if let Some(v) = section.get("preferred_sensor") {
            let v = v.trim();
            if !v.is_empty() {
                config.history.preferred_sensor = Some(v.to_string());
            }
        }
    }

    // [layers] section: every key is a layer name
    if let Some(section) = ini.section(Some("layers")) {
        for (name, v) in section.iter() {
            let on = parse_bool(v).ok_or_else(|| ConfigFileError::InvalidValue {
                section: "layers".to_string(),
                key: name.to_string(),
                value: v.to_string(),
                reason: "must be one of: on, off, true, false, yes, no, 1, 0".to_string(),
            })?;
            config.layers.overrides.insert(name.trim().to_string(), on);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn parse_seconds(section: &str, key: &str, value: &str) -> Result<u64, ConfigFileError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer (seconds)".to_string(),
        }),
    }
}

/// Parse a boolean value from a config string.
///
/// Accepts true/false, yes/no, 1/0, on/off (case-insensitive); anything else
/// is `None`.
pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
