//! Show the configuration file location and effective settings.

use std::path::Path;

use chartplotter::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Print the config path and every effective setting.
///
/// With `init`, writes a default config file first if none exists.
pub fn run(path: Option<&Path>, config: &ConfigFile, init: bool) -> Result<(), CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file_path);

    if init {
        if path.exists() {
            println!("Config file already exists, leaving it untouched");
        } else {
            config.save_to(&path)?;
            println!("Wrote default config");
        }
    }

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("  (not found, using defaults)");
    }
    println!();

    println!("[device]");
    println!("  capability_timeout = {}", config.device.capability_timeout);
    println!("[history]");
    println!(
        "  endpoint           = {}",
        config.history.endpoint.as_deref().unwrap_or("(not set)")
    );
    println!("  timeout            = {}", config.history.timeout);
    println!("  lookback_hours     = {}", config.history.lookback_hours);
    println!(
        "  preferred_sensor   = {}",
        config.history.preferred_sensor.as_deref().unwrap_or("(selected)")
    );
    println!("[layers]");
    if config.layers.overrides.is_empty() {
        println!("  (catalog defaults)");
    }
    for (name, on) in &config.layers.overrides {
        println!("  {} = {}", name, if *on { "on" } else { "off" });
    }
    println!("[logging]");
    println!("  directory          = {}", config.logging.directory.display());
    println!("  file               = {}", config.logging.file);

    Ok(())
}
