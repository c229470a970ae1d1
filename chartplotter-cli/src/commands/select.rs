//! Movement sensor selection over an offline device description.

use std::path::Path;

use serde::Serialize;

use chartplotter::config::ConfigFile;
use chartplotter::resource::SensorNames;
use chartplotter::sensor::{SensorSelectionResult, SensorSelector};

use super::common::{build_session, print_json, read_json, DeviceDescription};
use crate::error::CliError;

#[derive(Serialize)]
struct SelectReport {
    selection: SensorSelectionResult,
    /// Sensor history queries would go to first.
    preferred_sensor: String,
    sensors: SensorNames,
}

/// Run sensor selection and discovery for the device at `device`.
pub async fn run(device: &Path, config: &ConfigFile) -> Result<(), CliError> {
    let description: DeviceDescription = read_json(device)?;
    let selector = SensorSelector::new(description.capabilities)
        .with_timeout(Some(config.device.capability_timeout()));

    let mut session = build_session(config)?;
    let selection = session
        .configure_sensors(&selector, &description.resources)
        .await;

    if !selection.has_sensor() {
        tracing::warn!(
            device = %device.display(),
            "No movement sensor with any capability found"
        );
    }

    print_json(&SelectReport {
        preferred_sensor: session.preferred_sensor().to_string(),
        sensors: session.sensor_names().clone(),
        selection,
    });

    Ok(())
}
