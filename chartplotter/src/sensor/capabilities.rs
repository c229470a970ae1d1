//! Movement sensor capability flags and the query seam.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a movement sensor reports it can measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityFlags {
    #[serde(default)]
    pub position_supported: bool,
    #[serde(default)]
    pub linear_velocity_supported: bool,
    #[serde(default)]
    pub compass_heading_supported: bool,
}

impl CapabilityFlags {
    pub fn new(position: bool, linear_velocity: bool, compass_heading: bool) -> Self {
        Self {
            position_supported: position,
            linear_velocity_supported: linear_velocity,
            compass_heading_supported: compass_heading,
        }
    }

    /// Number of supported capabilities (0–3).
    pub fn score(&self) -> u8 {
        [
            self.position_supported,
            self.linear_velocity_supported,
            self.compass_heading_supported,
        ]
        .into_iter()
        .filter(|&f| f)
        .count() as u8
    }
}

/// Errors querying a sensor's capabilities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapabilityError {
    /// The device has no sensor with this name.
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    /// The query did not complete in time.
    #[error("Capability query for {sensor} timed out after {after:?}")]
    Timeout { sensor: String, after: Duration },

    /// Transport failure talking to the device.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The device answered with something unreadable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Source of capability flags for named sensors.
///
/// Implementations talk to the device (or stand in for it). A query may
/// suspend and may fail; callers treat each failure as affecting only the
/// sensor queried.
pub trait CapabilityQuery: Send + Sync {
    /// Fetch the capability flags for `sensor`.
    fn properties(
        &self,
        sensor: &str,
    ) -> impl Future<Output = Result<CapabilityFlags, CapabilityError>> + Send;
}

/// Fixed capability table.
///
/// Used for offline device descriptions and as a test double.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCapabilities {
    flags: HashMap<String, CapabilityFlags>,
}

impl StaticCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sensor(mut self, name: impl Into<String>, flags: CapabilityFlags) -> Self {
        self.flags.insert(name.into(), flags);
        self
    }
}

impl CapabilityQuery for StaticCapabilities {
    async fn properties(&self, sensor: &str) -> Result<CapabilityFlags, CapabilityError> {
        self.flags
            .get(sensor)
            .copied()
            .ok_or_else(|| CapabilityError::UnknownSensor(sensor.to_string()))
    }
}
