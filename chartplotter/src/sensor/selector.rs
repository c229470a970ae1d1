//! Capability-scored movement sensor selection.

use std::time::Duration;

use serde::Serialize;

use crate::resource::{filter_resources, Resource, COMPONENT_TYPE, MOVEMENT_SENSOR_SUBTYPE};

use super::capabilities::{CapabilityError, CapabilityFlags, CapabilityQuery};

/// Default per-sensor capability query timeout.
pub const DEFAULT_CAPABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// A scored movement sensor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorCandidate {
    pub name: String,
    /// Number of supported capabilities; 0 when the query failed.
    pub score: u8,
    pub supports_position: bool,
}

/// Outcome of a selection pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorSelectionResult {
    /// Best sensor, or empty if none scored above zero.
    pub chosen_name: String,
    /// Capabilities of the chosen sensor (all false if none).
    pub chosen_props: CapabilityFlags,
    /// Every position-capable sensor, in evaluation order. The chosen
    /// sensor is included when it supports position.
    pub alternate_names: Vec<String>,
    /// Every movement sensor evaluated, in evaluation order.
    pub candidates: Vec<SensorCandidate>,
}

impl SensorSelectionResult {
    /// Whether any sensor was chosen.
    pub fn has_sensor(&self) -> bool {
        !self.chosen_name.is_empty()
    }
}

/// Picks the most capable movement sensor on a device.
///
/// Candidates are evaluated one at a time in resource order so the
/// tie-break is deterministic:
///
/// - higher score wins;
/// - at equal score the strictly shorter name wins;
/// - at equal score and length the first one seen stays.
///
/// A sensor whose capability query fails or times out scores zero, is never
/// chosen and is not offered as an alternate. It does not stop the others
/// from being evaluated.
#[derive(Debug)]
pub struct SensorSelector<Q> {
    query: Q,
    timeout: Option<Duration>,
}

impl<Q: CapabilityQuery> SensorSelector<Q> {
    /// Create a selector with the default per-sensor timeout.
    pub fn new(query: Q) -> Self {
        Self {
            query,
            timeout: Some(DEFAULT_CAPABILITY_TIMEOUT),
        }
    }

    /// Set the per-sensor timeout (`None` waits indefinitely).
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Evaluate every movement sensor in `resources` and pick the best.
    pub async fn select(&self, resources: &[Resource]) -> SensorSelectionResult {
        let movement_sensors =
            filter_resources(resources, COMPONENT_TYPE, MOVEMENT_SENSOR_SUBTYPE, None);

        let mut result = SensorSelectionResult::default();
        let mut best_score = 0u8;

        for resource in movement_sensors {
            let name = resource.name.as_str();

            let props = match self.query_flags(name).await {
                Ok(props) => props,
                Err(e) => {
                    tracing::warn!(
                        sensor = name,
                        error = %e,
                        "Capability query failed, skipping sensor"
                    );
                    result.candidates.push(SensorCandidate {
                        name: name.to_string(),
                        score: 0,
                        supports_position: false,
                    });
                    continue;
                }
            };

            let score = props.score();
            tracing::debug!(sensor = name, score, ?props, "Movement sensor scored");

            if props.position_supported {
                result.alternate_names.push(name.to_string());
            }
            result.candidates.push(SensorCandidate {
                name: name.to_string(),
                score,
                supports_position: props.position_supported,
            });

            if score > best_score
                || (score == best_score && name.len() < result.chosen_name.len())
            {
                result.chosen_name = name.to_string();
                result.chosen_props = props;
                best_score = score;
            }
        }

        tracing::info!(
            sensor = %result.chosen_name,
            score = best_score,
            alternates = ?result.alternate_names,
            "Movement sensor selected"
        );

        result
    }

    async fn query_flags(&self, name: &str) -> Result<CapabilityFlags, CapabilityError> {
        match self.timeout {
            Some(after) => tokio::time::timeout(after, self.query.properties(name))
                .await
                .map_err(|_| CapabilityError::Timeout {
                    sensor: name.to_string(),
                    after,
                })?,
            None => self.query.properties(name).await,
        }
    }
}
