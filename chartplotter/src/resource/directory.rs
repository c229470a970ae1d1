//! Predicate-based selection over the device's resource list.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Resource type for hardware components.
pub const COMPONENT_TYPE: &str = "component";
/// Subtype for movement sensors (GPS, compass, IMU).
pub const MOVEMENT_SENSOR_SUBTYPE: &str = "movement_sensor";
/// Subtype for generic sensors (AIS, NMEA 2000 gauges).
pub const SENSOR_SUBTYPE: &str = "sensor";

/// An addressable device capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub subtype: String,
}

impl Resource {
    pub fn new(
        name: impl Into<String>,
        resource_type: impl Into<String>,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            subtype: subtype.into(),
        }
    }

    /// A `component` resource with the given subtype.
    pub fn component(name: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self::new(name, COMPONENT_TYPE, subtype)
    }

    /// Whether this resource passes the directory filter.
    ///
    /// Empty `resource_type` or `subtype` match anything; the pattern is a
    /// search, not an anchored match.
    pub fn matches(&self, resource_type: &str, subtype: &str, pattern: Option<&Regex>) -> bool {
        if !resource_type.is_empty() && self.resource_type != resource_type {
            return false;
        }
        if !subtype.is_empty() && self.subtype != subtype {
            return false;
        }
        pattern.map_or(true, |p| p.is_match(&self.name))
    }
}

/// Resources matching the filter, in input order.
pub fn filter_resources<'a>(
    resources: &'a [Resource],
    resource_type: &str,
    subtype: &str,
    pattern: Option<&Regex>,
) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| r.matches(resource_type, subtype, pattern))
        .collect()
}

/// Name of the first matching resource, or an empty string.
pub fn first_matching_name(
    resources: &[Resource],
    resource_type: &str,
    subtype: &str,
    pattern: Option<&Regex>,
) -> String {
    resources
        .iter()
        .find(|r| r.matches(resource_type, subtype, pattern))
        .map(|r| r.name.clone())
        .unwrap_or_default()
}

/// Names of all matching resources, sorted.
pub fn all_matching_names(
    resources: &[Resource],
    resource_type: &str,
    subtype: &str,
    pattern: Option<&Regex>,
) -> Vec<String> {
    let mut names: Vec<String> = filter_resources(resources, resource_type, subtype, pattern)
        .into_iter()
        .map(|r| r.name.clone())
        .collect();
    names.sort();
    names
}
