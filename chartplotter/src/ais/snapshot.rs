//! Live AIS snapshot types.
//!
//! A snapshot is produced by the device's AIS sensor on every polling tick:
//! a JSON object keyed by MMSI whose values carry a `Location` of
//! `[latitude, longitude]` and an optional `Heading`. Entries are decoded
//! leniently; a report whose location is missing, the wrong length or
//! non-numeric is kept in the snapshot but treated as absent by the
//! reconciler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position report for a single vessel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VesselReport {
    /// Raw `[latitude, longitude]` as reported by the feed.
    #[serde(rename = "Location", alias = "location", default)]
    pub location: Option<Value>,
    /// Course over ground in degrees, if reported.
    #[serde(rename = "Heading", alias = "heading", default)]
    pub heading: Option<Value>,
}

impl VesselReport {
    /// Well-formed report at `(lat, lon)`.
    pub fn new(lat: f64, lon: f64, heading: Option<f64>) -> Self {
        Self {
            location: Some(Value::from(vec![lat, lon])),
            heading: heading.map(Value::from),
        }
    }

    /// Report with an arbitrary raw location value.
    pub fn with_raw_location(location: Value) -> Self {
        Self {
            location: Some(location),
            heading: None,
        }
    }

    /// Validated `(latitude, longitude)`.
    ///
    /// Returns `None` unless the location is an array of exactly two
    /// numbers.
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        let coords = self.location.as_ref()?.as_array()?;
        if coords.len() != 2 {
            return None;
        }
        let lat = coords[0].as_f64()?;
        let lon = coords[1].as_f64()?;
        Some((lat, lon))
    }

    /// Heading in degrees, if present and numeric.
    pub fn heading_deg(&self) -> Option<f64> {
        self.heading.as_ref().and_then(Value::as_f64)
    }
}

/// Mapping from vessel identity (MMSI) to its latest report.
///
/// `None` values model explicit `null` entries in the feed. Iteration is in
/// key order, which fixes the append order of newly seen vessels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveSnapshot {
    vessels: BTreeMap<String, Option<VesselReport>>,
}

impl LiveSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a vessel report.
    pub fn insert(&mut self, mmsi: impl Into<String>, report: VesselReport) {
        self.vessels.insert(mmsi.into(), Some(report));
    }

    /// Insert an explicit null entry.
    pub fn insert_null(&mut self, mmsi: impl Into<String>) {
        self.vessels.insert(mmsi.into(), None);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_vessel(mut self, mmsi: impl Into<String>, report: VesselReport) -> Self {
        self.insert(mmsi, report);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&VesselReport>)> {
        self.vessels.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    /// Identities whose reports are well-formed.
    pub fn valid_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, report)| report.and_then(VesselReport::lat_lon).is_some())
            .map(|(key, _)| key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_feed_json() {
        let snapshot: LiveSnapshot = serde_json::from_value(json!({
            "367000001": { "Location": [42.35, -71.05], "Heading": 180.0 },
            "367000002": null,
            "367000003": { "Location": [42.0] },
        }))
        .unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.valid_keys(), vec!["367000001"]);
    }

    #[test]
    fn test_lat_lon_requires_two_numbers() {
        assert_eq!(
            VesselReport::new(1.0, 2.0, None).lat_lon(),
            Some((1.0, 2.0))
        );
        assert!(VesselReport::with_raw_location(json!([1.0])).lat_lon().is_none());
        assert!(VesselReport::with_raw_location(json!([1.0, 2.0, 3.0]))
            .lat_lon()
            .is_none());
        assert!(VesselReport::with_raw_location(json!([null, 2.0]))
            .lat_lon()
            .is_none());
        assert!(VesselReport::with_raw_location(json!("42,-71"))
            .lat_lon()
            .is_none());
        assert!(VesselReport::default().lat_lon().is_none());
    }

    #[test]
    fn test_heading_non_numeric_is_none() {
        let report = VesselReport {
            location: Some(json!([1.0, 2.0])),
            heading: Some(json!("n/a")),
        };
        assert_eq!(report.heading_deg(), None);
    }
}
