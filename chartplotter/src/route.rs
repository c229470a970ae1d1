//! Active route rendering.
//!
//! The navigation system publishes the active route as an NMEA 2000
//! PGN 129285 (route/waypoint information) document. Every time a document
//! arrives the route feature set is thrown away and rebuilt from the
//! waypoint list, one straight segment per consecutive pair.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collection::OrderedStore;
use crate::feature::{self, Coordinate, Entity};

/// Errors decoding a route document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document is not valid JSON or has the wrong shape.
    #[error("Invalid route document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single route waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(rename = "WP Longitude", alias = "longitude")]
    pub longitude: f64,
    #[serde(rename = "WP Latitude", alias = "latitude")]
    pub latitude: f64,
}

impl Waypoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Map-order coordinate.
    pub fn coordinate(&self) -> Coordinate {
        [self.longitude, self.latitude]
    }
}

/// Decoded PGN 129285 document.
///
/// Only the waypoint list matters here; everything else the device sends
/// alongside it is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDocument {
    #[serde(default)]
    pub list: Option<Vec<Waypoint>>,
}

impl RouteDocument {
    /// Decode a document from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Replace every entity in `store` with segments joining `waypoints`.
///
/// The store is cleared unconditionally. With fewer than two waypoints it is
/// left empty; otherwise `n - 1` segments are appended in waypoint order.
pub fn rebuild_route<S>(store: &mut S, waypoints: Option<&[Waypoint]>)
where
    S: OrderedStore<Entity> + ?Sized,
{
    store.clear();

    let Some(waypoints) = waypoints else {
        return;
    };

    let mut prev: Option<Coordinate> = None;
    for wp in waypoints {
        let current = wp.coordinate();
        if let Some(start) = prev {
            store.append(feature::route_segment(start, current));
        }
        prev = Some(current);
    }

    tracing::debug!(
        waypoints = waypoints.len(),
        segments = store.len(),
        "Route rebuilt"
    );
}

/// Rebuild the route from a PGN 129285 document.
pub fn process_route_document<S>(doc: &RouteDocument, store: &mut S)
where
    S: OrderedStore<Entity> + ?Sized,
{
    rebuild_route(store, doc.list.as_deref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::feature::{EntityKind, Geometry};

    fn abc() -> Vec<Waypoint> {
        vec![
            Waypoint::new(-71.0, 42.0),
            Waypoint::new(-70.5, 42.2),
            Waypoint::new(-70.0, 42.5),
        ]
    }

    #[test]
    fn test_three_waypoints_make_two_segments_in_order() {
        let mut store = Collection::new();
        rebuild_route(&mut store, Some(&abc()));

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.item_at(0).unwrap().geometry(),
            &Geometry::segment([-71.0, 42.0], [-70.5, 42.2])
        );
        assert_eq!(
            store.item_at(1).unwrap().geometry(),
            &Geometry::segment([-70.5, 42.2], [-70.0, 42.5])
        );
        assert!(store.iter().all(|e| e.kind() == EntityKind::RouteSegment));
    }

    #[test]
    fn test_empty_waypoints_clear_route() {
        let mut store = Collection::new();
        rebuild_route(&mut store, Some(&abc()));
        rebuild_route(&mut store, Some(&[]));
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_waypoints_clear_route() {
        let mut store = Collection::new();
        rebuild_route(&mut store, Some(&abc()));
        rebuild_route(&mut store, None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_waypoint_has_no_segments() {
        let mut store = Collection::new();
        rebuild_route(&mut store, Some(&[Waypoint::new(1.0, 2.0)]));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rebuild_replaces_previous_segments() {
        let mut store = Collection::new();
        rebuild_route(&mut store, Some(&abc()));
        rebuild_route(&mut store, Some(&abc()[..2]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_document_with_device_field_names() {
        let doc = RouteDocument::from_json(
            r#"{"Database ID": 1, "list": [
                {"WP Longitude": -71.0, "WP Latitude": 42.0, "WP Name": "A"},
                {"WP Longitude": -70.0, "WP Latitude": 43.0, "WP Name": "B"}
            ]}"#,
        )
        .unwrap();

        let mut store = Collection::new();
        process_route_document(&doc, &mut store);

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_document_without_list_clears() {
        let doc = RouteDocument::from_json("{}").unwrap();
        let mut store = Collection::new();
        rebuild_route(&mut store, Some(&abc()));

        process_route_document(&doc, &mut store);

        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(RouteDocument::from_json("not json").is_err());
    }
}
