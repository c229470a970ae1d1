//! Map entities tracked by the chart.
//!
//! An [`Entity`] is a single drawable item: the own-boat marker, an AIS
//! vessel, a track point or a track/route segment. Only vessels carry an
//! identity key; everything else is replaced wholesale when its feature set
//! is rebuilt.
//!
//! Coordinates are always stored in map order, `[longitude, latitude]`.
//! Live feeds report `[latitude, longitude]`, so the reconcilers swap them
//! on the way in.

mod factory;

pub use factory::{boat_marker, route_segment, track_line, track_point, vessel};

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A `[longitude, latitude]` pair in degrees.
pub type Coordinate = [f64; 2];

/// Attribute key holding a vessel's or marker's heading in degrees.
pub const HEADING_ATTRIBUTE: &str = "heading";

/// What an entity represents on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Own-boat position marker.
    Marker,
    /// A live AIS vessel.
    Vessel,
    /// A single historical track position.
    TrackPoint,
    /// A line between two consecutive track positions.
    TrackSegment,
    /// A line between two consecutive route waypoints.
    RouteSegment,
}

/// Entity geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Geometry {
    Point { coordinates: Coordinate },
    Circle { center: Coordinate, radius: f64 },
    LineString { coordinates: Vec<Coordinate> },
}

impl Geometry {
    /// A point geometry.
    pub fn point(coordinates: Coordinate) -> Self {
        Geometry::Point { coordinates }
    }

    /// A straight segment between two coordinates.
    pub fn segment(start: Coordinate, end: Coordinate) -> Self {
        Geometry::LineString {
            coordinates: vec![start, end],
        }
    }
}

/// A drawable map entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    kind: EntityKind,
    identity_key: Option<String>,
    geometry: Geometry,
    attributes: BTreeMap<String, Value>,
}

impl Entity {
    /// Create an identity-less entity.
    pub fn new(kind: EntityKind, geometry: Geometry) -> Self {
        Self {
            kind,
            identity_key: None,
            geometry,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the stable identity key.
    pub fn with_identity(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn identity_key(&self) -> Option<&str> {
        self.identity_key.as_deref()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Replace the geometry in place, keeping identity and attributes.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Heading attribute as a number, if one is set.
    pub fn heading(&self) -> Option<f64> {
        self.attribute(HEADING_ATTRIBUTE).and_then(Value::as_f64)
    }

    /// Point coordinates, if this entity is a point.
    pub fn position(&self) -> Option<Coordinate> {
        match self.geometry {
            Geometry::Point { coordinates } => Some(coordinates),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_attributes() {
        let e = Entity::new(EntityKind::Vessel, Geometry::point([-71.0, 42.0]))
            .with_identity("367000001")
            .with_attribute(HEADING_ATTRIBUTE, 90.0);

        assert_eq!(e.identity_key(), Some("367000001"));
        assert_eq!(e.heading(), Some(90.0));
        assert_eq!(e.position(), Some([-71.0, 42.0]));
    }

    #[test]
    fn test_set_geometry_keeps_attributes() {
        let mut e = Entity::new(EntityKind::Vessel, Geometry::point([0.0, 0.0]))
            .with_attribute(HEADING_ATTRIBUTE, 45.0);
        e.set_geometry(Geometry::point([1.0, 2.0]));

        assert_eq!(e.position(), Some([1.0, 2.0]));
        assert_eq!(e.heading(), Some(45.0));
    }

    #[test]
    fn test_null_heading_is_none() {
        let e = Entity::new(EntityKind::Vessel, Geometry::point([0.0, 0.0]))
            .with_attribute(HEADING_ATTRIBUTE, Value::Null);
        assert_eq!(e.heading(), None);
    }

    #[test]
    fn test_segment_geometry_serializes_tagged() {
        let g = Geometry::segment([1.0, 2.0], [3.0, 4.0]);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["type"], "lineString");
        assert_eq!(json["coordinates"][1][0], 3.0);
    }
}
