//! Constructors for each kind of chart entity.

use serde_json::Value;

use super::{Coordinate, Entity, EntityKind, Geometry, HEADING_ATTRIBUTE};

/// Own-boat marker at `coordinates`, heading 0.
pub fn boat_marker(coordinates: Coordinate) -> Entity {
    Entity::new(EntityKind::Marker, Geometry::point(coordinates))
        .with_attribute(HEADING_ATTRIBUTE, 0.0)
}

/// AIS vessel keyed by MMSI.
///
/// A missing heading is stored as `null` so renderers can tell "unknown"
/// apart from "due north".
pub fn vessel(mmsi: &str, coordinates: Coordinate, heading: Option<f64>) -> Entity {
    let heading = heading.map(Value::from).unwrap_or(Value::Null);
    Entity::new(EntityKind::Vessel, Geometry::point(coordinates))
        .with_identity(mmsi)
        .with_attribute(HEADING_ATTRIBUTE, heading)
}

/// Single historical position, drawn as a zero-radius circle.
pub fn track_point(coordinates: Coordinate) -> Entity {
    Entity::new(
        EntityKind::TrackPoint,
        Geometry::Circle {
            center: coordinates,
            radius: 0.0,
        },
    )
}

/// Track line between two consecutive positions.
pub fn track_line(start: Coordinate, end: Coordinate) -> Entity {
    Entity::new(EntityKind::TrackSegment, Geometry::segment(start, end))
}

/// Route line between two consecutive waypoints.
pub fn route_segment(start: Coordinate, end: Coordinate) -> Entity {
    Entity::new(EntityKind::RouteSegment, Geometry::segment(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vessel_has_identity_and_heading() {
        let v = vessel("123", [1.0, 2.0], Some(270.0));
        assert_eq!(v.kind(), EntityKind::Vessel);
        assert_eq!(v.identity_key(), Some("123"));
        assert_eq!(v.heading(), Some(270.0));
    }

    #[test]
    fn test_vessel_without_heading() {
        let v = vessel("123", [1.0, 2.0], None);
        assert_eq!(v.attribute(HEADING_ATTRIBUTE), Some(&Value::Null));
    }

    #[test]
    fn test_segments_are_identity_less() {
        assert!(track_line([0.0, 0.0], [1.0, 1.0]).identity_key().is_none());
        assert!(route_segment([0.0, 0.0], [1.0, 1.0]).identity_key().is_none());
        assert_eq!(track_point([0.0, 0.0]).kind(), EntityKind::TrackPoint);
        assert_eq!(boat_marker([0.0, 0.0]).kind(), EntityKind::Marker);
    }
}
