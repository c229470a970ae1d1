//! Own-boat track history.
//!
//! The track layer shows where the boat has been: one point per recorded
//! position, joined by straight lines in time order. Like the route, the
//! track set is rebuilt from scratch whenever fresh history arrives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use serde_json::Value;

use crate::collection::OrderedStore;
use crate::feature::{self, Coordinate, Entity};
use crate::history::HistoryPoint;

/// A single historical position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPoint {
    pub lat: f64,
    pub lng: f64,
    /// When the position was recorded, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<DateTime<Utc>>,
}

impl PositionPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, ts: None }
    }

    pub fn with_timestamp(lat: f64, lng: f64, ts: DateTime<Utc>) -> Self {
        Self {
            lat,
            lng,
            ts: Some(ts),
        }
    }

    /// Map-order coordinate.
    pub fn coordinate(&self) -> Coordinate {
        [self.lng, self.lat]
    }
}

/// Extract track positions from history samples, oldest first.
///
/// A sample's value may be a movement sensor position reading
/// (`{"response": {"coordinate": {"latitude", "longitude"}}}`), a bare
/// `{"coordinate": {...}}`, or a flat `{"lat", "lng"}` pair. Samples without
/// a readable position are dropped.
pub fn positions_from_history(points: &[HistoryPoint]) -> Vec<PositionPoint> {
    let mut positions: Vec<PositionPoint> = points
        .iter()
        .filter_map(|p| {
            let (lat, lng) = read_lat_lng(&p.value)?;
            Some(PositionPoint::with_timestamp(lat, lng, p.timestamp))
        })
        .collect();
    positions.sort_by_key(|p| p.ts);
    positions
}

fn read_lat_lng(value: &Value) -> Option<(f64, f64)> {
    let coordinate = value
        .pointer("/response/coordinate")
        .or_else(|| value.get("coordinate"));

    match coordinate {
        Some(c) => Some((c.get("latitude")?.as_f64()?, c.get("longitude")?.as_f64()?)),
        None => Some((value.get("lat")?.as_f64()?, value.get("lng")?.as_f64()?)),
    }
}

/// Replace every entity in `store` with the track for `history`.
///
/// Positions are expected oldest first. Each position becomes a track point
/// and each consecutive pair a track segment; points and segments are
/// interleaved in history order.
pub fn rebuild_track<S>(store: &mut S, history: &[PositionPoint])
where
    S: OrderedStore<Entity> + ?Sized,
{
    store.clear();

    let mut prev: Option<Coordinate> = None;
    for point in history {
        let current = point.coordinate();
        store.append(feature::track_point(current));
        if let Some(start) = prev {
            store.append(feature::track_line(start, current));
        }
        prev = Some(current);
    }
}
