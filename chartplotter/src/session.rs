//! Chart session: the dashboard's state in one place.
//!
//! `ChartSession` owns the feature collections the vector layers draw, the
//! declared layer options with the active layer stack, and the history
//! failover controller. Every update goes through the reconcilers, so the
//! session is always in a state the map can draw directly.
//!
//! # Example
//!
//! ```
//! use chartplotter::ais::{LiveSnapshot, VesselReport};
//! use chartplotter::collection::OrderedStore;
//! use chartplotter::config::ConfigFile;
//! use chartplotter::history::HttpHistoryClient;
//! use chartplotter::session::ChartSession;
//! use std::time::Duration;
//!
//! let history =
//!     HttpHistoryClient::new("http://127.0.0.1:9/history", Duration::from_secs(1)).unwrap();
//! let mut session = ChartSession::new(&ConfigFile::default(), history);
//!
//! let snapshot =
//!     LiveSnapshot::new().with_vessel("366999001", VesselReport::new(42.0, -71.0, None));
//! session.apply_ais(&snapshot);
//! assert_eq!(session.ais().len(), 1);
//! ```

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::ais::{reconcile_ais, LiveSnapshot, ReconcileStats};
use crate::collection::{Collection, OrderedStore};
use crate::config::ConfigFile;
use crate::feature::{self, Coordinate, Entity};
use crate::history::{FailoverController, HistoryError, HistoryPoint, HistoryQuery};
use crate::layers::{
    apply_overrides, default_layer_options, reconcile_layers, ChartLayer, IdIssuer,
    LayerChanges, LayerOptions,
};
use crate::resource::{discover_sensor_names, Resource, SensorNames};
use crate::route::{process_route_document, RouteDocument};
use crate::sensor::{CapabilityQuery, SensorSelectionResult, SensorSelector};
use crate::track::{positions_from_history, rebuild_track, PositionPoint};

/// Dashboard state for one connected boat.
pub struct ChartSession<H> {
    /// Own-boat marker (at most one entity).
    boat: Collection<Entity>,
    /// Live AIS vessels.
    ais: Collection<Entity>,
    /// Own-boat track.
    track: Collection<Entity>,
    /// Active route.
    route: Collection<Entity>,

    layer_options: LayerOptions<ChartLayer>,
    active_layers: Collection<ChartLayer>,

    history: FailoverController<H>,
    /// Whether the config pinned a preferred sensor; selection does not
    /// override a pinned one.
    preferred_pinned: bool,
    lookback: chrono::Duration,

    sensor_names: SensorNames,
}

impl<H: HistoryQuery> ChartSession<H> {
    /// Build a session from config.
    ///
    /// Layer overrides from `[layers]` are applied on top of the catalog
    /// defaults and the active stack is reconciled once, so the initially
    /// visible layers are in place before the first update arrives.
    pub fn new(config: &ConfigFile, history: H) -> Self {
        let issuer = IdIssuer::new();
        let mut layer_options = default_layer_options(&issuer);
        for unknown in apply_overrides(&mut layer_options, &config.layers.overrides) {
            warn!(layer = %unknown, "Ignoring visibility override for unknown layer");
        }

        let mut active_layers = Collection::new();
        reconcile_layers(layer_options.descriptors(), &mut active_layers);

        let preferred = config.history.preferred_sensor.clone().unwrap_or_default();
        let history = FailoverController::new(history)
            .with_preferred(preferred.clone())
            .with_timeout(Some(config.history.timeout()));

        Self {
            boat: Collection::new(),
            ais: Collection::new(),
            track: Collection::new(),
            route: Collection::new(),
            layer_options,
            active_layers,
            history,
            preferred_pinned: !preferred.is_empty(),
            lookback: config.history.lookback(),
            sensor_names: SensorNames::default(),
        }
    }

    /// Reconcile the AIS collection against a fresh snapshot.
    pub fn apply_ais(&mut self, snapshot: &LiveSnapshot) -> ReconcileStats {
        reconcile_ais(&mut self.ais, snapshot)
    }

    /// Rebuild the route from a route document.
    pub fn apply_route(&mut self, doc: &RouteDocument) {
        process_route_document(doc, &mut self.route);
    }

    /// Rebuild the track from positions, oldest first.
    pub fn apply_track(&mut self, history: &[PositionPoint]) {
        rebuild_track(&mut self.track, history);
    }

    /// Move the own-boat marker, creating it on first use.
    pub fn set_boat_position(&mut self, coordinates: Coordinate) {
        match self.boat.item_at_mut(0) {
            Some(marker) => marker.set_geometry(feature::Geometry::point(coordinates)),
            None => self.boat.append(feature::boat_marker(coordinates)),
        }
    }

    /// Flip a layer's desired visibility and reconcile the active stack.
    ///
    /// Returns `None` if no layer has that name.
    pub fn toggle_layer(&mut self, name: &str) -> Option<LayerChanges> {
        let on = !self.layer_options.get(name)?.desired_on;
        self.layer_options.set_desired(name, on);
        let changes = reconcile_layers(self.layer_options.descriptors(), &mut self.active_layers);
        info!(layer = name, on, "Layer toggled");
        Some(changes)
    }

    /// Set a layer's desired visibility and reconcile the active stack.
    pub fn set_layer(&mut self, name: &str, on: bool) -> Option<LayerChanges> {
        if !self.layer_options.set_desired(name, on) {
            return None;
        }
        Some(reconcile_layers(
            self.layer_options.descriptors(),
            &mut self.active_layers,
        ))
    }

    /// Pick the movement sensor and wire it into history routing.
    ///
    /// The selection's position-capable sensors become the failover
    /// alternates. The chosen sensor becomes the preferred one unless the
    /// config pinned a preference. Named sensors (AIS, depth, ...) are
    /// discovered from the same resource list.
    pub async fn configure_sensors<Q: CapabilityQuery>(
        &mut self,
        selector: &SensorSelector<Q>,
        resources: &[Resource],
    ) -> SensorSelectionResult {
        let selection = selector.select(resources).await;

        self.history.set_alternates(selection.alternate_names.clone());
        if !self.preferred_pinned {
            self.history.set_preferred(selection.chosen_name.clone());
        }
        self.sensor_names = discover_sensor_names(resources);

        selection
    }

    /// Fetch position history since `start` through the failover controller.
    pub async fn position_history(
        &mut self,
        start: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>, HistoryError> {
        self.history.fetch(start).await
    }

    /// Fetch the configured lookback window of history and rebuild the track.
    ///
    /// Returns the number of track positions drawn.
    pub async fn refresh_track(&mut self, now: DateTime<Utc>) -> Result<usize, HistoryError> {
        let points = self.position_history(now - self.lookback).await?;
        let positions = positions_from_history(&points);
        self.apply_track(&positions);
        Ok(positions.len())
    }

    pub fn boat(&self) -> &Collection<Entity> {
        &self.boat
    }

    pub fn ais(&self) -> &Collection<Entity> {
        &self.ais
    }

    pub fn track(&self) -> &Collection<Entity> {
        &self.track
    }

    pub fn route(&self) -> &Collection<Entity> {
        &self.route
    }

    pub fn layer_options(&self) -> &LayerOptions<ChartLayer> {
        &self.layer_options
    }

    /// Layers currently drawn, bottom first.
    pub fn active_layers(&self) -> &Collection<ChartLayer> {
        &self.active_layers
    }

    /// Sensor history queries go to first.
    pub fn preferred_sensor(&self) -> &str {
        self.history.routing().preferred()
    }

    pub fn alternates(&self) -> &[String] {
        self.history.alternates()
    }

    pub fn sensor_names(&self) -> &SensorNames {
        &self.sensor_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ais::VesselReport;
    use crate::feature::EntityKind;
    use crate::layers::{Renderable, AIS_LAYER, DEPTH_LAYER, NOAA_LAYER, OSM_LAYER};
    use crate::resource::MOVEMENT_SENSOR_SUBTYPE;
    use crate::route::Waypoint;
    use crate::sensor::{CapabilityFlags, StaticCapabilities};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed per-sensor table and records call order.
    #[derive(Default)]
    struct TableHistory {
        data: HashMap<String, Vec<HistoryPoint>>,
        calls: Mutex<Vec<String>>,
    }

    impl HistoryQuery for TableHistory {
        async fn position_history(
            &self,
            sensor: &str,
            _start: DateTime<Utc>,
        ) -> Result<Vec<HistoryPoint>, HistoryError> {
            self.calls.lock().unwrap().push(sensor.to_string());
            Ok(self.data.get(sensor).cloned().unwrap_or_default())
        }
    }

    fn fix(secs: i64, lat: f64, lng: f64) -> HistoryPoint {
        HistoryPoint::new(
            DateTime::from_timestamp(secs, 0).unwrap(),
            json!({ "lat": lat, "lng": lng }),
        )
    }

    fn active_names(session: &ChartSession<TableHistory>) -> Vec<String> {
        session
            .active_layers()
            .iter()
            .filter_map(|layer| {
                session
                    .layer_options()
                    .descriptors()
                    .iter()
                    .find(|d| d.renderable.render_id() == layer.render_id())
                    .map(|d| d.name.clone())
            })
            .collect()
    }

    #[test]
    fn test_initial_stack_follows_defaults() {
        let session = ChartSession::new(&ConfigFile::default(), TableHistory::default());

        let names = active_names(&session);
        assert_eq!(names[0], NOAA_LAYER);
        assert!(!names.contains(&OSM_LAYER.to_string()));
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_config_overrides_apply() {
        let mut config = ConfigFile::default();
        config.layers.overrides.insert(OSM_LAYER.to_string(), true);
        config.layers.overrides.insert(NOAA_LAYER.to_string(), false);
        config.layers.overrides.insert("weather".to_string(), true);

        let session = ChartSession::new(&config, TableHistory::default());

        let names = active_names(&session);
        assert_eq!(names[0], OSM_LAYER);
        assert!(!names.contains(&NOAA_LAYER.to_string()));
    }

    #[test]
    fn test_toggle_layer_reconciles() {
        let mut session = ChartSession::new(&ConfigFile::default(), TableHistory::default());

        let changes = session.toggle_layer(DEPTH_LAYER).unwrap();
        assert_eq!(changes.added, 1);
        assert!(active_names(&session).contains(&DEPTH_LAYER.to_string()));

        let changes = session.toggle_layer(AIS_LAYER).unwrap();
        assert_eq!(changes.removed, 1);
        assert!(!active_names(&session).contains(&AIS_LAYER.to_string()));

        assert!(session.toggle_layer("weather").is_none());
    }

    #[test]
    fn test_apply_updates() {
        let mut session = ChartSession::new(&ConfigFile::default(), TableHistory::default());

        let snapshot = LiveSnapshot::new()
            .with_vessel("366999001", VesselReport::new(42.0, -71.0, Some(90.0)));
        let stats = session.apply_ais(&snapshot);
        assert_eq!(stats.added, 1);

        session.apply_route(&RouteDocument {
            list: Some(vec![Waypoint::new(-71.0, 42.0), Waypoint::new(-71.1, 42.1)]),
        });
        assert_eq!(session.route().len(), 1);

        session.apply_track(&[PositionPoint::new(42.0, -71.0), PositionPoint::new(42.1, -71.1)]);
        assert_eq!(session.track().len(), 3);
    }

    #[test]
    fn test_boat_marker_moves_in_place() {
        let mut session = ChartSession::new(&ConfigFile::default(), TableHistory::default());

        session.set_boat_position([-71.0, 42.0]);
        session.set_boat_position([-71.5, 42.5]);

        assert_eq!(session.boat().len(), 1);
        let marker = session.boat().item_at(0).unwrap();
        assert_eq!(marker.kind(), EntityKind::Marker);
        assert_eq!(marker.position(), Some([-71.5, 42.5]));
    }

    #[tokio::test]
    async fn test_configure_sensors_sets_routing() {
        let mut session = ChartSession::new(&ConfigFile::default(), TableHistory::default());
        let selector = SensorSelector::new(
            StaticCapabilities::new()
                .with_sensor("gps", CapabilityFlags::new(true, true, false))
                .with_sensor("backup-gps", CapabilityFlags::new(true, false, false)),
        );
        let resources = [
            Resource::component("gps", MOVEMENT_SENSOR_SUBTYPE),
            Resource::component("backup-gps", MOVEMENT_SENSOR_SUBTYPE),
            Resource::component("ais", crate::resource::SENSOR_SUBTYPE),
        ];

        let selection = session.configure_sensors(&selector, &resources).await;

        assert_eq!(selection.chosen_name, "gps");
        assert_eq!(session.preferred_sensor(), "gps");
        assert_eq!(session.alternates(), ["gps", "backup-gps"]);
        assert_eq!(session.sensor_names().ais, "ais");
    }

    #[tokio::test]
    async fn test_pinned_preference_survives_selection() {
        let mut config = ConfigFile::default();
        config.history.preferred_sensor = Some("boat-main:nav".to_string());
        let mut session = ChartSession::new(&config, TableHistory::default());
        let selector = SensorSelector::new(
            StaticCapabilities::new().with_sensor("gps", CapabilityFlags::new(true, false, false)),
        );

        session
            .configure_sensors(&selector, &[Resource::component("gps", MOVEMENT_SENSOR_SUBTYPE)])
            .await;

        assert_eq!(session.preferred_sensor(), "boat-main:nav");
        assert_eq!(session.alternates(), ["gps"]);
    }

    #[tokio::test]
    async fn test_refresh_track_fails_over() {
        let mut history = TableHistory::default();
        history.data.insert(
            "backup-gps".to_string(),
            vec![fix(60, 42.1, -71.1), fix(0, 42.0, -71.0)],
        );
        let mut session = ChartSession::new(&ConfigFile::default(), history);
        let selector = SensorSelector::new(
            StaticCapabilities::new()
                .with_sensor("gps", CapabilityFlags::new(true, true, false))
                .with_sensor("backup-gps", CapabilityFlags::new(true, false, false)),
        );
        session
            .configure_sensors(
                &selector,
                &[
                    Resource::component("gps", MOVEMENT_SENSOR_SUBTYPE),
                    Resource::component("backup-gps", MOVEMENT_SENSOR_SUBTYPE),
                ],
            )
            .await;

        let drawn = session.refresh_track(Utc::now()).await.unwrap();

        assert_eq!(drawn, 2);
        assert_eq!(session.track().len(), 3);
        assert_eq!(session.preferred_sensor(), "backup-gps");
    }
}
