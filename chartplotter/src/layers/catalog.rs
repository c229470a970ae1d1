//! The dashboard's declared chart layers.
//!
//! Order matters: layers turned on at startup enter the active stack in
//! this order, base charts first and vessel overlays on top.

use std::collections::BTreeMap;

use serde::Serialize;

use super::descriptor::{IdIssuer, LayerDescriptor, LayerOptions, Renderable, RenderableId};

pub const OSM_LAYER: &str = "open street map";
pub const DEPTH_LAYER: &str = "depth";
pub const SEAMARK_LAYER: &str = "seamark";
pub const NOAA_LAYER: &str = "noaa";
pub const BOAT_LAYER: &str = "boat";
pub const AIS_LAYER: &str = "ais";
pub const TRACK_LAYER: &str = "track";
pub const ROUTE_LAYER: &str = "route";

/// Every catalog layer name, in declaration order.
pub const LAYER_NAMES: [&str; 8] = [
    OSM_LAYER,
    DEPTH_LAYER,
    SEAMARK_LAYER,
    NOAA_LAYER,
    BOAT_LAYER,
    AIS_LAYER,
    TRACK_LAYER,
    ROUTE_LAYER,
];

/// Which feature collection a vector layer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureSet {
    Boat,
    Ais,
    Track,
    Route,
}

/// Where a layer's content comes from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerSource {
    /// XYZ raster tiles.
    Xyz { url: String, opacity: f64 },
    /// WMS raster service.
    Wms {
        url: String,
        params: BTreeMap<String, String>,
        opacity: f64,
    },
    /// Vector features from one of the chart's collections.
    Features(FeatureSet),
}

/// A renderable chart layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayer {
    pub id: RenderableId,
    pub source: LayerSource,
}

impl ChartLayer {
    pub fn new(issuer: &IdIssuer, source: LayerSource) -> Self {
        Self {
            id: issuer.issue(),
            source,
        }
    }
}

impl Renderable for ChartLayer {
    fn render_id(&self) -> RenderableId {
        self.id
    }
}

/// Build the default layer set with fresh identities.
pub fn default_layer_options(issuer: &IdIssuer) -> LayerOptions<ChartLayer> {
    let xyz = |url: &str, opacity: f64| LayerSource::Xyz {
        url: url.to_string(),
        opacity,
    };
    let wms = |url: &str, params: &[(&str, &str)], opacity: f64| LayerSource::Wms {
        url: url.to_string(),
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        opacity,
    };

    let layers = [
        (
            OSM_LAYER,
            false,
            xyz("https://tile.openstreetmap.org/{z}/{x}/{y}.png", 0.5),
        ),
        (
            DEPTH_LAYER,
            false,
            wms(
                "https://geoserver.openseamap.org/geoserver/gwc/service/wms",
                &[("LAYERS", "gebco2021:gebco_2021"), ("VERSION", "1.1.1")],
                0.7,
            ),
        ),
        (
            SEAMARK_LAYER,
            false,
            xyz("https://tiles.openseamap.org/seamark/{z}/{x}/{y}.png", 1.0),
        ),
        (
            NOAA_LAYER,
            true,
            wms(
                "https://gis.charttools.noaa.gov/arcgis/rest/services/MCS/NOAAChartDisplay/MapServer/exts/MaritimeChartService/WMSServer",
                &[],
                0.7,
            ),
        ),
        (BOAT_LAYER, true, LayerSource::Features(FeatureSet::Boat)),
        (AIS_LAYER, true, LayerSource::Features(FeatureSet::Ais)),
        (TRACK_LAYER, true, LayerSource::Features(FeatureSet::Track)),
        (ROUTE_LAYER, true, LayerSource::Features(FeatureSet::Route)),
    ];

    layers
        .into_iter()
        .map(|(name, on, source)| LayerDescriptor::new(name, on, ChartLayer::new(issuer, source)))
        .collect()
}

/// Apply per-layer visibility overrides.
///
/// Returns the names that matched no declared layer.
pub fn apply_overrides<R>(
    options: &mut LayerOptions<R>,
    overrides: &BTreeMap<String, bool>,
) -> Vec<String> {
    overrides
        .iter()
        .filter(|(name, on)| !options.set_desired(name, **on))
        .map(|(name, _)| name.clone())
        .collect()
}
