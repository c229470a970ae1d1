//! Chart layer visibility.
//!
//! The user declares which layers should be visible; the map draws whatever
//! is in the active stack. [`reconcile_layers`] keeps the two in step,
//! matching renderables by their issued [`RenderableId`] rather than by
//! value.
//!
//! # Example
//!
//! ```
//! use chartplotter::collection::Collection;
//! use chartplotter::layers::{default_layer_options, reconcile_layers, IdIssuer};
//!
//! let issuer = IdIssuer::new();
//! let mut options = default_layer_options(&issuer);
//! let mut stack = Collection::new();
//!
//! reconcile_layers(options.descriptors(), &mut stack);
//! options.set_desired("depth", true);
//! reconcile_layers(options.descriptors(), &mut stack);
//! ```

mod catalog;
mod descriptor;
mod reconciler;

pub use catalog::{
    apply_overrides, default_layer_options, ChartLayer, FeatureSet, LayerSource, AIS_LAYER,
    BOAT_LAYER, DEPTH_LAYER, LAYER_NAMES, NOAA_LAYER, OSM_LAYER, ROUTE_LAYER, SEAMARK_LAYER,
    TRACK_LAYER,
};
pub use descriptor::{IdIssuer, LayerDescriptor, LayerOptions, Renderable, RenderableId};
pub use reconciler::{
    find_active_index, find_layer, reconcile_layers, LayerChanges, LayerPosition,
};
