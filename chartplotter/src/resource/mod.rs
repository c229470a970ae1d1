//! Device resource directory.
//!
//! A connected device advertises a flat list of named resources, each with a
//! type and subtype. Everything the dashboard binds to (movement sensors,
//! AIS, gauges) is found by filtering that list.

mod directory;
mod discovery;

pub use directory::{
    all_matching_names, filter_resources, first_matching_name, Resource, COMPONENT_TYPE,
    MOVEMENT_SENSOR_SUBTYPE, SENSOR_SUBTYPE,
};
pub use discovery::{discover_sensor_names, SensorNames};
