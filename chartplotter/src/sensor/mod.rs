//! Movement sensor selection.
//!
//! A boat usually carries more than one movement sensor: a GPS puck, a
//! compass, a full NMEA 2000 navigation unit. The dashboard binds to the
//! single most capable one and remembers every position-capable sensor as a
//! failover candidate for history queries.
//!
//! # Example
//!
//! ```
//! use chartplotter::resource::{Resource, MOVEMENT_SENSOR_SUBTYPE};
//! use chartplotter::sensor::{CapabilityFlags, SensorSelector, StaticCapabilities};
//!
//! # tokio_test_block(async {
//! let caps = StaticCapabilities::new()
//!     .with_sensor("gps", CapabilityFlags::new(true, true, false));
//! let selector = SensorSelector::new(caps);
//!
//! let result = selector
//!     .select(&[Resource::component("gps", MOVEMENT_SENSOR_SUBTYPE)])
//!     .await;
//! assert_eq!(result.chosen_name, "gps");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

mod capabilities;
mod http;
mod selector;

pub use capabilities::{CapabilityError, CapabilityFlags, CapabilityQuery, StaticCapabilities};
pub use http::HttpCapabilityClient;
pub use selector::{
    SensorCandidate, SensorSelectionResult, SensorSelector, DEFAULT_CAPABILITY_TIMEOUT,
};
