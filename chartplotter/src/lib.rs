//! Chartplotter - marine chart dashboard core
//!
//! State management for a boat's chart display: live AIS vessel
//! reconciliation, route and track rebuilding, chart layer visibility,
//! movement sensor selection and position history queries with sensor
//! failover.
//!
//! The reconcilers work against any [`collection::OrderedStore`], so the
//! same logic drives an in-memory [`collection::Collection`] in tests and
//! whatever feature store a renderer exposes.

pub mod ais;
pub mod collection;
pub mod config;
pub mod feature;
pub mod history;
pub mod layers;
pub mod logging;
pub mod resource;
pub mod route;
pub mod sensor;
pub mod session;
pub mod track;
