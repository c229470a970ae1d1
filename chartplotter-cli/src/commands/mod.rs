//! CLI command implementations.

pub mod ais;
pub mod common;
pub mod config;
pub mod history;
pub mod layers;
pub mod route;
pub mod select;
