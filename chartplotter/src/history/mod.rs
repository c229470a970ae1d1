//! Position history queries.
//!
//! History comes from an aggregation service keyed by sensor name. The
//! [`FailoverController`] keeps track of which sensor is actually recording
//! and fails over to the position-capable alternates when the preferred one
//! comes back empty.

mod failover;
mod http;
mod types;

pub use failover::{
    fetch_with_failover, FailoverController, QueryRoutingState, SharedFailoverController,
    DEFAULT_HISTORY_TIMEOUT,
};
pub use http::{component_name, HttpHistoryClient};
pub use types::{HistoryError, HistoryPoint, HistoryQuery};
