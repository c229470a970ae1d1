//! History query types and the query seam.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One aggregated history sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    /// Sensor reading as returned by the aggregation service.
    pub value: serde_json::Value,
}

impl HistoryPoint {
    pub fn new(timestamp: DateTime<Utc>, value: serde_json::Value) -> Self {
        Self { timestamp, value }
    }
}

/// Errors from a history query call.
///
/// An empty result is not an error; these only cover calls that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    /// No aggregation service endpoint is configured.
    #[error("No history endpoint configured")]
    NoEndpoint,

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The query did not complete in time.
    #[error("History query for {sensor} timed out after {after:?}")]
    Timeout { sensor: String, after: Duration },
}

/// Source of position history for a named sensor.
pub trait HistoryQuery: Send + Sync {
    /// Fetch samples recorded by `sensor` since `start`, oldest first.
    fn position_history(
        &self,
        sensor: &str,
        start: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<HistoryPoint>, HistoryError>> + Send;
}

impl<T: HistoryQuery> HistoryQuery for Arc<T> {
    fn position_history(
        &self,
        sensor: &str,
        start: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<HistoryPoint>, HistoryError>> + Send {
        (**self).position_history(sensor, start)
    }
}
