//! HTTP client for the aggregation query service.
//!
//! The service takes a sensor name and a start time and answers with the
//! sensor's position samples since then, oldest first:
//!
//! ```text
//! POST {endpoint}
//! { "sensor": "gps", "start": "2026-01-01T00:00:00Z" }
//!
//! 200 OK
//! [ { "timestamp": "...", "value": { ... } }, ... ]
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::types::{HistoryError, HistoryPoint, HistoryQuery};

#[derive(Serialize)]
struct HistoryRequest<'a> {
    sensor: &'a str,
    start: DateTime<Utc>,
}

/// Strip the machine-part prefix from a sensor name.
///
/// Resource names come back from the device as `part:name`, but history is
/// recorded under the bare component name.
pub fn component_name(sensor: &str) -> &str {
    sensor.rsplit(':').next().unwrap_or(sensor)
}

/// [`HistoryQuery`] backed by the aggregation service's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpHistoryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpHistoryClient {
    /// Create a client for `endpoint` with a request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, HistoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HistoryError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HistoryQuery for HttpHistoryClient {
    async fn position_history(
        &self,
        sensor: &str,
        start: DateTime<Utc>,
    ) -> Result<Vec<HistoryPoint>, HistoryError> {
        let request = HistoryRequest {
            sensor: component_name(sensor),
            start,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(
                    url = %self.endpoint,
                    sensor,
                    error = %e,
                    is_timeout = e.is_timeout(),
                    "History request failed"
                );
                HistoryError::Http(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HistoryError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let points: Vec<HistoryPoint> = response
            .json()
            .await
            .map_err(|e| HistoryError::InvalidResponse(e.to_string()))?;

        debug!(sensor, points = points.len(), "History response decoded");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_strips_part_prefix() {
        assert_eq!(component_name("boat-main:gps"), "gps");
        assert_eq!(component_name("a:b:gps"), "gps");
        assert_eq!(component_name("gps"), "gps");
        assert_eq!(component_name(""), "");
    }

    #[test]
    fn test_request_body_shape() {
        let start = DateTime::from_timestamp(0, 0).unwrap();
        let body = serde_json::to_value(HistoryRequest {
            sensor: "gps",
            start,
        })
        .unwrap();
        assert_eq!(body["sensor"], "gps");
        assert_eq!(body["start"], "1970-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client =
            HttpHistoryClient::new("http://127.0.0.1:9/history", Duration::from_secs(2)).unwrap();

        let err = client
            .position_history("gps", Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, HistoryError::Http(_)));
    }
}
