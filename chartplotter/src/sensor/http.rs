//! Device capability lookups over HTTP.

use std::time::Duration;

use tracing::warn;

use super::capabilities::{CapabilityError, CapabilityFlags, CapabilityQuery};

/// [`CapabilityQuery`] that asks the device's HTTP API.
///
/// Flags are read from `GET {endpoint}/sensors/{name}/properties`.
#[derive(Debug, Clone)]
pub struct HttpCapabilityClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCapabilityClient {
    /// Create a client for the device at `endpoint` with a request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CapabilityError::Http(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint: String = endpoint.into();
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn properties_url(&self, sensor: &str) -> String {
        format!("{}/sensors/{}/properties", self.endpoint, sensor)
    }
}

impl CapabilityQuery for HttpCapabilityClient {
    async fn properties(&self, sensor: &str) -> Result<CapabilityFlags, CapabilityError> {
        let url = self.properties_url(sensor);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Capability request failed");
            CapabilityError::Http(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CapabilityError::UnknownSensor(sensor.to_string()));
        }
        if !status.is_success() {
            return Err(CapabilityError::Http(format!("HTTP {} from {}", status, url)));
        }

        response
            .json()
            .await
            .map_err(|e| CapabilityError::InvalidResponse(e.to_string()))
    }
}
