//! Shared HTTP connection for exchange REST requests

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use types::Venue;

use crate::{AdapterError, Result};

/// Pooled HTTP client bound to a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpConnection {
    client: Client,
    timeout: Duration,
}

impl HttpConnection {
    /// Create a connection whose requests fail after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                AdapterError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// GET `url` with query parameters and decode the body as JSON.
    ///
    /// Non-success statuses and undecodable bodies are errors attributed to `venue`.
    pub async fn get_json(&self, venue: Venue, url: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!("GET {} {:?} ({})", url, query, venue);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.request_error(venue, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::UpstreamStatus {
                venue,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.request_error(venue, e))?;

        serde_json::from_slice(&body)
            .map_err(|e| AdapterError::parse(venue, format!("invalid JSON body: {}", e)))
    }

    fn request_error(&self, venue: Venue, error: reqwest::Error) -> AdapterError {
        if error.is_timeout() {
            AdapterError::ConnectionTimeout {
                venue,
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            AdapterError::ConnectionFailed {
                venue,
                reason: error.to_string(),
            }
        }
    }
}
