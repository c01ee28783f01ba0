//! Transport seam: the [`EventSink`] trait and its reqwest-backed
//! production implementation.

use std::time::Duration;

use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::event::AnalyticsEvent;

/// Production collect endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";

/// Debug (payload validation) collect endpoint.
pub const DEFAULT_DEBUG_ENDPOINT: &str = "https://www.google-analytics.com/debug/mp/collect";

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GA4 measurement ID (`G-XXXXXXX`).
    pub measurement_id: String,
    /// Measurement Protocol API secret.
    pub api_secret: String,
    /// Production collect endpoint URL.
    pub endpoint: String,
    /// Debug collect endpoint URL.
    pub debug_endpoint: String,
    /// Request timeout, unless overridden per call.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the standard Google endpoints.
    pub fn new(measurement_id: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            measurement_id: measurement_id.into(),
            api_secret: api_secret.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debug_endpoint: DEFAULT_DEBUG_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Where a validated envelope goes. Object-safe so tests can substitute a
/// recording fake for the network.
pub trait EventSink: Send + Sync {
    /// Deliver one envelope. `debug` selects the debug endpoint; `timeout`
    /// overrides the configured transport timeout for this call.
    fn send(
        &self,
        payload: &AnalyticsEvent,
        debug: bool,
        timeout: Option<Duration>,
    ) -> AnalyticsResult<()>;
}

impl<T: EventSink> EventSink for std::sync::Arc<T> {
    fn send(
        &self,
        payload: &AnalyticsEvent,
        debug: bool,
        timeout: Option<Duration>,
    ) -> AnalyticsResult<()> {
        (**self).send(payload, debug, timeout)
    }
}

/// Production sink: POSTs the JSON envelope to the collect endpoint with
/// `measurement_id` and `api_secret` query parameters.
pub struct HttpSink {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl HttpSink {
    pub fn new(config: ClientConfig) -> AnalyticsResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }
}

impl EventSink for HttpSink {
    fn send(
        &self,
        payload: &AnalyticsEvent,
        debug: bool,
        timeout: Option<Duration>,
    ) -> AnalyticsResult<()> {
        let endpoint = if debug {
            &self.config.debug_endpoint
        } else {
            &self.config.endpoint
        };

        let mut request = self
            .http
            .post(endpoint)
            .query(&[
                ("measurement_id", self.config.measurement_id.as_str()),
                ("api_secret", self.config.api_secret.as_str()),
            ])
            .json(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send()?;
        let status = response.status();
        if status == reqwest::StatusCode::OK || status == reqwest::StatusCode::NO_CONTENT {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        tracing::warn!("ga4m: collect endpoint rejected payload: HTTP {status}");
        Err(AnalyticsError::RejectedByServer {
            status: status.as_u16(),
            body,
        })
    }
}
