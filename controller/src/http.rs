//! reqwest-backed transport for `POST /route`.

use std::time::Duration;

use shared::{RouteReply, RouteRequest};
use tracing::debug;

use crate::error::TransportError;
use crate::request::RouteTransport;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/route";

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub endpoint: String,
    /// Left unset, a hung backend keeps the cycle waiting.
    pub timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl HttpConfig {
    /// Endpoint from `ROUTE_API_ROOT`, falling back to the local backend.
    pub fn from_env() -> Self {
        Self::with_endpoint(std::env::var("ROUTE_API_ROOT").ok().as_deref())
    }

    fn with_endpoint(url: Option<&str>) -> Self {
        let endpoint = url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);
        Self {
            endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: HttpConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl RouteTransport for HttpTransport {
    async fn post_route(&self, request: &RouteRequest) -> Result<RouteReply, TransportError> {
        debug!(
            endpoint = %self.config.endpoint,
            algo = %request.algo,
            "sending route request"
        );
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(request)
            .send()
            .await?;

        // Error replies arrive with 4xx/5xx statuses but still carry a JSON body.
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "route response received");
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_targets_local_backend() {
        let config = HttpConfig::default();
        assert_eq!(config.endpoint, "http://localhost:5000/route");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_endpoint_override_drops_trailing_slash() {
        let config = HttpConfig::with_endpoint(Some("http://routing.local:8080/route/"));
        assert_eq!(config.endpoint, "http://routing.local:8080/route");
    }

    #[test]
    fn test_missing_or_blank_override_uses_default() {
        assert_eq!(HttpConfig::with_endpoint(None).endpoint, DEFAULT_ENDPOINT);
        assert_eq!(HttpConfig::with_endpoint(Some("  ")).endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_env_reads_route_api_root() {
        std::env::set_var("ROUTE_API_ROOT", "http://10.0.0.5:5000/route/");
        let config = HttpConfig::from_env();
        std::env::remove_var("ROUTE_API_ROOT");
        assert_eq!(config.endpoint, "http://10.0.0.5:5000/route");
    }

    #[test]
    fn test_transport_keeps_configured_endpoint() {
        let transport = HttpTransport::new(HttpConfig {
            endpoint: "http://127.0.0.1:9/route".into(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        assert_eq!(transport.endpoint(), "http://127.0.0.1:9/route");
    }
}
