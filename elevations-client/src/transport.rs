//! HTTP transport used by the client.

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT};

use crate::config::ClientConfig;
use crate::error::Result;

/// Sends a JSON request body and returns the raw response body.
///
/// [`HttpTransport`] is the implementation used by default. Other
/// implementations can be plugged in with
/// [`ElevationsClientBuilder::transport`](crate::ElevationsClientBuilder::transport),
/// e.g. to record requests in tests.
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the response body.
    ///
    /// Implementations must perform exactly one request and must not retry.
    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<String>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport using the timeout and user agent from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // reqwest's blocking client defaults to a 30s timeout; only apply one if configured
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<String> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body)
            .send()?
            .error_for_status()?;

        tracing::debug!(status = %response.status(), "Received response");

        Ok(response.text()?)
    }
}
