//! HTTP transport used by the query builder.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport settings. Read from the environment by [`ClientConfig::from_env`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Per-request timeout. `RESOURCE_QUERY_TIMEOUT_SECS`, defaults to 30 seconds.
    pub timeout: Duration,
    /// Optional `User-Agent` header. `RESOURCE_QUERY_USER_AGENT`.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_secs(env_u64(
                "RESOURCE_QUERY_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            user_agent: std::env::var("RESOURCE_QUERY_USER_AGENT")
                .ok()
                .filter(|ua| !ua.is_empty()),
        }
    }
}

/// Status and body of a completed request.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, Error> {
        serde_json::from_str(&self.body).map_err(|e| {
            tracing::error!(
                "Failed to parse response: {} | body: {}",
                e,
                truncate_body(&self.body)
            );
            Error::Decode(e.to_string())
        })
    }

    /// Parses the body as JSON, falling back to the raw text as a JSON string.
    pub fn json_lossy(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

/// HTTP client for JSON resource endpoints.
///
/// Every request asks for `application/json` and sends bodies as JSON. Each
/// request builds a fresh `reqwest::Client` from the stored config, so a
/// `Client` is cheap to clone and holds no connection state. Timeouts are
/// enforced here; nothing is retried.
#[derive(Clone, Debug, Default)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Creates a client configured from the environment.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::from_env())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues one request and returns whatever status the server answered with.
    /// Only failures to obtain a response are errors here.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse, Error> {
        let mut builder = reqwest::Client::builder().timeout(self.config.timeout);
        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = builder.build().map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::RequestFailed
        })?;

        tracing::debug!("{} {}", method, url);
        let mut request = client
            .request(method, url)
            .header("accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        Ok(RawResponse { status, body })
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}
