//! Request transport: posts a JSON body to one endpoint URL.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::error::QueryError;

/// Sends one JSON-RPC body (single request or batch) and returns the parsed
/// JSON reply.
///
/// Implementations map every failure into a [`QueryError`]: unreachable
/// node or timeout → `Transport`, non-2xx → `Status`, unparseable body →
/// `Malformed`.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn post(&self, url: &str, body: &Value) -> Result<Value, QueryError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    async fn post(&self, url: &str, body: &Value) -> Result<Value, QueryError> {
        (**self).post(url, body).await
    }
}

/// Timeouts applied by [`HttpTransport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportOptions {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP transport backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(options: TransportOptions) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(|e| QueryError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(&self, url: &str, body: &Value) -> Result<Value, QueryError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| QueryError::Malformed(format!("invalid JSON response: {e}")))
    }
}
