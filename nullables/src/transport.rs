//! Nullable transport: scripted replies instead of HTTP.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use suiscope_rpc::{QueryError, RpcTransport};

/// One request "sent" through a [`NullTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
}

impl RecordedRequest {
    /// JSON-RPC method names in this request (one per batch entry).
    pub fn methods(&self) -> Vec<String> {
        let method = |v: &Value| v.get("method").and_then(Value::as_str).map(str::to_owned);
        match &self.body {
            Value::Array(batch) => batch.iter().filter_map(method).collect(),
            single => method(single).into_iter().collect(),
        }
    }

    pub fn is_batch(&self) -> bool {
        self.body.is_array()
    }
}

/// A transport that replays scripted replies per URL and records requests.
///
/// Replies for one URL are consumed in the order they were scripted. A URL
/// with nothing left to reply fails with [`QueryError::Transport`], like an
/// unreachable node.
#[derive(Default)]
pub struct NullTransport {
    scripts: Mutex<HashMap<String, VecDeque<Result<Value, QueryError>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next reply for `url`.
    pub fn script(&self, url: &str, reply: Result<Value, QueryError>) -> &Self {
        self.scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a successful reply for `url`.
    pub fn reply(&self, url: &str, body: Value) -> &Self {
        self.script(url, Ok(body))
    }

    /// Queue a failure for `url`.
    pub fn fail(&self, url: &str, error: QueryError) -> &Self {
        self.script(url, Err(error))
    }

    /// Every request, in the order it was sent.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Requests sent to `url`.
    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url == url)
            .collect()
    }

    /// URLs in the order they were first contacted.
    pub fn contacted_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for request in self.requests() {
            if !urls.contains(&request.url) {
                urls.push(request.url);
            }
        }
        urls
    }

    /// Clear scripts and recorded requests.
    pub fn reset(&self) {
        self.scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

#[async_trait]
impl RpcTransport for NullTransport {
    async fn post(&self, url: &str, body: &Value) -> Result<Value, QueryError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedRequest {
                url: url.to_string(),
                body: body.clone(),
            });

        self.scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(QueryError::Transport(format!("no scripted reply for {url}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replays_scripted_replies_in_order() {
        let transport = NullTransport::new();
        transport
            .reply("http://a", json!(1))
            .fail("http://a", QueryError::Status(503));

        assert_eq!(transport.post("http://a", &json!({})).await, Ok(json!(1)));
        assert_eq!(
            transport.post("http://a", &json!({})).await,
            Err(QueryError::Status(503))
        );
        assert!(transport
            .post("http://a", &json!({}))
            .await
            .unwrap_err()
            .is_connection_failure());
    }

    #[tokio::test]
    async fn records_requests_and_methods() {
        let transport = NullTransport::new();
        let _ = transport
            .post("http://a", &json!({"method": "one"}))
            .await;
        let _ = transport
            .post("http://b", &json!([{"method": "two"}, {"method": "three"}]))
            .await;

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].methods(), vec!["one"]);
        assert!(requests[1].is_batch());
        assert_eq!(requests[1].methods(), vec!["two", "three"]);
        assert_eq!(transport.contacted_urls(), vec!["http://a", "http://b"]);
        assert_eq!(transport.requests_to("http://b").len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let transport = NullTransport::new();
        transport.reply("http://a", json!(1));
        let _ = transport.post("http://b", &json!({})).await;
        transport.reset();
        assert!(transport.requests().is_empty());
        assert!(transport.post("http://a", &json!({})).await.is_err());
    }
}
