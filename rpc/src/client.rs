//! The two ledger queries, issued against one given endpoint.

use serde_json::Value;

use suiscope_types::{AccountId, Endpoint, TransactionDetail, TransactionDigest};

use crate::error::QueryError;
use crate::transport::RpcTransport;
use crate::wire::{self, QueryDirection};

/// Number of most recent transactions fetched when no limit is configured.
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page the node serves for one digest lookup.
pub const MAX_LIMIT: usize = 50;

/// Outcome of a successful digest lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestLookup {
    /// Digests, newest first.
    Found(Vec<TransactionDigest>),
    /// The node reported no matching transactions. Not a failure.
    Empty,
}

/// Issues ledger queries through an [`RpcTransport`].
///
/// The client owns no retry or fallback logic: every call targets exactly
/// the endpoint it is given and reports failure as a [`QueryError`].
pub struct LedgerQueryClient<T> {
    transport: T,
    direction: QueryDirection,
}

impl<T: RpcTransport> LedgerQueryClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            direction: QueryDirection::default(),
        }
    }

    /// Select transactions by recipient instead of sender.
    pub fn with_direction(mut self, direction: QueryDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn direction(&self) -> QueryDirection {
        self.direction
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the digests of the account's most recent transactions.
    ///
    /// `limit` is clamped to `1..=MAX_LIMIT`.
    pub async fn list_transaction_digests(
        &self,
        endpoint: &Endpoint,
        account: &AccountId,
        limit: usize,
    ) -> Result<DigestLookup, QueryError> {
        let limit = limit.clamp(1, MAX_LIMIT);
        let request = wire::digest_query(account, limit, self.direction);
        tracing::debug!(
            endpoint = %endpoint.url,
            account = %account,
            limit,
            "querying transaction digests"
        );

        let body = self.transport.post(&endpoint.url, &request.to_value()).await?;
        let digests = wire::parse_digest_page(body)?;

        if digests.is_empty() {
            Ok(DigestLookup::Empty)
        } else {
            tracing::debug!(
                endpoint = %endpoint.url,
                count = digests.len(),
                "received digests"
            );
            Ok(DigestLookup::Found(digests))
        }
    }

    /// Fetch details for `digests` in one batch request.
    ///
    /// The result has one slot per digest, in input order; a slot is `None`
    /// when the node returned no usable payload for that digest.
    pub async fn fetch_transaction_details(
        &self,
        endpoint: &Endpoint,
        digests: &[TransactionDigest],
    ) -> Result<Vec<Option<TransactionDetail>>, QueryError> {
        if digests.is_empty() {
            return Ok(Vec::new());
        }
        let batch: Vec<Value> = wire::detail_batch(digests)
            .iter()
            .map(wire::JsonRpcRequest::to_value)
            .collect();
        tracing::debug!(
            endpoint = %endpoint.url,
            count = batch.len(),
            "fetching transaction details"
        );

        let body = self.transport.post(&endpoint.url, &Value::Array(batch)).await?;
        wire::parse_detail_batch(body, digests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays one canned reply and keeps the last request body.
    struct Canned {
        reply: Result<Value, QueryError>,
        last_body: Mutex<Option<Value>>,
    }

    impl Canned {
        fn new(reply: Result<Value, QueryError>) -> Self {
            Self {
                reply,
                last_body: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl RpcTransport for Canned {
        async fn post(&self, _url: &str, body: &Value) -> Result<Value, QueryError> {
            *self.last_body.lock().unwrap() = Some(body.clone());
            self.reply.clone()
        }
    }

    fn endpoint() -> Endpoint {
        Endpoint::new("https://node.example", 0)
    }

    #[tokio::test]
    async fn empty_data_is_empty_lookup() {
        let client = LedgerQueryClient::new(Canned::new(Ok(json!({"result": {"data": []}}))));
        let lookup = client
            .list_transaction_digests(&endpoint(), &AccountId::new("0xa"), DEFAULT_LIMIT)
            .await
            .unwrap();
        assert_eq!(lookup, DigestLookup::Empty);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let reply = json!({"result": {"data": [{"digest": "a"}]}});
        let client = LedgerQueryClient::new(Canned::new(Ok(reply)));
        let lookup = client
            .list_transaction_digests(&endpoint(), &AccountId::new("0xa"), 500)
            .await
            .unwrap();
        assert_eq!(lookup, DigestLookup::Found(vec![TransactionDigest::new("a")]));
        let body = client.transport().last_body.lock().unwrap().clone().unwrap();
        assert_eq!(body["params"][2], MAX_LIMIT);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let client = LedgerQueryClient::new(Canned::new(Err(QueryError::Status(502))));
        let err = client
            .list_transaction_digests(&endpoint(), &AccountId::new("0xa"), 10)
            .await
            .unwrap_err();
        assert_eq!(err, QueryError::Status(502));
    }

    #[tokio::test]
    async fn detail_fetch_sends_one_batch() {
        let client = LedgerQueryClient::new(Canned::new(Ok(json!([
            {"id": 1, "result": {"digest": "a"}},
            {"id": 2, "result": null},
        ]))));
        let digests = vec![TransactionDigest::new("a"), TransactionDigest::new("b")];
        let slots = client
            .fetch_transaction_details(&endpoint(), &digests)
            .await
            .unwrap();
        assert!(slots[0].is_some());
        assert!(slots[1].is_none());
        let body = client.transport().last_body.lock().unwrap().clone().unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn no_digests_means_no_request() {
        let client = LedgerQueryClient::new(Canned::new(Err(QueryError::Status(500))));
        let slots = client.fetch_transaction_details(&endpoint(), &[]).await.unwrap();
        assert!(slots.is_empty());
        assert!(client.transport().last_body.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn recipient_direction_is_forwarded() {
        let client = LedgerQueryClient::new(Canned::new(Ok(json!({"result": {}}))))
            .with_direction(QueryDirection::Recipient);
        let account = AccountId::new("0xa");
        client
            .list_transaction_digests(&endpoint(), &account, 5)
            .await
            .unwrap();
        let body = client.transport().last_body.lock().unwrap().clone().unwrap();
        assert_eq!(body["params"][0]["filter"]["ToAddress"], account.as_str());
    }
}
