//! Node reply fixtures shaped like a Sui full node's JSON-RPC output.

use serde_json::{json, Value};

/// A `suix_queryTransactionBlocks` reply listing `digests`.
pub fn digest_page(digests: &[&str]) -> Value {
    let data: Vec<Value> = digests.iter().map(|d| json!({ "digest": d })).collect();
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "data": data,
            "nextCursor": digests.last(),
            "hasNextPage": false,
        }
    })
}

/// A digest lookup reply with no transactions.
pub fn empty_digest_page() -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "result": { "data": [] } })
}

/// A JSON-RPC error reply.
pub fn rpc_error(code: i64, message: &str) -> Value {
    json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": code, "message": message } })
}

/// Builder for one `sui_getTransactionBlock` result payload.
#[derive(Clone, Debug)]
pub struct TransactionPayload {
    digest: String,
    timestamp_ms: Option<u64>,
    gas: (u64, u64, u64),
    balance_changes: Vec<Value>,
}

impl TransactionPayload {
    pub fn new(digest: &str) -> Self {
        Self {
            digest: digest.to_string(),
            timestamp_ms: Some(1_700_000_000_000),
            gas: (750_000, 1_976_000, 978_120),
            balance_changes: Vec::new(),
        }
    }

    pub fn timestamp_ms(mut self, timestamp_ms: Option<u64>) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn gas(mut self, computation: u64, storage: u64, rebate: u64) -> Self {
        self.gas = (computation, storage, rebate);
        self
    }

    /// Add a balance change owned by an address.
    pub fn change(mut self, owner: &str, coin_type: &str, amount: i128) -> Self {
        self.balance_changes.push(json!({
            "owner": { "AddressOwner": owner },
            "coinType": coin_type,
            "amount": amount.to_string(),
        }));
        self
    }

    pub fn build(&self) -> Value {
        let (computation, storage, rebate) = self.gas;
        let mut payload = json!({
            "digest": self.digest,
            "transaction": { "data": { "sender": null } },
            "effects": {
                "status": { "status": "success" },
                "gasUsed": {
                    "computationCost": computation.to_string(),
                    "storageCost": storage.to_string(),
                    "storageRebate": rebate.to_string(),
                    "nonRefundableStorageFee": "0",
                },
            },
            "events": [],
            "balanceChanges": self.balance_changes,
        });
        if let Some(ts) = self.timestamp_ms {
            payload["timestampMs"] = json!(ts.to_string());
        }
        payload
    }
}

/// A batch reply: one entry per slot, echoing ids `1..=n`. `None` slots
/// carry a "not found" error instead of a result.
pub fn detail_batch(slots: &[Option<TransactionPayload>]) -> Value {
    let entries: Vec<Value> = slots
        .iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(payload) => json!({ "jsonrpc": "2.0", "id": i + 1, "result": payload.build() }),
            None => json!({
                "jsonrpc": "2.0",
                "id": i + 1,
                "error": { "code": -32602, "message": "Could not find the referenced transaction" },
            }),
        })
        .collect();
    Value::Array(entries)
}
