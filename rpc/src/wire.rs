//! JSON-RPC request bodies and lenient decoding of node responses.
//!
//! Decoding never fails on missing or non-numeric fields: they default to
//! zero or absent. Only a structurally wrong envelope (not an object, not an
//! array for a batch) is reported as [`QueryError::Malformed`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use suiscope_types::{AccountId, BalanceChange, GasUsage, TransactionDetail, TransactionDigest};

use crate::error::QueryError;

pub const QUERY_TRANSACTIONS_METHOD: &str = "suix_queryTransactionBlocks";
pub const GET_TRANSACTION_METHOD: &str = "sui_getTransactionBlock";

/// Which side of a transaction the inspected account must be on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryDirection {
    /// Transactions the account sent.
    #[default]
    Sender,
    /// Transactions addressed to the account.
    Recipient,
}

impl QueryDirection {
    fn filter_key(&self) -> &'static str {
        match self {
            Self::Sender => "FromAddress",
            Self::Recipient => "ToAddress",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown query direction {0:?} (expected \"sender\" or \"recipient\")")]
pub struct DirectionParseError(String);

impl FromStr for QueryDirection {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sender" | "from" => Ok(Self::Sender),
            "recipient" | "to" => Ok(Self::Recipient),
            other => Err(DirectionParseError(other.to_string())),
        }
    }
}

impl fmt::Display for QueryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sender => f.write_str("sender"),
            Self::Recipient => f.write_str("recipient"),
        }
    }
}

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: &'static str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "jsonrpc": self.jsonrpc,
            "id": self.id,
            "method": self.method,
            "params": self.params,
        })
    }
}

/// The digest lookup: most recent `limit` transactions, newest first.
pub fn digest_query(
    account: &AccountId,
    limit: usize,
    direction: QueryDirection,
) -> JsonRpcRequest {
    JsonRpcRequest::new(
        1,
        QUERY_TRANSACTIONS_METHOD,
        json!([
            {
                "filter": { (direction.filter_key()): account.as_str() },
                "options": null,
            },
            null,
            limit,
            true,
        ]),
    )
}

/// One detail sub-request per digest. Ids start at 1 and follow input order.
pub fn detail_batch(digests: &[TransactionDigest]) -> Vec<JsonRpcRequest> {
    digests
        .iter()
        .enumerate()
        .map(|(i, digest)| {
            JsonRpcRequest::new(
                batch_id(i),
                GET_TRANSACTION_METHOD,
                json!([
                    digest.as_str(),
                    {
                        "showInput": true,
                        "showEffects": true,
                        "showEvents": true,
                        "showBalanceChanges": true,
                    },
                ]),
            )
        })
        .collect()
}

fn batch_id(index: usize) -> u64 {
    index as u64 + 1
}

// ── Envelopes ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

impl From<RpcErrorObject> for QueryError {
    fn from(e: RpcErrorObject) -> Self {
        QueryError::Rpc {
            code: e.code,
            message: e.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DigestPage {
    #[serde(default)]
    data: Option<Vec<DigestEntry>>,
}

#[derive(Debug, Deserialize)]
struct DigestEntry {
    digest: String,
}

/// Decode a digest lookup reply. `Ok(vec![])` means the node reported no
/// matching transactions.
pub fn parse_digest_page(body: Value) -> Result<Vec<TransactionDigest>, QueryError> {
    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| QueryError::Malformed(format!("digest lookup envelope: {e}")))?;

    if let Some(error) = envelope.error {
        return Err(error.into());
    }
    let result = envelope
        .result
        .ok_or_else(|| QueryError::Malformed("digest lookup has no result".into()))?;

    let page: DigestPage = serde_json::from_value(result)
        .map_err(|e| QueryError::Malformed(format!("digest lookup page: {e}")))?;

    Ok(page
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|entry| TransactionDigest::new(entry.digest))
        .collect())
}

/// Decode a batch detail reply into one slot per requested digest.
///
/// Replies are matched on the echoed request id; when the node echoes no
/// ids, by position. A slot is `None` when its reply is missing, carries an
/// error, or has no usable `result` payload.
pub fn parse_detail_batch(
    body: Value,
    digests: &[TransactionDigest],
) -> Result<Vec<Option<TransactionDetail>>, QueryError> {
    let replies = match body {
        Value::Array(replies) => replies,
        Value::Object(_) => {
            // A node that rejects the whole batch answers with one error object.
            let envelope: Envelope = serde_json::from_value(body)
                .map_err(|e| QueryError::Malformed(format!("batch reply: {e}")))?;
            return Err(match envelope.error {
                Some(error) => error.into(),
                None => QueryError::Malformed("batch reply is not an array".into()),
            });
        }
        _ => return Err(QueryError::Malformed("batch reply is not an array".into())),
    };

    let envelopes: Vec<Option<Envelope>> = replies
        .into_iter()
        .map(|reply| serde_json::from_value(reply).ok())
        .collect();

    let mut by_id: HashMap<u64, usize> = HashMap::new();
    for (position, envelope) in envelopes.iter().enumerate() {
        let id = envelope
            .as_ref()
            .and_then(|e| e.id.as_ref())
            .and_then(Value::as_u64);
        if let Some(id) = id {
            by_id.entry(id).or_insert(position);
        }
    }

    let slots = digests
        .iter()
        .enumerate()
        .map(|(i, digest)| {
            let position = if by_id.is_empty() {
                Some(i)
            } else {
                by_id.get(&batch_id(i)).copied()
            };
            position
                .and_then(|p| envelopes.get(p))
                .and_then(Option::as_ref)
                .and_then(|envelope| envelope.result.as_ref())
                .and_then(|payload| decode_detail(payload, digest))
        })
        .collect();
    Ok(slots)
}

// ── Transaction payload ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TransactionBlock {
    #[serde(deserialize_with = "lenient")]
    digest: Option<String>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    timestamp_ms: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    effects: Option<Effects>,
    #[serde(deserialize_with = "lenient_seq")]
    balance_changes: Vec<WireBalanceChange>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Effects {
    #[serde(deserialize_with = "lenient")]
    gas_used: Option<GasUsed>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    timestamp_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GasUsed {
    #[serde(deserialize_with = "lenient_u64")]
    computation_cost: u64,
    #[serde(deserialize_with = "lenient_u64")]
    storage_cost: u64,
    #[serde(deserialize_with = "lenient_u64")]
    storage_rebate: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WireBalanceChange {
    owner: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    coin_type: String,
    #[serde(deserialize_with = "lenient_i128")]
    amount: i128,
}

/// Decode one `sui_getTransactionBlock` result. Returns `None` when the
/// payload is not a transaction object.
pub fn decode_detail(
    payload: &Value,
    requested: &TransactionDigest,
) -> Option<TransactionDetail> {
    if !payload.is_object() {
        return None;
    }
    let block: TransactionBlock = match serde_json::from_value(payload.clone()) {
        Ok(block) => block,
        Err(e) => {
            tracing::debug!(digest = %requested, error = %e, "unusable transaction payload");
            return None;
        }
    };

    let effects = block.effects.unwrap_or_default();
    let gas = effects
        .gas_used
        .map(|g| GasUsage::new(g.computation_cost, g.storage_cost, g.storage_rebate))
        .unwrap_or_default();

    let balance_changes = block
        .balance_changes
        .into_iter()
        .map(|change| BalanceChange {
            owner: change.owner.as_ref().and_then(address_owner),
            asset_type: change.coin_type,
            raw_amount: change.amount,
        })
        .collect();

    Some(TransactionDetail {
        digest: block
            .digest
            .map(TransactionDigest::new)
            .unwrap_or_else(|| requested.clone()),
        timestamp_ms: block.timestamp_ms.or(effects.timestamp_ms),
        gas,
        balance_changes,
    })
}

/// `{"AddressOwner": "0x.."}` or a bare address string. Object, shared, and
/// immutable owners have no account.
fn address_owner(owner: &Value) -> Option<AccountId> {
    match owner {
        Value::String(address) => Some(AccountId::new(address)),
        Value::Object(map) => map
            .get("AddressOwner")
            .and_then(Value::as_str)
            .map(AccountId::new),
        _ => None,
    }
}

fn lenient_number<T>(value: &Value) -> Option<T>
where
    T: std::str::FromStr + TryFrom<i64> + TryFrom<u64>,
{
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| T::try_from(v).ok())
            .or_else(|| n.as_i64().and_then(|v| T::try_from(v).ok())),
        _ => None,
    }
}

/// Any value that does not decode as `T` becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the array entries that decode as `T`; anything else is empty.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(entries
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).unwrap_or(0))
}

fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value))
}

fn lenient_i128<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).unwrap_or(0))
}
