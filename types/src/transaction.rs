//! Transaction details as fetched from the node, and their classified form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::{AccountId, TransactionDigest};

/// Marker displayed for an empty outgoing/incoming column.
pub const EMPTY_MARKER: &str = "---";

/// Block explorer used for transaction links.
pub const EXPLORER_TX_URL: &str = "https://suiscan.xyz/mainnet/tx/";

/// Net change of one asset for one owner within one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    /// Address owner, or `None` for object-owned, shared, or immutable owners.
    pub owner: Option<AccountId>,
    pub asset_type: String,
    /// Negative = decrease, positive = increase.
    pub raw_amount: i128,
}

impl BalanceChange {
    pub fn new(owner: AccountId, asset_type: impl Into<String>, raw_amount: i128) -> Self {
        Self {
            owner: Some(owner),
            asset_type: asset_type.into(),
            raw_amount,
        }
    }

    pub fn is_owned_by(&self, account: &AccountId) -> bool {
        self.owner.as_ref() == Some(account)
    }
}

/// Gas charged for one transaction, in raw native units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasUsage {
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
}

impl GasUsage {
    pub fn new(computation_cost: u64, storage_cost: u64, storage_rebate: u64) -> Self {
        Self {
            computation_cost,
            storage_cost,
            storage_rebate,
        }
    }

    /// `computation + storage - rebate`, floored at zero.
    pub fn net_cost(&self) -> u64 {
        self.computation_cost
            .saturating_add(self.storage_cost)
            .saturating_sub(self.storage_rebate)
    }
}

/// One transaction's reported effects, as decoded from a detail query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub digest: TransactionDigest,
    pub timestamp_ms: Option<u64>,
    pub gas: GasUsage,
    pub balance_changes: Vec<BalanceChange>,
}

/// Semantic category inferred from balance deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The account both lost and gained assets.
    Swap,
    /// The account only lost assets.
    Send,
    /// The account only gained assets.
    Receive,
    /// Only the native asset decreased, by at least one whole unit.
    SuiSend,
    /// Only the native asset decreased, by less than one unit (gas only).
    ContractExecution,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "Swap",
            Self::Send => "Send",
            Self::Receive => "Receive",
            Self::SuiSend => "SUI Send",
            Self::ContractExecution => "Contract Execution",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction after classification, ready for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub digest: TransactionDigest,
    /// Formatted timestamp, or `"unknown"`.
    pub timestamp: String,
    pub category: Category,
    /// Every outgoing amount, in reported order (e.g. `"5.0000 COIN"`).
    pub outgoing: Vec<String>,
    /// Every incoming amount, in reported order.
    pub incoming: Vec<String>,
    /// Net gas cost with six fractional digits.
    pub gas_cost: String,
}

impl ClassifiedTransaction {
    pub fn outgoing_summary(&self) -> String {
        summarize(&self.outgoing)
    }

    pub fn incoming_summary(&self) -> String {
        summarize(&self.incoming)
    }

    pub fn explorer_url(&self) -> String {
        format!("{EXPLORER_TX_URL}{}", self.digest)
    }
}

/// First entry plus a `+N more` suffix for the remainder, or [`EMPTY_MARKER`].
pub fn summarize(items: &[String]) -> String {
    match items {
        [] => EMPTY_MARKER.to_string(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{first} +{} more", rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_cost_subtracts_rebate() {
        let gas = GasUsage::new(1_000_000, 2_000_000, 500_000);
        assert_eq!(gas.net_cost(), 2_500_000);
    }

    #[test]
    fn net_cost_floors_at_zero() {
        let gas = GasUsage::new(100, 100, 10_000);
        assert_eq!(gas.net_cost(), 0);
    }

    #[test]
    fn net_cost_saturates_on_overflow() {
        let gas = GasUsage::new(u64::MAX, u64::MAX, 0);
        assert_eq!(gas.net_cost(), u64::MAX);
    }

    #[test]
    fn summary_counts_remaining_entries() {
        let items = vec![
            "1.0000 A".to_string(),
            "2.0000 B".to_string(),
            "3.0000 C".to_string(),
        ];
        assert_eq!(summarize(&items), "1.0000 A +2 more");
        assert_eq!(summarize(&items[..1]), "1.0000 A");
        assert_eq!(summarize(&[]), EMPTY_MARKER);
    }

    #[test]
    fn ownership_ignores_non_address_owners() {
        let account = AccountId::new("0xa");
        let owned = BalanceChange::new(account.clone(), "0x2::sui::SUI", -1);
        let shared = BalanceChange {
            owner: None,
            asset_type: "0x2::sui::SUI".into(),
            raw_amount: -1,
        };
        assert!(owned.is_owned_by(&account));
        assert!(!shared.is_owned_by(&account));
    }

    #[test]
    fn explorer_url_embeds_digest() {
        let tx = ClassifiedTransaction {
            digest: TransactionDigest::new("Dig3st"),
            timestamp: "unknown".into(),
            category: Category::Other,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            gas_cost: "0.000000".into(),
        };
        assert_eq!(tx.explorer_url(), "https://suiscan.xyz/mainnet/tx/Dig3st");
        assert_eq!(tx.outgoing_summary(), EMPTY_MARKER);
    }
}
