//! Fundamental types for suiscope.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, transaction digests, endpoints, balance changes, gas usage,
//! classified transactions, and the fixed-scale amount formatter.

pub mod account;
pub mod amount;
pub mod endpoint;
pub mod error;
pub mod time;
pub mod transaction;

pub use account::{AccountId, TransactionDigest};
pub use amount::{
    asset_label, format_amount, format_gas, format_magnitude, is_native_asset, FormattedAmount,
};
pub use endpoint::Endpoint;
pub use error::TypesError;
pub use time::format_timestamp_ms;
pub use transaction::{
    summarize, BalanceChange, Category, ClassifiedTransaction, GasUsage, TransactionDetail,
    EMPTY_MARKER,
};
