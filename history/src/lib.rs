//! Transaction history for a Sui account.
//!
//! [`TransactionHistoryService`] drives an [`EndpointResolver`] over an
//! ordered list of ledger nodes (strictly one at a time, first success wins),
//! then classifies every fetched transaction. Progress is reported through a
//! [`StatusObserver`] so that presentation stays outside the core.

pub mod config;
pub mod error;
pub mod resolver;
pub mod service;
pub mod status;

pub use config::{ConfigError, HistoryConfig};
pub use error::{EndpointFailure, HistoryError, QueryStage};
pub use resolver::{EndpointResolver, Resolution};
pub use service::{HistoryReport, TransactionHistoryService};
pub use status::{HistoryStatus, NullObserver, StatusObserver, TracingObserver};
