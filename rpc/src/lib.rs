//! JSON-RPC client for Sui ledger nodes.
//!
//! Provides:
//! - [`LedgerQueryClient`]: the digest lookup and the batch detail fetch
//!   against one endpoint (no retry logic)
//! - [`RpcTransport`]: the seam between request building and the wire, with
//!   [`HttpTransport`] as the production implementation
//! - Wire decoding of node responses into [`suiscope_types::TransactionDetail`]

pub mod client;
pub mod error;
pub mod transport;
pub mod wire;

pub use client::{DigestLookup, LedgerQueryClient, DEFAULT_LIMIT, MAX_LIMIT};
pub use error::QueryError;
pub use transport::{HttpTransport, RpcTransport, TransportOptions};
pub use wire::{DirectionParseError, QueryDirection};
