//! Nullable infrastructure for deterministic testing.
//!
//! The ledger node is abstracted behind [`suiscope_rpc::RpcTransport`]. This
//! crate provides a test-friendly implementation that:
//! - Returns scripted replies per endpoint URL
//! - Records every request so tests can assert what was (not) sent
//! - Never touches the network
//!
//! Usage: swap [`suiscope_rpc::HttpTransport`] for [`NullTransport`] in tests.

pub mod replies;
pub mod transport;

pub use transport::{NullTransport, RecordedRequest};
