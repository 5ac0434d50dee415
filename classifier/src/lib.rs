//! Transaction classification for suiscope.
//!
//! Infers the economic meaning of a transaction (swap, send, receive, plain
//! SUI transfer, contract execution) from the balance deltas the node reports
//! for the inspected account. Classification is pure and never fails.

pub mod classify;
pub mod deltas;

pub use classify::{classify, classify_all};
pub use deltas::BalanceDeltas;
