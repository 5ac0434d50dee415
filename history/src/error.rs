//! History error types.

use std::fmt;
use thiserror::Error;

use suiscope_rpc::QueryError;
use suiscope_types::{AccountId, Endpoint};

/// Which query of an endpoint attempt failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStage {
    DigestLookup,
    DetailFetch,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigestLookup => f.write_str("digest lookup"),
            Self::DetailFetch => f.write_str("detail fetch"),
        }
    }
}

/// One endpoint that was tried and failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointFailure {
    pub endpoint: Endpoint,
    pub stage: QueryStage,
    pub error: QueryError,
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.endpoint.url, self.stage, self.error)
    }
}

/// Terminal outcomes of a history request.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The node answered, but the account has no matching transactions.
    #[error("no transactions found for {account}")]
    EmptyHistory { account: AccountId },

    /// Every configured endpoint failed; one failure per endpoint, in order.
    #[error("all {} ledger endpoints failed", .failures.len())]
    AllEndpointsExhausted { failures: Vec<EndpointFailure> },
}

impl HistoryError {
    /// Message suitable for end users. Transport details stay in the
    /// error's `Display` and in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyHistory { .. } => {
                "No transaction history was found for this address. Try another address."
                    .to_string()
            }
            Self::AllEndpointsExhausted { failures }
                if !failures.is_empty()
                    && failures.iter().all(|f| f.error.is_connection_failure()) =>
            {
                "Could not connect to any ledger node. Please wait a moment and try again."
                    .to_string()
            }
            Self::AllEndpointsExhausted { failures }
                if !failures.is_empty() && failures.iter().all(|f| f.error.is_rate_limited()) =>
            {
                "Every ledger node is rate limiting requests. Please wait a moment and try again."
                    .to_string()
            }
            Self::AllEndpointsExhausted { .. } => {
                "Failed to load transaction history from every ledger node. Please try again later."
                    .to_string()
            }
        }
    }
}
