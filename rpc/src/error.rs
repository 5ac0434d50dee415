//! Query error types.

use thiserror::Error;

/// Why a query against one endpoint failed.
///
/// Every variant is local to a single endpoint; callers recover by moving
/// on to the next candidate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("node returned HTTP {0}")]
    Status(u16),

    #[error("node error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl QueryError {
    /// Whether the node could not be reached at all (connect error, timeout).
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the node answered with HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Status(429))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_details() {
        let err = QueryError::Rpc {
            code: -32602,
            message: "invalid params".into(),
        };
        assert_eq!(err.to_string(), "node error -32602: invalid params");
        assert_eq!(QueryError::Status(503).to_string(), "node returned HTTP 503");
    }

    #[test]
    fn classifies_failure_kinds() {
        assert!(QueryError::Transport("timeout".into()).is_connection_failure());
        assert!(!QueryError::Status(500).is_connection_failure());
        assert!(QueryError::Status(429).is_rate_limited());
        assert!(!QueryError::Malformed("x".into()).is_rate_limited());
    }
}
