//! Validation errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("account identifier is empty")]
    EmptyAccount,

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}
