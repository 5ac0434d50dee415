//! Remote ledger endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// One candidate ledger node.
///
/// `priority` is the endpoint's position in the configured list; lower
/// values are tried first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    pub priority: usize,
}

impl Endpoint {
    pub fn new(url: impl Into<String>, priority: usize) -> Self {
        Self {
            url: url.into(),
            priority,
        }
    }

    /// Build an endpoint, requiring an `http://` or `https://` URL.
    pub fn parse(url: &str, priority: usize) -> Result<Self, TypesError> {
        let url = url.trim();
        let has_scheme = url.starts_with("http://") || url.starts_with("https://");
        let has_host = url.split("://").nth(1).is_some_and(|rest| !rest.is_empty());
        if !has_scheme || !has_host {
            return Err(TypesError::InvalidEndpoint(url.to_string()));
        }
        Ok(Self::new(url, priority))
    }

    /// Build the ordered endpoint list from configured URLs.
    pub fn list_from_urls<S: AsRef<str>>(urls: &[S]) -> Result<Vec<Self>, TypesError> {
        urls.iter()
            .enumerate()
            .map(|(priority, url)| Self::parse(url.as_ref(), priority))
            .collect()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.priority, self.url)
    }
}
