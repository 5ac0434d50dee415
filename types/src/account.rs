//! Account and transaction identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// Identifies the ledger account whose history is inspected.
///
/// The identifier is opaque to the rest of the workspace. It is trimmed and
/// lower-cased on construction, and a `0x` hex address is left-padded to its
/// full 64-digit form, so that owners reported by the node compare equal to
/// user-supplied input regardless of casing or short-form notation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Number of hex digits in a full-length address.
    pub const ADDRESS_HEX_LEN: usize = 64;

    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw.as_ref().trim().to_ascii_lowercase();
        match normalized.strip_prefix("0x") {
            Some(digits)
                if !digits.is_empty()
                    && digits.len() < Self::ADDRESS_HEX_LEN
                    && digits.bytes().all(|b| b.is_ascii_hexdigit()) =>
            {
                Self(format!("0x{digits:0>width$}", width = Self::ADDRESS_HEX_LEN))
            }
            _ => Self(normalized),
        }
    }

    /// Like [`AccountId::new`], but rejects blank input.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let account = Self::new(raw);
        if account.0.is_empty() {
            return Err(TypesError::EmptyAccount);
        }
        Ok(account)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of one transaction, as returned by the digest lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDigest(String);

impl TransactionDigest {
    /// Number of leading characters kept by [`TransactionDigest::short`].
    pub const SHORT_LEN: usize = 10;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for tabular display, e.g. `"4uWbD2ZzMc..."`.
    pub fn short(&self) -> String {
        match self.0.char_indices().nth(Self::SHORT_LEN) {
            Some((idx, _)) => format!("{}...", &self.0[..idx]),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_is_trimmed_and_lowercased() {
        let account = AccountId::new("  0xABcd  ");
        assert!(account.as_str().ends_with("abcd"));
        assert_eq!(account, AccountId::new("0xabcd"));
    }

    #[test]
    fn short_form_address_matches_full_form() {
        let full = format!("0x{}2a", "0".repeat(62));
        let short = AccountId::new("0x2A");
        assert_eq!(short.as_str(), full);
        assert_eq!(short, AccountId::new(&full));
        assert_eq!(short.as_str().len(), 2 + AccountId::ADDRESS_HEX_LEN);
    }

    #[test]
    fn non_hex_identifiers_are_kept_as_is() {
        assert_eq!(AccountId::new("alice.sui").as_str(), "alice.sui");
        assert_eq!(AccountId::new("0x").as_str(), "0x");
        assert_eq!(AccountId::new("0xzz").as_str(), "0xzz");
    }

    #[test]
    fn blank_account_is_rejected() {
        assert_eq!(AccountId::parse("   "), Err(TypesError::EmptyAccount));
        assert!(AccountId::parse("0x1").is_ok());
    }

    #[test]
    fn short_digest_truncates_long_values() {
        let digest = TransactionDigest::new("4uWbD2ZzMcQx9kL1");
        assert_eq!(digest.short(), "4uWbD2ZzMc...");
    }

    #[test]
    fn short_digest_keeps_short_values() {
        let digest = TransactionDigest::new("abc");
        assert_eq!(digest.short(), "abc");
    }
}
