//! Email-keyed collaborator identity.
//!
//! Room access maps and identity lookups are keyed by email address and
//! nothing else. `EmailAddress::parse` is the boundary that keeps other
//! identifier shapes (provider user ids, display names) out of access
//! checks, where they would silently match nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from parsing an email address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("empty email address")]
    Empty,
    #[error("not an email address: {0}")]
    NotAnEmail(String),
}

/// A validated email address.
///
/// Comparison is exact after trimming. The hosted providers treat
/// access-map keys as opaque strings, so folding case here would merge
/// entries the provider keeps distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses an address, trimming surrounding whitespace.
    ///
    /// Accepts exactly one `@` with non-empty text on both sides and no
    /// interior whitespace. Deliberately no stricter than that: the
    /// identity provider is the authority on which addresses exist.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailError::NotAnEmail(trimmed.to_string()));
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(EmailError::NotAnEmail(trimmed.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EmailAddress {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
