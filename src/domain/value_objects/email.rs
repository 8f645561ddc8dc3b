//! Email address value object
//!
//! Addresses are compared case-insensitively and without surrounding
//! whitespace, so the normalized form is what gets stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why an address string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    Empty,
    MissingAt(String),
    Malformed(String),
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailError::Empty => write!(f, "empty email address"),
            EmailError::MissingAt(raw) => write!(f, "'{}' has no '@'", raw),
            EmailError::Malformed(raw) => write!(f, "'{}' is not a valid email address", raw),
        }
    }
}

impl std::error::Error for EmailError {}

/// A normalized (trimmed, lower-cased) email address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and normalize an address
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }

        let normalized = trimmed.to_lowercase();
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(EmailError::MissingAt(trimmed.to_string()));
        };

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(EmailError::Malformed(trimmed.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after '@'
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EmailAddress {
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

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_lowercases() {
        let email = EmailAddress::parse("  Alice@Example.COM \t").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn parse_rejects_empty_and_missing_at() {
        assert_eq!(EmailAddress::parse("   "), Err(EmailError::Empty));
        assert!(matches!(
            EmailAddress::parse("nobody"),
            Err(EmailError::MissingAt(_))
        ));
    }

    #[test]
    fn parse_rejects_malformed() {
        for raw in ["@example.com", "alice@", "a@b@c.com", "a b@c.com"] {
            assert!(
                matches!(EmailAddress::parse(raw), Err(EmailError::Malformed(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn equal_after_normalization() {
        let a: EmailAddress = "Bob@X.com".parse().unwrap();
        let b: EmailAddress = " bob@x.com".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_uses_normalized_string() {
        let email: EmailAddress = serde_json::from_str(r#"" Carol@Y.org ""#).unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), r#""carol@y.org""#);
    }
}
