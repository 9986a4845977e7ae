//! Email value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;

/// Error type for email validation.
#[derive(Debug, Error)]
#[error("Invalid email address: {0}")]
pub struct EmailError(String);

/// Email value object with validation.
///
/// Addresses are trimmed and lowercased on construction, so two emails
/// differing only in case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new Email after validating the format.
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();

        if !email.validate_email() {
            return Err(EmailError(email));
        }

        Ok(Self(email))
    }

    /// Creates a new Email without validation.
    ///
    /// Only for data from trusted sources like the database where the
    /// address was already validated on write.
    #[must_use]
    pub fn new_unchecked(email: impl Into<String>) -> Self {
        Self(email.into().trim().to_lowercase())
    }

    /// Returns the email as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::new("bill@email.com").unwrap();
        assert_eq!(email.as_str(), "bill@email.com");
    }

    #[test]
    fn test_email_normalization() {
        let email = Email::new("  BILL@EMAIL.COM  ").unwrap();
        assert_eq!(email.as_str(), "bill@email.com");
    }

    #[test]
    fn test_invalid_email() {
        assert!(Email::new("bill.com").is_err());
        assert!(Email::new("@email.com").is_err());
        assert!(Email::new("bill@").is_err());
    }

    #[test]
    fn test_email_equality_case_insensitive() {
        let email1 = Email::new("bill@email.com").unwrap();
        let email2 = Email::new("BILL@EMAIL.COM").unwrap();
        assert_eq!(email1, email2);
    }

    #[test]
    fn test_email_serialization() {
        let email = Email::new("bill@email.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"bill@email.com\"");
        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }

    #[test]
    fn test_email_deserialization_invalid() {
        assert!(serde_json::from_str::<Email>("\"not-an-email\"").is_err());
    }

    #[test]
    fn test_email_new_unchecked() {
        let email = Email::new_unchecked("  UPPER@DOMAIN.COM  ");
        assert_eq!(email.as_str(), "upper@domain.com");
    }
}
