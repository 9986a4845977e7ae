//! Validation utilities.

use crate::{AbrigoError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns an `AbrigoError` on failure.
    fn validate_request(&self) -> Result<(), AbrigoError> {
        self.validate().map_err(validation_errors_to_abrigo_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `AbrigoError`.
///
/// The resulting message names each offending field so clients can tell
/// which part of the payload was rejected.
#[must_use]
pub fn validation_errors_to_abrigo_error(errors: ValidationErrors) -> AbrigoError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    AbrigoError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a username meets requirements.
    pub fn valid_username(username: &str) -> Result<(), ValidationError> {
        if username.len() < 5 {
            return Err(ValidationError::new("username_too_short"));
        }
        if username.len() > 32 {
            return Err(ValidationError::new("username_too_long"));
        }
        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ')
        {
            return Err(ValidationError::new("username_invalid_characters"));
        }
        Ok(())
    }

    /// Validates a Brazilian CPF in the `000.000.000-00` format.
    pub fn valid_cpf(cpf: &str) -> Result<(), ValidationError> {
        let bytes = cpf.as_bytes();
        if bytes.len() != 14 {
            return Err(ValidationError::new("cpf_invalid_format"));
        }
        for (i, b) in bytes.iter().enumerate() {
            let ok = match i {
                3 | 7 => *b == b'.',
                11 => *b == b'-',
                _ => b.is_ascii_digit(),
            };
            if !ok {
                return Err(ValidationError::new("cpf_invalid_format"));
            }
        }
        Ok(())
    }

    /// Validates a Brazilian phone number in the `(00) 00000-0000` format.
    /// The local part may have 4 or 5 leading digits.
    pub fn valid_br_phone(phone: &str) -> Result<(), ValidationError> {
        let rest = phone
            .strip_prefix('(')
            .ok_or_else(|| ValidationError::new("phone_invalid_format"))?;

        let (area, rest) = rest
            .split_once(')')
            .ok_or_else(|| ValidationError::new("phone_invalid_format"))?;
        if area.len() != 2 || !area.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::new("phone_invalid_format"));
        }

        let rest = rest.trim_start_matches(' ');
        let (prefix, suffix) = rest
            .split_once('-')
            .ok_or_else(|| ValidationError::new("phone_invalid_format"))?;
        if !(4..=5).contains(&prefix.len())
            || suffix.len() != 4
            || !prefix.bytes().all(|b| b.is_ascii_digit())
            || !suffix.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::new("phone_invalid_format"));
        }
        Ok(())
    }
}
