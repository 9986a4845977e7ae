//! Validated JSON extractor for automatic request validation.
//!
//! This module provides a `ValidatedJson<T>` extractor that deserializes JSON
//! and validates it using the `validator` crate. Validation failures are
//! returned as 400 Bad Request with a message naming every offending field.

use abrigo_core::{ErrorResponse, FieldError};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::responses::ApiResponse;

/// JSON extractor that automatically validates the deserialized value.
///
/// Returns 400 Bad Request when the body fails validation. The error
/// message lists each offending field with its problem, so clients can
/// tell exactly which input was rejected.
///
/// # Example
///
/// ```ignore
/// use abrigo_rest::extractors::ValidatedJson;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct RegisterUserRequest {
///     #[validate(length(min = 5, max = 32))]
///     username: String,
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn register(ValidatedJson(request): ValidatedJson<RegisterUserRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Rejection type for validated JSON extraction.
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let error_response = ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: format!("Invalid JSON: {}", rejection),
                    details: None,
                };
                let body = Json(ApiResponse::<()>::error(error_response));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            Self::ValidationError(errors) => {
                let field_errors = convert_validation_errors(&errors);
                let message = field_errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                let error_response = ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message,
                    details: Some(field_errors),
                };
                let body = Json(ApiResponse::<()>::error(error_response));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

/// Convert validator errors to field errors.
fn convert_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors = Vec::new();

    for (field, field_errs) in errors.field_errors() {
        for err in field_errs {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Validation failed for field '{}'", field));

            let code = err.code.to_string();

            field_errors.push(FieldError {
                field: field.to_string(),
                message,
                code,
            });
        }
    }

    // Handle nested struct errors
    for (field, errors_kind) in &errors.0 {
        if let ValidationErrorsKind::Struct(nested) = errors_kind {
            for nested_err in convert_validation_errors(nested.as_ref()) {
                field_errors.push(FieldError {
                    field: format!("{}.{}", field, nested_err.field),
                    message: nested_err.message,
                    code: nested_err.code,
                });
            }
        }
        // Handle list errors (e.g., Vec<T> where T: Validate)
        if let ValidationErrorsKind::List(list_errors) = errors_kind {
            for (index, item_errors) in list_errors {
                for nested_err in convert_validation_errors(item_errors.as_ref()) {
                    field_errors.push(FieldError {
                        field: format!("{}[{}].{}", field, index, nested_err.field),
                        message: nested_err.message,
                        code: nested_err.code,
                    });
                }
            }
        }
    }

    field_errors
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, serde::Serialize, Validate)]
    struct TestRequest {
        #[validate(length(min = 5, message = "name must be at least 5 characters"))]
        name: String,
        #[validate(email(message = "must be a valid email"))]
        email: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct BatchRequest {
        #[validate(length(min = 1))]
        #[validate(nested)]
        items: Vec<TestRequest>,
    }

    #[test]
    fn test_convert_validation_errors_single_field() {
        let req = TestRequest {
            name: "bil".to_string(),
            email: "valid@example.com".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let field_errors = convert_validation_errors(&errors);

        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field, "name");
        assert_eq!(field_errors[0].message, "name must be at least 5 characters");
    }

    #[test]
    fn test_convert_validation_errors_multiple_fields() {
        let req = TestRequest {
            name: "bil".to_string(),
            email: "invalid".to_string(),
        };

        let errors = req.validate().unwrap_err();
        let field_errors = convert_validation_errors(&errors);

        assert_eq!(field_errors.len(), 2);

        let field_names: Vec<&str> = field_errors.iter().map(|e| e.field.as_str()).collect();
        assert!(field_names.contains(&"name"));
        assert!(field_names.contains(&"email"));
    }

    #[test]
    fn test_convert_validation_errors_list_items_carry_index() {
        let req = BatchRequest {
            items: vec![
                TestRequest {
                    name: "valid name".to_string(),
                    email: "valid@example.com".to_string(),
                },
                TestRequest {
                    name: "bil".to_string(),
                    email: "valid@example.com".to_string(),
                },
            ],
        };

        let errors = req.validate().unwrap_err();
        let field_errors = convert_validation_errors(&errors);

        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field, "items[1].name");
    }

    #[test]
    fn test_valid_request_passes() {
        let req = TestRequest {
            name: "valid name".to_string(),
            email: "valid@example.com".to_string(),
        };

        assert!(req.validate().is_ok());
    }
}
