//! Authentication DTOs.

use crate::dto::UserResponse;
use abrigo_core::validation::rules;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request. The identifier may be a username or an email address.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "rules::not_blank", message = "identifier must not be blank"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Refresh token request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refreshToken must not be empty"))]
    pub refresh_token: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_at: i64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_valid() {
        let request = LoginRequest {
            identifier: "bill@email.com".to_string(),
            password: "12345678".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_request_blank_identifier() {
        let request = LoginRequest {
            identifier: "  ".to_string(),
            password: "12345678".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_empty_password() {
        let request = LoginRequest {
            identifier: "bill@email.com".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_refresh_request_wire_name() {
        let parsed: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken":"abc"}"#).unwrap();
        assert_eq!(parsed.refresh_token, "abc");
    }
}
