//! JWT claims extractor.

use crate::responses::ApiResponse;
use abrigo_core::{AbrigoError, ErrorResponse, UserRole};
use abrigo_security::Claims;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Extractor for authenticated user claims.
///
/// The auth middleware validates the bearer token and stores the claims in
/// the request extensions; this extractor surfaces them to handlers and
/// rejects with 401 when they are absent.
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AuthenticatedUser {
    /// Fails with 403 unless the claims carry at least the given role.
    pub fn require_role(&self, role: UserRole) -> Result<(), AbrigoError> {
        if self.0.role.has_permission(role) {
            Ok(())
        } else {
            Err(AbrigoError::Forbidden(format!(
                "Requires {} role",
                role
            )))
        }
    }
}

/// Error type for authentication extraction.
pub struct AuthError(AbrigoError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::<()>::error(error_response));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AuthError(AbrigoError::Unauthorized(
                    "Missing authorization header".to_string(),
                ))
            })?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AuthError(AbrigoError::Unauthorized(
                "Invalid authorization format".to_string(),
            )));
        }

        // Claims in extensions mean the middleware accepted the token.
        let claims = parts.extensions.get::<Claims>().cloned().ok_or_else(|| {
            AuthError(AbrigoError::Unauthorized(
                "Invalid or expired token".to_string(),
            ))
        })?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Optional authenticated user extractor.
///
/// Returns `None` if no valid token is present, instead of failing.
pub struct OptionalUser(pub Option<Claims>);

impl std::ops::Deref for OptionalUser {
    type Target = Option<Claims>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts.extensions.get::<Claims>().cloned();
        Ok(OptionalUser(claims))
    }
}
