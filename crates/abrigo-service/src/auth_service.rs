//! Authentication service.

use crate::dto::{LoginRequest, RefreshTokenRequest, TokenResponse, UserResponse};
use abrigo_core::{AbrigoError, AbrigoResult, ValidateExt};
use abrigo_repository::UserRepository;
use abrigo_security::{Claims, PasswordHasher, TokenProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates a user and issues a token pair.
    async fn login(&self, request: LoginRequest) -> AbrigoResult<TokenResponse>;

    /// Issues a new token pair from a refresh token.
    async fn refresh_token(&self, request: RefreshTokenRequest) -> AbrigoResult<TokenResponse>;

    /// Resolves the profile behind a set of validated claims.
    async fn current_user(&self, claims: &Claims) -> AbrigoResult<UserResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
    token_provider: Arc<TokenProvider>,
}

impl<R: UserRepository> AuthServiceImpl<R> {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<R>,
        password_hasher: Arc<PasswordHasher>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> AuthService for AuthServiceImpl<R> {
    async fn login(&self, request: LoginRequest) -> AbrigoResult<TokenResponse> {
        debug!("Login attempt for identifier: {}", request.identifier);

        request.validate_request()?;

        // An unknown identifier and a wrong password both answer
        // InvalidCredentials so callers cannot probe for accounts.
        let user = self
            .user_repository
            .find_by_username_or_email(&request.identifier)
            .await?
            .ok_or(AbrigoError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&request.password, &user.password_hash)?
        {
            warn!("Failed login for user: {}", user.id);
            return Err(AbrigoError::InvalidCredentials);
        }

        let tokens = self.token_provider.generate_tokens(
            user.id,
            &user.username,
            user.email.as_str(),
            user.role,
        )?;

        info!("User logged in: {}", user.id);

        Ok(TokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_at: tokens.access_expires_at,
            user: UserResponse::from(user),
        })
    }

    async fn refresh_token(&self, request: RefreshTokenRequest) -> AbrigoResult<TokenResponse> {
        request.validate_request()?;

        let claims = self
            .token_provider
            .validate_refresh_token(&request.refresh_token)?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| AbrigoError::InvalidToken("Refresh token missing user ID".to_string()))?;

        // The user may have been deleted since the token was issued.
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AbrigoError::InvalidToken("Unknown user".to_string()))?;

        let tokens = self.token_provider.generate_tokens(
            user.id,
            &user.username,
            user.email.as_str(),
            user.role,
        )?;

        debug!("Tokens refreshed for user: {}", user.id);

        Ok(TokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_at: tokens.access_expires_at,
            user: UserResponse::from(user),
        })
    }

    async fn current_user(&self, claims: &Claims) -> AbrigoResult<UserResponse> {
        let user_id = claims
            .user_id()
            .ok_or_else(|| AbrigoError::InvalidToken("Token missing user ID".to_string()))?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AbrigoError::not_found("User", user_id))?;

        Ok(UserResponse::from(user))
    }
}

impl<R: UserRepository> std::fmt::Debug for AuthServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}
