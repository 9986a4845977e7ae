//! User service implementation.

use crate::dto::{RegisterUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::user_service::UserService;
use abrigo_core::{AbrigoError, AbrigoResult, Email, PageRequest, User, UserId, ValidateExt};
use abrigo_repository::UserRepository;
use abrigo_security::PasswordHasher;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// User service implementation.
pub struct UserServiceImpl<R: UserRepository> {
    user_repository: Arc<R>,
    password_hasher: Arc<PasswordHasher>,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>, password_hasher: Arc<PasswordHasher>) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn register_user(&self, request: RegisterUserRequest) -> AbrigoResult<UserResponse> {
        debug!("Registering user: {}", request.username);

        request.validate_request()?;

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(AbrigoError::Conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        if self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AbrigoError::Conflict(format!(
                "userName '{}' already exists",
                request.username
            )));
        }

        let email =
            Email::new(&request.email).map_err(|e| AbrigoError::Validation(e.to_string()))?;

        let password_hash = self.password_hasher.hash(&request.password)?;

        let user = User::new(
            request.username,
            email,
            password_hash,
            request.cpf,
            request.phone,
            request.address.into(),
        );

        let saved_user = self.user_repository.save(&user).await?;

        info!("User registered: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn get_user(&self, id: UserId) -> AbrigoResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AbrigoError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }

    async fn list_users(&self, page: PageRequest) -> AbrigoResult<UserListResponse> {
        debug!("Listing users, page: {}, size: {}", page.page, page.size);

        let users = self.user_repository.find_all(page).await?;
        Ok(UserListResponse::from(users))
    }

    async fn find_users_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> AbrigoResult<UserListResponse> {
        debug!("Finding users by name: {}", name);

        let users = self
            .user_repository
            .find_by_username_matching(name, page)
            .await?;
        Ok(UserListResponse::from(users))
    }

    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> AbrigoResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AbrigoError::not_found("User", id))?;

        let email = match &request.email {
            Some(raw) => {
                let email =
                    Email::new(raw).map_err(|e| AbrigoError::Validation(e.to_string()))?;
                if email != user.email && self.user_repository.exists_by_email(email.as_str()).await?
                {
                    return Err(AbrigoError::Conflict(format!(
                        "Email '{}' already exists",
                        email
                    )));
                }
                Some(email)
            }
            None => None,
        };

        user.apply_update(
            request.username,
            email,
            request.phone,
            request.address.map(Into::into),
        );

        let updated_user = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, id: UserId) -> AbrigoResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self.user_repository.delete(id).await?;

        if !deleted {
            return Err(AbrigoError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> AbrigoResult<bool> {
        self.user_repository.exists_by_email(email).await
    }
}

impl<R: UserRepository> std::fmt::Debug for UserServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
