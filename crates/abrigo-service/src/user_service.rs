//! User service trait definition.

use crate::dto::{RegisterUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use abrigo_core::{AbrigoResult, PageRequest, UserId};
use async_trait::async_trait;

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user.
    async fn register_user(&self, request: RegisterUserRequest) -> AbrigoResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> AbrigoResult<UserResponse>;

    /// Lists all users with pagination.
    async fn list_users(&self, page: PageRequest) -> AbrigoResult<UserListResponse>;

    /// Finds users whose username contains the given fragment.
    /// An empty result is a valid answer, not an error.
    async fn find_users_by_name(
        &self,
        name: &str,
        page: PageRequest,
    ) -> AbrigoResult<UserListResponse>;

    /// Updates a user's profile.
    async fn update_user(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> AbrigoResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> AbrigoResult<()>;

    /// Checks if an email exists.
    async fn email_exists(&self, email: &str) -> AbrigoResult<bool>;
}
