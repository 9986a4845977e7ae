//! User management controller.

use crate::{
    extractors::{AuthenticatedUser, PaginationQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use abrigo_core::{AbrigoError, UserId, UserRole};
use abrigo_service::{RegisterUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

/// Query parameters for the user listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    /// Username fragment to search for.
    pub name: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl UserListQuery {
    fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            size: self.size,
        }
    }
}

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route(
            "/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Register user request: {}", request.username);

    let response = state.user_service.register_user(request).await?;
    Ok(created(response))
}

/// List users. With `?name=` any authenticated user can search by
/// username fragment; the unfiltered listing is admin only.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(("name" = Option<String>, Query, description = "Username fragment to search for")),
    responses(
        (status = 200, description = "Paginated user list", body = UserListResponse),
        (status = 403, description = "Unfiltered listing requires admin role")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<UserListQuery>,
) -> ApiResult<UserListResponse> {
    debug!("List users request");

    let page = query.pagination().into();

    let response = match &query.name {
        Some(name) => state.user_service.find_users_by_name(name, page).await?,
        None => {
            user.require_role(UserRole::Admin)?;
            state.user_service.list_users(page).await?
        }
    };
    ok(response)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "Unknown user ID")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;

    let response = state.user_service.get_user(user_id).await?;
    ok(response)
}

/// Update a user's profile.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation failed or malformed user ID"),
        (status = 404, description = "Unknown user ID"),
        (status = 409, description = "Email already registered")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;

    // Users can update themselves, admins can update anyone
    let current_user_id = user
        .user_id()
        .ok_or_else(|| AppError(AbrigoError::Internal("Missing user ID in token".to_string())))?;

    if current_user_id != user_id {
        user.require_role(UserRole::Admin)?;
    }

    let response = state.user_service.update_user(user_id, request).await?;
    ok(response)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "Unknown user ID")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;

    // Users can delete themselves, admins can delete anyone
    let current_user_id = user
        .user_id()
        .ok_or_else(|| AppError(AbrigoError::Internal("Missing user ID in token".to_string())))?;

    if current_user_id != user_id {
        user.require_role(UserRole::Admin)?;
    }

    state.user_service.delete_user(user_id).await?;

    Ok(no_content())
}

/// Helper to parse a user ID from a path parameter.
fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(AbrigoError::Validation(format!("Invalid user ID: {}", id))))
}
