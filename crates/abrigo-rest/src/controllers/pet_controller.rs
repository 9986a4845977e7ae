//! Pet registration and adoption controller.

use crate::{
    extractors::{AuthenticatedUser, PaginationQuery, ValidatedJson},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use abrigo_core::{AbrigoError, PetId, UserRole};
use abrigo_service::{PetListResponse, PetResponse, RegisterPetsRequest, UpdatePetRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

/// Creates the pet router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pets).post(register_pets))
        .route("/mine", get(list_my_pets))
        .route("/:id", get(get_pet).patch(update_pet).delete(delete_pet))
        .route("/:id/adopt", post(adopt_pet))
}

/// Register a batch of pets owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/pets",
    tag = "pets",
    request_body = RegisterPetsRequest,
    responses(
        (status = 201, description = "Pets registered"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn register_pets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<RegisterPetsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<PetResponse>>>), AppError> {
    debug!("Register pets request: {} entries", request.pets.len());

    let owner_id = user
        .user_id()
        .ok_or_else(|| AppError(AbrigoError::Internal("Missing user ID in token".to_string())))?;

    let response = state.pet_service.register_pets(owner_id, request).await?;
    Ok(created(response))
}

/// List all pets.
#[utoipa::path(
    get,
    path = "/pets",
    tag = "pets",
    responses(
        (status = 200, description = "Paginated pet list", body = PetListResponse)
    )
)]
pub async fn list_pets(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<PetListResponse> {
    debug!("List pets request");

    let response = state.pet_service.list_pets(pagination.into()).await?;
    ok(response)
}

/// List pets registered by the authenticated user.
#[utoipa::path(
    get,
    path = "/pets/mine",
    tag = "pets",
    responses(
        (status = 200, description = "Paginated pet list", body = PetListResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_pets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<PetListResponse> {
    debug!("List own pets request");

    let owner_id = user
        .user_id()
        .ok_or_else(|| AppError(AbrigoError::Internal("Missing user ID in token".to_string())))?;

    let response = state
        .pet_service
        .list_pets_by_owner(owner_id, pagination.into())
        .await?;
    ok(response)
}

/// Get a pet by ID.
#[utoipa::path(
    get,
    path = "/pets/{id}",
    tag = "pets",
    params(("id" = String, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet found", body = PetResponse),
        (status = 400, description = "Malformed pet ID"),
        (status = 404, description = "Unknown pet ID")
    )
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PetResponse> {
    debug!("Get pet request: {}", id);

    let pet_id = parse_pet_id(&id)?;
    let response = state.pet_service.get_pet(pet_id).await?;
    ok(response)
}

/// Update a pet.
#[utoipa::path(
    patch,
    path = "/pets/{id}",
    tag = "pets",
    params(("id" = String, Path, description = "Pet ID")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 400, description = "Validation failed or malformed pet ID"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown pet ID")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_pet(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePetRequest>,
) -> ApiResult<PetResponse> {
    debug!("Update pet request: {}", id);

    let pet_id = parse_pet_id(&id)?;
    require_owner_or_admin(&state, &user, pet_id).await?;

    let response = state.pet_service.update_pet(pet_id, request).await?;
    ok(response)
}

/// Mark a pet as adopted.
#[utoipa::path(
    post,
    path = "/pets/{id}/adopt",
    tag = "pets",
    params(("id" = String, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet adopted", body = PetResponse),
        (status = 400, description = "Malformed pet ID"),
        (status = 404, description = "Unknown pet ID"),
        (status = 409, description = "Pet already adopted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn adopt_pet(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<PetResponse> {
    debug!("Adopt pet request: {}", id);

    let pet_id = parse_pet_id(&id)?;
    let response = state.pet_service.adopt_pet(pet_id).await?;
    ok(response)
}

/// Delete a pet.
#[utoipa::path(
    delete,
    path = "/pets/{id}",
    tag = "pets",
    params(("id" = String, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Pet deleted"),
        (status = 400, description = "Malformed pet ID"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown pet ID")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete pet request: {}", id);

    let pet_id = parse_pet_id(&id)?;
    require_owner_or_admin(&state, &user, pet_id).await?;

    state.pet_service.delete_pet(pet_id).await?;

    Ok(no_content())
}

/// Fails with 403 unless the caller owns the pet or is an admin.
async fn require_owner_or_admin(
    state: &AppState,
    user: &AuthenticatedUser,
    pet_id: PetId,
) -> Result<(), AppError> {
    if user.require_role(UserRole::Admin).is_ok() {
        return Ok(());
    }

    let pet = state.pet_service.get_pet(pet_id).await?;
    if pet.owner_id != user.sub {
        return Err(AppError(AbrigoError::Forbidden(
            "Only the owner can modify this pet".to_string(),
        )));
    }

    Ok(())
}

/// Helper to parse a pet ID from a path parameter.
fn parse_pet_id(id: &str) -> Result<PetId, AppError> {
    PetId::parse(id)
        .map_err(|_| AppError(AbrigoError::Validation(format!("Invalid pet ID: {}", id))))
}
