//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the REST API.

use abrigo_core::{ErrorResponse, FieldError, UserRole};
use abrigo_service::{
    AddressDto, LocationDto, LoginRequest, PetInput, PetListResponse, PetResponse,
    RefreshTokenRequest, RegisterPetsRequest, RegisterUserRequest, TokenResponse,
    UpdatePetRequest, UpdateUserRequest, UserListResponse, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Abrigo API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Abrigo API",
        version = "1.0.0",
        description = "RESTful API for the Abrigo pet adoption platform",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Auth endpoints
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::refresh_token,
        crate::controllers::auth_controller::get_current_user,
        // User endpoints
        crate::controllers::user_controller::register_user,
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        // Pet endpoints
        crate::controllers::pet_controller::register_pets,
        crate::controllers::pet_controller::list_pets,
        crate::controllers::pet_controller::list_my_pets,
        crate::controllers::pet_controller::get_pet,
        crate::controllers::pet_controller::update_pet,
        crate::controllers::pet_controller::adopt_pet,
        crate::controllers::pet_controller::delete_pet,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            UserRole,
            ErrorResponse,
            FieldError,
            // Auth DTOs
            LoginRequest,
            RefreshTokenRequest,
            TokenResponse,
            // User DTOs
            RegisterUserRequest,
            UpdateUserRequest,
            AddressDto,
            LocationDto,
            UserResponse,
            UserListResponse,
            // Pet DTOs
            RegisterPetsRequest,
            PetInput,
            UpdatePetRequest,
            PetResponse,
            PetListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "pets", description = "Pet registration and adoption endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}
