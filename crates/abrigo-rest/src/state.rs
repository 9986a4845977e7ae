//! Application state for Axum handlers.

use abrigo_service::{AuthService, PetService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub pet_service: Arc<dyn PetService>,
    pub auth_service: Arc<dyn AuthService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        pet_service: Arc<dyn PetService>,
        auth_service: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            user_service,
            pet_service,
            auth_service,
        }
    }
}
