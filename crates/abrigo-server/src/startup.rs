//! Server startup utilities and dependency wiring.

use abrigo_config::SecurityConfig;
use abrigo_repository::{MongoDatabase, MongoPetRepository, MongoUserRepository};
use abrigo_rest::AppState;
use abrigo_security::{PasswordHasher, TokenProvider};
use abrigo_service::{AuthServiceImpl, PetServiceImpl, UserServiceImpl};
use std::sync::Arc;
use tracing::info;

/// Builds the application state and token provider from a connected database.
pub fn build_state(
    database: &MongoDatabase,
    security_config: SecurityConfig,
) -> (AppState, Arc<TokenProvider>) {
    let user_repository = Arc::new(MongoUserRepository::new(database));
    let pet_repository = Arc::new(MongoPetRepository::new(database));

    let password_hasher = Arc::new(PasswordHasher::new());
    let token_provider = Arc::new(TokenProvider::new(Arc::new(security_config)));

    let user_service = Arc::new(UserServiceImpl::new(
        user_repository.clone(),
        password_hasher.clone(),
    ));
    let pet_service = Arc::new(PetServiceImpl::new(pet_repository));
    let auth_service = Arc::new(AuthServiceImpl::new(
        user_repository,
        password_hasher,
        token_provider.clone(),
    ));

    let state = AppState::new(user_service, pet_service, auth_service);
    (state, token_provider)
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
    ___    __         _
   /   |  / /_  _____(_)___ _____
  / /| | / __ \/ ___/ / __ `/ __ \
 / ___ |/ /_/ / /  / / /_/ / /_/ /
/_/  |_/_.___/_/  /_/\__, /\____/
                    /____/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(host: &str, port: u16) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}:{}/api/v1", host, port);
    info!("Health:    http://{}:{}/health", host, port);
    info!("API Docs:  http://{}:{}/swagger-ui", host, port);
    info!("{}", separator);
}
