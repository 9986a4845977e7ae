//! Data transfer objects for the service layer.

mod auth_dto;
mod pet_dto;
mod user_dto;

pub use auth_dto::*;
pub use pet_dto::*;
pub use user_dto::*;
