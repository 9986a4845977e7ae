//! # Abrigo Service
//!
//! Business logic service layer for the Abrigo backend.
//! Contains use cases and application services.

pub mod auth_service;
pub mod dto;
pub mod pet_service;
pub mod user_service;

mod r#impl;

pub use auth_service::*;
pub use dto::*;
pub use pet_service::*;
pub use r#impl::*;
pub use user_service::*;
