//! Domain entities.

pub mod pet;
pub mod user;

pub use pet::*;
pub use user::*;
