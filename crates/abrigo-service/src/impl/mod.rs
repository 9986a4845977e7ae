//! Service implementations.

mod pet_service_impl;
mod user_service_impl;

pub use pet_service_impl::*;
pub use user_service_impl::*;
