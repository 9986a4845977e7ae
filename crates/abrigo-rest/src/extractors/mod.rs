//! Custom Axum extractors.

mod claims;
mod pagination;
mod validated;

pub use claims::*;
pub use pagination::*;
pub use validated::*;
