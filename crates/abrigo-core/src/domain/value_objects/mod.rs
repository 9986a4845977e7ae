//! Value objects.

pub mod address;
pub mod email;
pub mod role;

pub use address::*;
pub use email::*;
pub use role::*;
