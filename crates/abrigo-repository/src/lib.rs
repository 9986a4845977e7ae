//! # Abrigo Repository
//!
//! MongoDB persistence layer for the Abrigo backend. Defines the
//! repository traits used by the service layer and their MongoDB
//! implementations.

pub mod mongo;
pub mod traits;

pub use mongo::*;
pub use traits::*;
