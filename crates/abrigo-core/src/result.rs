//! Result type aliases for Abrigo.

use crate::AbrigoError;

/// A specialized `Result` type for Abrigo operations.
pub type AbrigoResult<T> = Result<T, AbrigoError>;
