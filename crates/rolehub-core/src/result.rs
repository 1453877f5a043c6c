//! Convenience result type alias for RoleHub.

use crate::error::AppError;

/// A specialized `Result` type for RoleHub operations.
pub type AppResult<T> = Result<T, AppError>;
