//! Shared domain types used across crates.

pub mod id;
pub mod pagination;

pub use id::{AccountId, AssignmentId, AuthUserId, PermissionId, RoleId};
pub use pagination::{Page, PageRequest};
