//! # rolehub-entity
//!
//! Domain entity models for RoleHub. Every struct in this crate is either
//! a typed store record or a write payload for one. Serialized field names
//! are the store's column names.

pub mod account;
pub mod assignment;
pub mod module;
pub mod permission;
pub mod role;

pub use account::{Account, AccountPatch, AccountWithRole, NewAccount};
pub use assignment::RoleAssignment;
pub use module::Module;
pub use permission::{Access, Permission, PermissionFlags, PermissionGrant};
pub use role::{NewRole, Role, RoleName, RolePatch};
