//! # rolehub-service
//!
//! Business logic for RoleHub. Services validate input, enforce the
//! uniqueness and referential guards, and run the multi-step account flows
//! as compensating sagas.

pub mod account;
pub mod assignment;
pub mod permission;
pub mod profile;
pub mod role;
pub mod saga;

pub use account::{AccountService, CreateAccountInput, UpdateAccountInput};
pub use assignment::AssignmentService;
pub use permission::PermissionService;
pub use profile::{Profile, ProfileService};
pub use role::{CreateRoleInput, RoleService, UpdateRoleInput};
pub use saga::Saga;
