//! # rolehub-store
//!
//! Data access for RoleHub. The [`traits`] module declares one async trait
//! per table plus the identity provider; [`rest`] and [`identity`] talk to
//! the hosted backend over HTTP, and [`memory`] keeps everything in process
//! for tests and local runs.

pub mod backends;
pub mod identity;
pub mod memory;
pub mod rest;
pub mod traits;

pub use backends::Backends;
pub use traits::{
    AccountStore, IdentityProvider, IdentityUser, ListFilter, PermissionStore,
    RoleAssignmentStore, RoleStore,
};
