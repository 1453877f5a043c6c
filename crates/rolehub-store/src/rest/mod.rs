//! PostgREST-style client for the hosted store.

pub mod account;
pub mod assignment;
pub mod client;
pub mod error;
pub mod permission;
pub mod query;
pub mod role;
mod rows;

pub use account::RestAccountStore;
pub use assignment::RestAssignmentStore;
pub use client::RestClient;
pub use error::RestError;
pub use permission::RestPermissionStore;
pub use query::{Order, Query};
pub use role::RestRoleStore;
