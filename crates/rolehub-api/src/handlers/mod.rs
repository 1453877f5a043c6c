//! Route handlers organized by domain.

pub mod assignment;
pub mod me;
pub mod permission;
pub mod role;
pub mod root;
pub mod user;
