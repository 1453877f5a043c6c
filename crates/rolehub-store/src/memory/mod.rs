//! In-process backends for tests and local runs.

pub mod identity;
pub mod store;

pub use identity::MemoryIdentityProvider;
pub use store::MemoryStore;
