//! Bearer-token identity verification.

pub mod bearer;
pub mod verifier;

pub use bearer::extract_bearer;
pub use verifier::IdentityVerifier;
