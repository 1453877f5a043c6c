//! Identity provider clients.

pub mod gotrue;

pub use gotrue::GoTrueIdentityProvider;
