//! Role-based access control over modules and HTTP verbs.

pub mod gate;
pub mod resolver;
pub mod verb;

pub use gate::AuthorizationGate;
pub use resolver::PermissionResolver;
pub use verb::access_for_method;
