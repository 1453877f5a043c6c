//! Custom Axum extractors.

pub mod json;
pub mod list_query;
pub mod path;

pub use json::{ApiJson, ValidatedJson};
pub use list_query::ListQuery;
pub use path::{parse_id, parse_module};
