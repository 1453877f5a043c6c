//! Mapping from HTTP verbs to access kinds.

use http::Method;

use rolehub_entity::Access;

/// The access kind a request method requires. Unlisted methods map to
/// `None` and are always denied.
pub fn access_for_method(method: &Method) -> Option<Access> {
    match *method {
        Method::GET => Some(Access::Read),
        Method::POST => Some(Access::Create),
        Method::PUT | Method::PATCH => Some(Access::Update),
        Method::DELETE => Some(Access::Delete),
        _ => None,
    }
}
