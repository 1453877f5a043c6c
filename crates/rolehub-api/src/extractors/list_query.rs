//! Lenient list query extractor.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use rolehub_core::types::PageRequest;
use rolehub_store::ListFilter;

#[derive(Debug, Default, Deserialize)]
struct RawListParams {
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    estado: Option<String>,
}

/// `?page&limit&search&estado` parsed into a [`ListFilter`].
///
/// Never rejects: unusable values fall back to their defaults.
#[derive(Debug, Clone)]
pub struct ListQuery(pub ListFilter);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = Query::<RawListParams>::try_from_uri(&parts.uri)
            .map(|Query(raw)| raw)
            .unwrap_or_default();
        Ok(Self(raw.into_filter()))
    }
}

impl RawListParams {
    fn into_filter(self) -> ListFilter {
        ListFilter {
            page: PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref()),
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            active: self.estado.as_deref().and_then(parse_bool),
        }
    }
}

/// `true` / `false`, case-insensitive. Anything else is ignored.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(uri: &str) -> ListFilter {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        let ListQuery(filter) = ListQuery::from_request_parts(&mut parts, &()).await.unwrap();
        filter
    }

    #[tokio::test]
    async fn test_defaults() {
        let filter = extract("/api/users").await;
        assert_eq!(filter.page, PageRequest::default());
        assert!(filter.search.is_none());
        assert!(filter.active.is_none());
    }

    #[tokio::test]
    async fn test_parses_and_normalizes() {
        let filter = extract("/api/users?page=2.7&limit=500&search=%20ana%20&estado=FALSE").await;
        assert_eq!(filter.page.page, 2);
        assert_eq!(filter.page.limit, 100);
        assert_eq!(filter.search.as_deref(), Some("ana"));
        assert_eq!(filter.active, Some(false));
    }

    #[tokio::test]
    async fn test_garbage_is_ignored() {
        let filter = extract("/api/roles?page=-1&limit=abc&search=%20%20&estado=maybe").await;
        assert_eq!(filter.page, PageRequest::default());
        assert!(filter.search.is_none());
        assert!(filter.active.is_none());
    }
}
