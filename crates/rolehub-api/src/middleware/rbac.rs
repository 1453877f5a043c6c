//! Module authorization middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use rolehub_auth::{AuthContext, AuthorizationGate};
use rolehub_entity::Module;

use crate::error::ApiError;

type GuardFuture = Pin<Box<dyn Future<Output = Result<Response, ApiError>> + Send>>;

/// Build a middleware that lets a request through only when the caller's
/// role grants the request's verb on `module`.
///
/// Must run after [`require_auth`](super::require_auth). The permission that
/// allowed the request is attached to the request extensions.
pub fn require_module(
    gate: Arc<AuthorizationGate>,
    module: Module,
) -> impl Fn(Request, Next) -> GuardFuture + Clone + Send + Sync + 'static {
    move |mut req: Request, next: Next| {
        let gate = Arc::clone(&gate);
        Box::pin(async move {
            let ctx = req.extensions().get::<AuthContext>().cloned();
            let method = req.method().clone();

            let permission = gate.authorize(ctx.as_ref(), module, &method).await?;

            req.extensions_mut().insert(permission);
            Ok(next.run(req).await)
        })
    }
}
