//! Request identity.
//!
//! # Responsibilities
//! - Assign every request a UUID, honoring one supplied by the caller
//! - Expose the ID to handlers through a request extension
//! - Echo the ID back on the response for client-side correlation
//!
//! # Design Decisions
//! - The ID is attached as the outermost application concern so every
//!   log line and stage sees it
//! - An unparsable inbound ID is replaced, not rejected

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::Request;
use axum::response::Response;
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Identity assigned to a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

/// Access to the request ID from a request.
pub trait RequestIdExt {
    /// The ID attached by [`RequestIdLayer`], if the layer ran.
    fn request_id(&self) -> Option<Uuid>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<Uuid> {
        self.extensions().get::<RequestId>().map(|id| id.0)
    }
}

/// Layer attaching [`RequestIdService`] to a stack.
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Middleware that stamps requests and responses with an ID.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(RequestId(id));
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            req.headers_mut()
                .insert(HeaderName::from_static(X_REQUEST_ID), value);
        }

        // Swap a clone in so the owned service drives the future.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(X_REQUEST_ID), value);
            }
            Ok(response)
        })
    }
}
