//! Cookie Middleware.
//! Parses the Cookie header once and attaches the jar as an extension.

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

pub async fn cookie_middleware(mut req: Request<Body>, next: Next) -> impl IntoResponse {
    let jar = CookieJar::from_headers(req.headers());
    req.extensions_mut().insert(jar);
    next.run(req).await
}
