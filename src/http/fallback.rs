//! Terminal static file resolver.
//!
//! Requests no route claimed land here. The path is stripped of module
//! segments and of its views fragment, then resolved under the public
//! root. Hits stream from disk; everything else is a plain 404.
//!
//! The views fragment strip is substring-based: any path containing
//! `views` has its first `views/` occurrence removed, so `/previews/x.txt`
//! resolves as `/prex.txt`. Callers relying on `previews`-style names
//! must route them explicitly.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::util::ServiceExt;
use tower_http::services::ServeFile;

use crate::config::schema::ModuleConfig;
use crate::pipeline::rewrite_path;

use super::server::AppState;

const VIEWS_FRAGMENT: &str = "views";

/// Reduce a request path to its location under the public root.
///
/// Module name and version segments are stripped the same way the
/// preprocess rewrite strips them, so the resolver behaves identically
/// whether or not the rewrite already ran.
pub fn resolve_fallback_path(path: &str, module: &ModuleConfig) -> String {
    let stripped = if path.contains(VIEWS_FRAGMENT) {
        path.replacen("views/", "", 1)
    } else {
        path.to_string()
    };
    rewrite_path(&stripped, module).path
}

fn is_traversal(path: &str) -> bool {
    path.split('/').any(|segment| segment == "..")
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Fallback handler serving files from the public root.
pub async fn static_fallback(State(state): State<AppState>, req: Request<Body>) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return not_found();
    }

    let resolved = resolve_fallback_path(req.uri().path(), &state.config.module);
    if is_traversal(&resolved) {
        tracing::warn!(path = %req.uri().path(), "Rejected traversal in fallback path");
        return not_found();
    }

    let full_path = state
        .config
        .static_root()
        .join(resolved.trim_start_matches('/'));

    match tokio::fs::metadata(&full_path).await {
        Ok(meta) if meta.is_file() => {
            tracing::debug!(path = %resolved, "Serving static fallback");
            match ServeFile::new(&full_path).oneshot(req).await {
                Ok(resp) => resp.into_response(),
                Err(infallible) => match infallible {},
            }
        }
        _ => not_found(),
    }
}
