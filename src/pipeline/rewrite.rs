//! Request path rewriting.
//!
//! # Responsibilities
//! - Strip module name/version segments from request paths (every
//!   occurrence, anywhere in the path)
//! - Derive the end-point name (last non-empty segment)
//! - Flag asset paths (`public`/`views` segments) as exempt from fixture
//!   interception
//!
//! # Design Decisions
//! - Segment comparison is exact and case-sensitive
//! - Empty segments are dropped; a fully stripped path canonicalizes to "/"
//! - The query string never participates in matching and is preserved
//!   verbatim

use axum::body::Body;
use axum::http::uri::PathAndQuery;
use axum::http::{Request, Uri};

use crate::config::schema::ModuleConfig;
use crate::pipeline::{BoxStageFuture, Stage, StageOutcome};

/// Path segment that marks a request as a public asset.
pub const PUBLIC_SEGMENT: &str = "public";

/// Path segment that marks a request as a view asset.
pub const VIEWS_SEGMENT: &str = "views";

/// End-point that always bypasses fixture interception.
pub const HEALTH_CHECK_ENDPOINT: &str = "health-check";

/// Result of rewriting a request path.
///
/// Stored as a request extension so later stages act on the rewriter's
/// decision instead of re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenPath {
    /// Canonical path with module segments removed.
    pub path: String,

    /// Last non-empty segment of the canonical path.
    pub endpoint: Option<String>,

    /// True when the path contains a `public` or `views` segment.
    /// Such requests are rewritten but never fixture-intercepted.
    pub asset_exempt: bool,
}

/// Strip every segment equal to the module name or version and derive the
/// end-point name.
pub fn rewrite_path(path: &str, module: &ModuleConfig) -> RewrittenPath {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| *s != module.name && *s != module.version)
        .collect();

    let asset_exempt = segments
        .iter()
        .any(|s| *s == PUBLIC_SEGMENT || *s == VIEWS_SEGMENT);

    let endpoint = segments.last().map(|s| s.to_string());

    let path = if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    };

    RewrittenPath {
        path,
        endpoint,
        asset_exempt,
    }
}

/// Pipeline stage that rewrites the request URI in place and records the
/// outcome as a request extension. Always continues.
pub struct RewriteStage {
    module: ModuleConfig,
}

impl RewriteStage {
    /// Create a rewrite stage for the given module identity.
    pub fn new(module: ModuleConfig) -> Self {
        Self { module }
    }
}

impl Stage for RewriteStage {
    fn name(&self) -> &'static str {
        "rewrite"
    }

    fn apply(&self, req: Request<Body>) -> BoxStageFuture<'_> {
        Box::pin(async move {
            let (mut parts, body) = req.into_parts();
            let rewritten = rewrite_path(parts.uri.path(), &self.module);

            if rewritten.path != parts.uri.path() {
                tracing::debug!(
                    from = %parts.uri.path(),
                    to = %rewritten.path,
                    "Rewrote request path"
                );
                let path_and_query = match parts.uri.query() {
                    Some(query) => format!("{}?{}", rewritten.path, query),
                    None => rewritten.path.clone(),
                };
                if let Ok(path_and_query) = path_and_query.parse::<PathAndQuery>() {
                    let mut uri_parts = parts.uri.clone().into_parts();
                    uri_parts.path_and_query = Some(path_and_query);
                    parts.uri = Uri::from_parts(uri_parts).unwrap_or_else(|_| parts.uri.clone());
                }
            }

            parts.extensions.insert(rewritten);
            StageOutcome::Continue(Request::from_parts(parts, body))
        })
    }
}
