//! Fixture short-circuit stage.
//!
//! # Responsibilities
//! - Answer GET requests from `data/<endpoint>.json` when a fixture exists
//! - Answer POST with 201 and PUT/DELETE with 204, no file check
//! - Leave exempted asset paths, `health-check`, and other methods alone
//!
//! # Design Decisions
//! - Fixtures are re-read from disk on every hit; no cache layer
//! - A missing or malformed fixture is a miss for that request only,
//!   never fatal to the process
//! - Runs after the rewrite stage and acts on its recorded outcome;
//!   without that extension the stage passes through

use std::io::ErrorKind;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::config::schema::AppConfig;
use crate::pipeline::rewrite::{RewrittenPath, HEALTH_CHECK_ENDPOINT};
use crate::pipeline::{BoxStageFuture, Stage, StageOutcome};

/// On-demand loader for JSON fixture documents.
pub struct FixtureStore {
    data_dir: PathBuf,
}

impl FixtureStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Load and parse `<data_dir>/<endpoint>.json`.
    ///
    /// Every failure (absent, unreadable, malformed) is a miss for this
    /// request; the only process-visible side effect is a log line.
    pub async fn load(&self, endpoint: &str) -> Option<Value> {
        let path = self.data_dir.join(format!("{endpoint}.json"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(endpoint = %endpoint, "No fixture file");
                return None;
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "Fixture read failed");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "Malformed fixture file");
                None
            }
        }
    }
}

/// Pipeline stage that answers requests from static fixtures instead of
/// invoking downstream routes.
pub struct FixtureStage {
    enabled: bool,
    store: FixtureStore,
}

impl FixtureStage {
    /// Create a fixture stage from the application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            enabled: config.fixtures.enabled,
            store: FixtureStore::new(config.data_dir()),
        }
    }
}

impl Stage for FixtureStage {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    fn apply(&self, req: Request<Body>) -> BoxStageFuture<'_> {
        Box::pin(async move {
            if !self.enabled {
                return StageOutcome::Continue(req);
            }

            let Some(rewritten) = req.extensions().get::<RewrittenPath>().cloned() else {
                return StageOutcome::Continue(req);
            };
            if rewritten.asset_exempt {
                return StageOutcome::Continue(req);
            }
            let Some(endpoint) = rewritten.endpoint else {
                return StageOutcome::Continue(req);
            };
            if endpoint == HEALTH_CHECK_ENDPOINT {
                return StageOutcome::Continue(req);
            }

            let method = req.method().clone();
            if method == Method::GET {
                match self.store.load(&endpoint).await {
                    Some(body) => {
                        tracing::debug!(endpoint = %endpoint, "Fixture hit");
                        StageOutcome::Respond(Json(body).into_response())
                    }
                    None => StageOutcome::Continue(req),
                }
            } else if method == Method::POST {
                StageOutcome::Respond(StatusCode::CREATED.into_response())
            } else if method == Method::PUT || method == Method::DELETE {
                StageOutcome::Respond(StatusCode::NO_CONTENT.into_response())
            } else {
                StageOutcome::Continue(req)
            }
        })
    }
}
