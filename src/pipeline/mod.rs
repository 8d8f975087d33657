//! Request preprocessing pipeline.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → rewrite.rs (strip module segments, derive end-point)
//!     → fixtures.rs (optional short-circuit response)
//!     → Continue(request) handed to the application router
//!       or Respond(response) returned immediately
//! ```
//!
//! # Design Decisions
//! - Stages are an explicit ordered list run by Pipeline::run; no
//!   implicit "next" callback chaining
//! - A stage either transforms the request and continues, or produces
//!   the terminal response; the first response wins
//! - Stages receive their slice of the immutable config at construction

pub mod fixtures;
pub mod rewrite;

use std::future::Future;
use std::pin::Pin;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

pub use fixtures::{FixtureStage, FixtureStore};
pub use rewrite::{rewrite_path, RewriteStage, RewrittenPath};

/// Boxed future returned by [`Stage::apply`].
pub type BoxStageFuture<'a> = Pin<Box<dyn Future<Output = StageOutcome> + Send + 'a>>;

/// Outcome of applying a single stage to a request.
pub enum StageOutcome {
    /// Hand the (possibly transformed) request to the next stage.
    Continue(Request<Body>),

    /// Terminate the pipeline with this response.
    Respond(Response),
}

/// A single preprocessing stage.
pub trait Stage: Send + Sync {
    /// Stage name for logs.
    fn name(&self) -> &'static str;

    /// Apply this stage to the request.
    fn apply(&self, req: Request<Body>) -> BoxStageFuture<'_>;
}

/// Explicit ordered pipeline of preprocessing stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage. Stages run in insertion order.
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage in order.
    ///
    /// The first stage that responds terminates the pipeline; when all
    /// stages continue, the final request is handed back for downstream
    /// routing.
    pub async fn run(&self, mut req: Request<Body>) -> StageOutcome {
        for stage in &self.stages {
            match stage.apply(req).await {
                StageOutcome::Continue(next) => req = next,
                StageOutcome::Respond(response) => {
                    tracing::debug!(
                        stage = stage.name(),
                        status = response.status().as_u16(),
                        "Pipeline stage responded"
                    );
                    return StageOutcome::Respond(response);
                }
            }
        }
        StageOutcome::Continue(req)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
