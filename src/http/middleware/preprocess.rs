//! Preprocess Middleware.
//! Runs the stage pipeline ahead of routing and records the outcome.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::pipeline::StageOutcome;

pub async fn preprocess_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let start = Instant::now();
    let method = req.method().clone();

    // 1. Run every registered stage; a stage may answer outright.
    let response = match state.pipeline.run(req).await {
        StageOutcome::Respond(response) => response,
        // 2. Nothing short-circuited, hand the rewritten request to routing.
        StageOutcome::Continue(req) => next.run(req).await,
    };

    // 3. One chokepoint sees every response, routed or fallback alike.
    metrics::record_request(method.as_str(), response.status().as_u16(), start);

    response
}
