//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with application routes, asset mount, fallback
//! - Wire up middleware (request ID, CORS, security headers, body limit,
//!   cookies, preprocess pipeline, tracing)
//! - Bind server to listener and drain connections on shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::schema::AppConfig;
use crate::http::fallback::static_fallback;
use crate::http::middleware::{cookie_middleware, preprocess_middleware};
use crate::http::request::RequestIdLayer;
use crate::pipeline::{FixtureStage, Pipeline, RewriteStage};
use crate::security;
use crate::views::{ViewEngine, ViewError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<Pipeline>,
    pub views: Arc<ViewEngine>,
}

/// HTTP server for the bootstrapped application.
pub struct HttpServer {
    router: Router,
    config: Arc<AppConfig>,
}

impl HttpServer {
    /// Create a new HTTP server from configuration and application routes.
    pub fn new(config: AppConfig, app_routes: Router<AppState>) -> Result<Self, ViewError> {
        let views = Arc::new(ViewEngine::new(&config)?);

        // Stage order matters: the rewrite must run before fixtures so
        // fixture lookups see canonical endpoints.
        let pipeline = Arc::new(
            Pipeline::new()
                .with_stage(RewriteStage::new(config.module.clone()))
                .with_stage(FixtureStage::new(&config)),
        );

        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            pipeline,
            views,
        };

        let router = Self::build_router(&config, state, app_routes);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers apply bottom-up to requests: the last layer added sees the
    /// request first, so tracing is outermost and the preprocess pipeline
    /// runs right before routing.
    fn build_router(config: &AppConfig, state: AppState, app_routes: Router<AppState>) -> Router {
        let mut router = app_routes
            .nest_service("/public", ServeDir::new(config.static_root()))
            .fallback(static_fallback)
            .with_state(state.clone())
            .layer(middleware::from_fn_with_state(state, preprocess_middleware))
            .layer(middleware::from_fn(cookie_middleware))
            .layer(RequestBodyLimitLayer::new(config.uploads.max_body_bytes));

        for (name, value) in security::response_headers() {
            router = router.layer(SetResponseHeaderLayer::overriding(name, value));
        }

        router
            .layer(CorsLayer::permissive())
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            module = %self.config.module.name,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
