//! Plinth application server.
//!
//! A convention-driven HTTP bootstrap built with Tokio and Axum: module
//! prefixes are stripped from request paths, fixtures can stand in for
//! unbuilt handlers, views render with environment suffixes, and anything
//! unrouted falls back to the public asset root.
//!
//! # Architecture Overview
//!
//! ```text
//! Client Request
//!     │
//!     ▼
//! ┌─────────┐    ┌─────────────────────┐    ┌─────────────┐
//! │  http   │───▶│ preprocess pipeline │───▶│   routed    │
//! │ server  │    │ rewrite → fixtures  │    │  handlers   │
//! └─────────┘    └──────────┬──────────┘    └──────┬──────┘
//!                           │ short-circuit       │ no match
//!                           ▼                     ▼
//!                       Response ◀──────── fallback (public root)
//!
//! Cross-cutting: config, views, observability, security, lifecycle
//! ```
//!
//! # Features
//!
//! - Module-aware path rewriting (name and version segments stripped)
//! - Fixture responses for prototyping without handlers
//! - Environment-suffixed view rendering
//! - Static fallback from the public root
//! - Request IDs, security headers, CORS, body limits, structured logs

use std::path::PathBuf;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;

use plinth::config::{load_config, ConfigOverrides, Environment};
use plinth::http::{AppState, HttpServer, PipelineResult};
use plinth::lifecycle::{shutdown_signal, Shutdown};
use plinth::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "plinth", version, about = "Convention-driven HTTP application server")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "PLINTH_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host override.
    #[arg(long)]
    host: Option<String>,

    /// Bind port override.
    #[arg(long)]
    port: Option<u16>,

    /// Application root holding data/, views/ and public/.
    #[arg(long)]
    app_root: Option<PathBuf>,

    /// Force fixture responses on or off.
    #[arg(long)]
    fixtures: Option<bool>,

    /// Runtime environment (development or production).
    #[arg(long)]
    environment: Option<Environment>,
}

/// Application routes served behind the preprocess pipeline.
fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(render_index))
        .route("/health-check", get(|| async { "OK" }))
}

/// Landing page rendered through the view engine.
async fn render_index(State(state): State<AppState>) -> PipelineResult<Html<String>> {
    let mut ctx = tera::Context::new();
    ctx.insert("module", &state.config.module.name);
    Ok(Html(state.views.render("index.html", &ctx)?))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let overrides = ConfigOverrides {
        environment: args.environment,
        app_root: args.app_root,
        host: args.host,
        port: args.port,
        fixtures_enabled: args.fixtures,
        ..ConfigOverrides::default()
    };
    let config = load_config(args.config.as_deref(), overrides)?;

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        module = %config.module.name,
        module_version = %config.module.version,
        environment = %config.environment,
        "plinth starting"
    );

    if let Some(dataset) = &config.observability.log_dataset {
        tracing::info!(dataset = %dataset, "Log shipping configured");
    }

    // Metrics exporter runs on its own listener when enabled.
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            plinth::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, routes())?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
