//! Shared utilities for integration tests.

use std::path::Path;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tempfile::TempDir;

use plinth::config::AppConfig;
use plinth::http::{AppState, HttpServer, PipelineResult};
use plinth::lifecycle::Shutdown;

/// A running application bound to an ephemeral port.
pub struct TestApp {
    pub address: String,
    #[allow(dead_code)]
    pub root: TempDir,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    /// Stop accepting connections and drain.
    #[allow(dead_code)]
    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Routes mirroring the binary's surface, plus an echo for body tests.
fn demo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(render_index))
        .route("/health-check", get(|| async { "OK" }))
        .route("/echo", post(|body: String| async move { body }))
}

async fn render_index(State(state): State<AppState>) -> PipelineResult<Html<String>> {
    let mut ctx = tera::Context::new();
    ctx.insert("module", &state.config.module.name);
    Ok(Html(state.views.render("index.html", &ctx)?))
}

/// Spawn the server over a fresh application root.
///
/// The closure runs before startup with the root path and the config, so
/// tests can seed views or flip settings. Views are parsed at startup;
/// fixture and public files may be written at any point.
pub async fn spawn_app(prepare: impl FnOnce(&Path, &mut AppConfig)) -> TestApp {
    let root = tempfile::tempdir().unwrap();
    for dir in ["data", "public", "views"] {
        std::fs::create_dir_all(root.path().join(dir)).unwrap();
    }

    let mut config = AppConfig::default();
    config.app_root = root.path().to_path_buf();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    prepare(root.path(), &mut config);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config, demo_routes()).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    TestApp {
        address,
        root,
        shutdown,
    }
}

/// Write a file under the application root, creating parent directories.
#[allow(dead_code)]
pub fn write_under(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Client without connection pooling, for test stability.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
