//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! bootstrap layer. All types derive Serde traits for deserialization from
//! config files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the bootstrap layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Runtime environment. Selects the default view suffix.
    pub environment: Environment,

    /// Base directory for the filesystem conventions
    /// (`data/`, `views/`, `public/`).
    pub app_root: PathBuf,

    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Module identity stripped from request paths.
    pub module: ModuleConfig,

    /// Static-fixture interception settings.
    pub fixtures: FixtureConfig,

    /// View rendering settings.
    pub views: ViewConfig,

    /// Request body handling.
    pub uploads: UploadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            app_root: PathBuf::from("."),
            server: ServerConfig::default(),
            module: ModuleConfig::default(),
            fixtures: FixtureConfig::default(),
            views: ViewConfig::default(),
            uploads: UploadConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Socket address string for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Directory holding JSON fixture files.
    pub fn data_dir(&self) -> PathBuf {
        self.app_root.join("data")
    }

    /// Directory holding view templates.
    pub fn views_dir(&self) -> PathBuf {
        self.app_root.join("views")
    }

    /// Root directory for static assets, also the target of the
    /// `views/` alias in the fallback resolver.
    pub fn static_root(&self) -> PathBuf {
        self.app_root.join("public")
    }

    /// Suffix appended to resolved view names.
    ///
    /// An explicit `views.suffix` wins; otherwise the environment decides
    /// (`.dev.html` in development, `.html` in production).
    pub fn view_suffix(&self) -> String {
        match &self.views.suffix {
            Some(suffix) => suffix.clone(),
            None => match self.environment {
                Environment::Development => ".dev.html".to_string(),
                Environment::Production => ".html".to_string(),
            },
        }
    }

    /// Blend caller-supplied overrides into this configuration.
    ///
    /// This is the only mutation path and runs once during assembly,
    /// before the server accepts its first request. Fields left `None`
    /// keep the loaded value.
    pub fn blend(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
        if let Some(app_root) = overrides.app_root {
            self.app_root = app_root;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(name) = overrides.module_name {
            self.module.name = name;
        }
        if let Some(version) = overrides.module_version {
            self.module.version = version;
        }
        if let Some(enabled) = overrides.fixtures_enabled {
            self.fixtures.enabled = enabled;
        }
        if let Some(suffix) = overrides.view_suffix {
            self.views.suffix = Some(suffix);
        }
        self
    }
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development mode. View names resolve with the `.dev.html` suffix.
    #[default]
    #[serde(alias = "dev")]
    Development,

    /// Production mode. View names resolve with the `.html` suffix.
    #[serde(alias = "prod")]
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Module identity.
///
/// Incoming request paths may carry these as segments (deployment prefix
/// convention); the rewriter removes every occurrence before routing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Module name segment.
    pub name: String,

    /// Module version segment.
    pub version: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: "plinth-app".to_string(),
            version: "V0".to_string(),
        }
    }
}

/// Static-fixture interception configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FixtureConfig {
    /// Answer requests from `data/<endpoint>.json` instead of routes.
    pub enabled: bool,
}

/// View rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ViewConfig {
    /// Explicit view suffix. Overrides the environment-derived default.
    pub suffix: Option<String>,
}

/// Request body handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Keep uploaded files in memory instead of spooling to disk.
    /// Surfaced to embedding applications; the bootstrap only reads it.
    pub in_memory: bool,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            in_memory: false,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when RUST_LOG is unset.
    pub log_level: String,

    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Address for the metrics exporter listener.
    pub metrics_address: String,

    /// Log-shipping token for the hosting platform. Carried for
    /// deployment tooling; never logged.
    pub log_token: Option<String>,

    /// Log-shipping dataset name.
    pub log_dataset: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "plinth=debug,tower_http=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
            log_token: None,
            log_dataset: None,
        }
    }
}

/// Caller-supplied configuration overrides.
///
/// Blended into the loaded configuration exactly once, during assembly.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub environment: Option<Environment>,
    pub app_root: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub module_name: Option<String>,
    pub module_version: Option<String>,
    pub fixtures_enabled: Option<bool>,
    pub view_suffix: Option<String>,
}
