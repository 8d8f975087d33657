//! View rendering with environment-dependent suffixes.
//!
//! # Responsibilities
//! - Load every template under the configured views directory
//! - Resolve requested view names against the environment suffix
//! - Delegate rendering to the template engine, propagating its errors
//!
//! # Design Decisions
//! - The engine is the application's render entry point; the template
//!   library is wrapped, never patched
//! - Name resolution discards the fragment after the last `.`; a dotless
//!   name is kept whole
//! - Templates are parsed once at construction and shared read-only

use std::sync::Arc;

use tera::{Context, Tera};
use thiserror::Error;

use crate::config::schema::AppConfig;

/// Error type for view operations.
#[derive(Debug, Error)]
pub enum ViewError {
    /// The resolved view has no matching template.
    #[error("view not found: {0}")]
    NotFound(String),

    /// Loading or parsing the template directory failed.
    #[error("view engine init failed: {0}")]
    Init(String),

    /// Rendering failed.
    #[error("render failed: {0}")]
    Render(String),
}

impl From<tera::Error> for ViewError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Replace a view name's extension-like suffix with the configured one.
///
/// `index.special` with suffix `.dev.html` resolves to `index.dev.html`.
pub fn resolve_view_name(view: &str, suffix: &str) -> String {
    let stem = match view.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => view,
    };
    format!("{stem}{suffix}")
}

/// Render entry point wrapping the template engine.
pub struct ViewEngine {
    tera: Arc<Tera>,
    suffix: String,
}

impl ViewEngine {
    /// Parse every template under the configured views directory.
    ///
    /// An absent directory yields an engine with no templates; rendering
    /// against it surfaces a not-found error per view.
    pub fn new(config: &AppConfig) -> Result<Self, ViewError> {
        let pattern = format!("{}/**/*", config.views_dir().display());
        let tera = Tera::new(&pattern).map_err(|e| ViewError::Init(e.to_string()))?;

        tracing::debug!(
            templates = tera.get_template_names().count(),
            suffix = %config.view_suffix(),
            "View engine ready"
        );

        Ok(Self {
            tera: Arc::new(tera),
            suffix: config.view_suffix(),
        })
    }

    /// Render a view after resolving its name against the suffix.
    ///
    /// Engine errors are propagated, never swallowed.
    pub fn render(&self, view: &str, ctx: &Context) -> Result<String, ViewError> {
        let resolved = resolve_view_name(view, &self.suffix);
        tracing::debug!(view = %view, resolved = %resolved, "Rendering view");
        Ok(self.tera.render(&resolved, ctx)?)
    }

    /// The suffix applied to resolved view names.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Environment;

    fn engine_over(root: &std::path::Path, environment: Environment) -> ViewEngine {
        let mut config = AppConfig::default();
        config.app_root = root.to_path_buf();
        config.environment = environment;
        ViewEngine::new(&config).unwrap()
    }

    fn write_view(root: &std::path::Path, name: &str, contents: &str) {
        let views_dir = root.join("views");
        std::fs::create_dir_all(&views_dir).unwrap();
        std::fs::write(views_dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_resolve_discards_extension_fragment() {
        assert_eq!(
            resolve_view_name("index.special", ".dev.html"),
            "index.dev.html"
        );
        assert_eq!(resolve_view_name("index.html", ".html"), "index.html");
        assert_eq!(
            resolve_view_name("admin.panel.widget", ".html"),
            "admin.panel.html"
        );
    }

    #[test]
    fn test_resolve_keeps_dotless_names_whole() {
        assert_eq!(resolve_view_name("index", ".dev.html"), "index.dev.html");
    }

    #[test]
    fn test_render_delegates_with_resolved_name() {
        let dir = tempfile::tempdir().unwrap();
        write_view(dir.path(), "index.dev.html", "Hello {{ name }}!");
        let engine = engine_over(dir.path(), Environment::Development);

        let mut ctx = Context::new();
        ctx.insert("name", "plinth");
        // "index.special" must reach the engine as "index.dev.html".
        let rendered = engine.render("index.special", &ctx).unwrap();
        assert_eq!(rendered, "Hello plinth!");
    }

    #[test]
    fn test_production_suffix_selects_other_template() {
        let dir = tempfile::tempdir().unwrap();
        write_view(dir.path(), "index.html", "prod");
        write_view(dir.path(), "index.dev.html", "dev");

        let engine = engine_over(dir.path(), Environment::Production);
        let rendered = engine.render("index.any", &Context::new()).unwrap();
        assert_eq!(rendered, "prod");
    }

    #[test]
    fn test_missing_template_propagates_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_over(dir.path(), Environment::Development);

        match engine.render("absent.html", &Context::new()) {
            Err(ViewError::NotFound(name)) => assert_eq!(name, "absent.dev.html"),
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[test]
    fn test_engine_errors_are_propagated() {
        let dir = tempfile::tempdir().unwrap();
        write_view(dir.path(), "index.dev.html", "{{ missing_value }}");
        let engine = engine_over(dir.path(), Environment::Development);

        assert!(matches!(
            engine.render("index.html", &Context::new()),
            Err(ViewError::Render(_))
        ));
    }
}
