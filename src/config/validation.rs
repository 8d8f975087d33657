//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (port non-zero, body limit non-zero)
//! - Check that module segments and the view suffix are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,

    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.is_empty() {
        errors.push(ValidationError {
            field: "server.host",
            message: "must not be empty".to_string(),
        });
    }
    if config.server.port == 0 {
        errors.push(ValidationError {
            field: "server.port",
            message: "must be non-zero".to_string(),
        });
    }

    if config.module.name.is_empty() {
        errors.push(ValidationError {
            field: "module.name",
            message: "must not be empty".to_string(),
        });
    }
    // Module identity is matched against individual path segments, so it
    // can never itself contain a separator.
    if config.module.name.contains('/') {
        errors.push(ValidationError {
            field: "module.name",
            message: "must not contain '/'".to_string(),
        });
    }
    if config.module.version.contains('/') {
        errors.push(ValidationError {
            field: "module.version",
            message: "must not contain '/'".to_string(),
        });
    }

    if let Some(suffix) = &config.views.suffix {
        if !suffix.starts_with('.') {
            errors.push(ValidationError {
                field: "views.suffix",
                message: format!("must start with '.', got {suffix:?}"),
            });
        }
    }

    if config.uploads.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "uploads.max_body_bytes",
            message: "must be non-zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
