//! Configuration loading and layering.

use std::path::Path;

use config::{Config, File, FileFormat};

use crate::config::schema::{AppConfig, ConfigOverrides};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable prefix. `PLINTH__SERVER__PORT=8080` maps onto
/// `server.port`.
const ENV_PREFIX: &str = "PLINTH";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Load error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate the application configuration.
///
/// Sources layer in increasing precedence: schema defaults, an optional
/// TOML file, `PLINTH`-prefixed environment variables, and finally the
/// caller's overrides (blended exactly once, before the server starts).
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(ConfigError::Load)?;

    let config: AppConfig = settings.try_deserialize().map_err(ConfigError::Load)?;
    let config = config.blend(overrides);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("plinth.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_file_defaults_apply() {
        let config = load_config(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.module.version, "V0");
        assert!(!config.fixtures.enabled);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            environment = "prod"

            [server]
            port = 4000

            [module]
            name = "storefront"

            [fixtures]
            enabled = true
            "#,
        );

        let config = load_config(Some(&path), ConfigOverrides::default()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.module.name, "storefront");
        assert!(config.fixtures.enabled);
        assert_eq!(config.view_suffix(), ".html");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nport = 4000\n");

        let config = load_config(
            Some(&path),
            ConfigOverrides {
                port: Some(5000),
                ..ConfigOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_environment_variables_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[observability]\nmetrics_address = \"10.0.0.1:1\"\n");

        std::env::set_var("PLINTH__OBSERVABILITY__METRICS_ADDRESS", "127.0.0.1:9999");
        let result = load_config(Some(&path), ConfigOverrides::default());
        std::env::remove_var("PLINTH__OBSERVABILITY__METRICS_ADDRESS");

        assert_eq!(
            result.unwrap().observability.metrics_address,
            "127.0.0.1:9999"
        );
    }

    #[test]
    fn test_malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server\nport = oops");

        match load_config(Some(&path), ConfigOverrides::default()) {
            Err(ConfigError::Load(_)) => {}
            other => panic!("expected load error, got {other:?}"),
        }
    }

    #[test]
    fn test_semantic_violations_are_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[module]\nname = \"\"\n");

        match load_config(Some(&path), ConfigOverrides::default()) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors[0].field, "module.name");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
