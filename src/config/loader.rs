//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{EnvironmentError, RouteTableConfig, ENV_VAR};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    Environment(EnvironmentError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
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
            ConfigError::Environment(e) => write!(f, "Environment error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouteTableConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text. The environment override
/// variable is applied before validation.
pub fn parse_config(content: &str) -> Result<RouteTableConfig, ConfigError> {
    let env_override = std::env::var(ENV_VAR).ok();
    parse_config_with(content, env_override.as_deref())
}

/// Like [`parse_config`], with the environment override passed explicitly.
pub fn parse_config_with(
    content: &str,
    env_override: Option<&str>,
) -> Result<RouteTableConfig, ConfigError> {
    let mut config: RouteTableConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    config.router.env = config
        .router
        .env
        .resolve_with(env_override)
        .map_err(ConfigError::Environment)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
