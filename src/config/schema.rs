//! Configuration schema definitions.
//!
//! A route table file describes the router settings plus the middleware and
//! routes to register. Every field has a default so a minimal file is valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routing::DEFAULT_PRIORITY;

/// Environment variable that overrides `router.env`.
pub const ENV_VAR: &str = "TRIE_ROUTER_ENV";

/// Root configuration of a route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Router behaviour.
    pub router: RouterConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Middleware registrations, applied before routes.
    pub middleware: Vec<MiddlewareConfig>,

    /// Route registrations, in order.
    pub routes: Vec<RouteConfig>,
}

/// Router settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Deployment environment. Selects log verbosity and format.
    pub env: Environment,

    /// Priority for middleware registered without one.
    pub default_priority: i32,

    /// Percent-decode bound parameter values.
    pub unescape_path_values: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            default_priority: DEFAULT_PRIORITY,
            unescape_path_values: true,
        }
    }
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Environment {
    Development,
    #[default]
    Test,
    Gray,
    Release,
    Production,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("unknown environment {0:?} (expected development, test, gray, release or production)")]
    Unknown(String),
}

impl Environment {
    /// Development, test and gray run with debug diagnostics.
    pub fn is_debug(self) -> bool {
        matches!(self, Self::Development | Self::Test | Self::Gray)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Gray => "gray",
            Self::Release => "release",
            Self::Production => "production",
        }
    }

    /// Replace `self` with `env_override` (the value of [`ENV_VAR`]) when one
    /// is given.
    pub fn resolve_with(self, env_override: Option<&str>) -> Result<Self, EnvironmentError> {
        match env_override {
            Some(value) => value.parse(),
            None => Ok(self),
        }
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "test" => Ok(Self::Test),
            "development" => Ok(Self::Development),
            "gray" => Ok(Self::Gray),
            "release" => Ok(Self::Release),
            "production" => Ok(Self::Production),
            _ => Err(EnvironmentError::Unknown(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = EnvironmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Environment> for String {
    fn from(env: Environment) -> Self {
        env.as_str().to_owned()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (trace, debug, info, warn, error). When absent
    /// the environment decides.
    pub log_level: Option<String>,
}

/// A middleware registration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// Path the middleware applies under.
    pub path: String,

    /// Lower runs first. Defaults to `router.default_priority`.
    pub priority: Option<i32>,

    /// Handler names, in order.
    pub handlers: Vec<String>,
}

/// A route registration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteConfig {
    /// Uppercase HTTP method.
    pub method: String,

    /// Route pattern (`:name` parameters, `*` wildcards).
    pub path: String,

    /// Handler names, in order.
    pub handlers: Vec<String>,
}
