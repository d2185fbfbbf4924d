//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the filter: `RUST_LOG`, then the configured level, then the environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for release/production, plain format for debug environments
//! - Logs go to stderr so command output on stdout stays machine-readable

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Filter directive used when neither `RUST_LOG` nor the config sets one.
pub fn default_level(env: Environment) -> &'static str {
    if env.is_debug() {
        "debug"
    } else {
        "info"
    }
}

pub fn init_logging(env: Environment, log_level: Option<&str>) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or_else(|| default_level(env))));

    let registry = tracing_subscriber::registry().with(filter);
    if env.is_debug() {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_follows_environment() {
        assert_eq!(default_level(Environment::Development), "debug");
        assert_eq!(default_level(Environment::Gray), "debug");
        assert_eq!(default_level(Environment::Production), "info");
    }
}
