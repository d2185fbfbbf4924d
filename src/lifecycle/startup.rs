//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Register middleware, then routes, on a fresh router
//! - Compile the route table
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Middleware is registered before routes so file order within each list
//!   is the only ordering that matters

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::{load_config, ConfigError, RouteTableConfig};
use crate::routing::{RouteError, RouteTable, Router, MIDDLEWARE};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("registration: {0}")]
    Route(#[from] RouteError),
}

/// Register everything `config` describes and compile it. Handlers are
/// their configured names.
pub fn build_table(config: &RouteTableConfig) -> Result<RouteTable<String>, RouteError> {
    let mut router = Router::with_config(&config.router);

    for mw in &config.middleware {
        router.register(MIDDLEWARE, &mw.path, mw.priority, mw.handlers.clone())?;
    }
    for route in &config.routes {
        router.handle(&route.method, &route.path, route.handlers.clone())?;
    }

    info!(
        env = %config.router.env,
        middleware = config.middleware.len(),
        routes = config.routes.len(),
        "Registrations loaded"
    );

    Ok(router.into_table())
}

/// Load the file at `path` and compile it.
pub fn load_table(path: &Path) -> Result<(RouteTableConfig, RouteTable<String>), StartupError> {
    let config = load_config(path)?;
    let table = build_table(&config)?;
    Ok((config, table))
}
