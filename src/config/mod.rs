//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize, apply TRIE_ROUTER_ENV)
//!     → validation.rs (semantic checks)
//!     → RouteTableConfig (validated, immutable)
//!     → lifecycle::startup registers it on a Router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An unknown environment is fatal, never silently defaulted

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, parse_config_with, ConfigError};
pub use schema::{
    Environment, EnvironmentError, MiddlewareConfig, ObservabilityConfig, RouteConfig,
    RouteTableConfig, RouterConfig,
};
pub use validation::ValidationError;
