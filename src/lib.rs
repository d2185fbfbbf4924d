//! HTTP route registration compiler and prefix-tree matcher.
//!
//! Routes and prioritized middleware are registered on a [`Router`], compiled
//! once into an immutable [`RouteTable`] (one prefix tree per method), then
//! matched per request into the handler chain and the bound parameters.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouteTableConfig;
pub use routing::{Group, Params, RouteError, RouteMatch, RouteTable, Router};
