//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check HTTP methods are uppercase tokens
//! - Reject registrations that carry no handlers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Runs before any registration reaches the router

use std::fmt;

use crate::config::schema::RouteTableConfig;
use crate::routing::is_valid_method;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidMethod { index: usize, method: String },
    RouteWithoutHandlers { index: usize, path: String },
    MiddlewareWithoutHandlers { index: usize, path: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMethod { index, method } => {
                write!(f, "routes[{index}]: http method {method:?} is not valid")
            }
            Self::RouteWithoutHandlers { index, path } => {
                write!(f, "routes[{index}]: route {path:?} has no handlers")
            }
            Self::MiddlewareWithoutHandlers { index, path } => {
                write!(f, "middleware[{index}]: middleware {path:?} has no handlers")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_config(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, mw) in config.middleware.iter().enumerate() {
        if mw.handlers.is_empty() {
            errors.push(ValidationError::MiddlewareWithoutHandlers {
                index,
                path: mw.path.clone(),
            });
        }
    }

    for (index, route) in config.routes.iter().enumerate() {
        if !is_valid_method(&route.method) {
            errors.push(ValidationError::InvalidMethod {
                index,
                method: route.method.clone(),
            });
        }
        if route.handlers.is_empty() {
            errors.push(ValidationError::RouteWithoutHandlers {
                index,
                path: route.path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
