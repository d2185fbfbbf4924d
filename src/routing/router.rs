//! Route registration builder.
//!
//! # Responsibilities
//! - Accept route and middleware registrations, at the root or inside groups
//! - Validate HTTP methods at the registration boundary
//! - Compile the pending registrations into a [`RouteTable`]
//!
//! # Design Decisions
//! - Explicit builder value, no process-wide state
//! - Groups borrow the builder mutably; the borrow ends when the group is dropped
//! - Compiling drains the registry, so a second compile with nothing new is a no-op

use thiserror::Error;
use tracing::debug;

use crate::config::RouterConfig;
use crate::routing::path::parse_clean_path;
use crate::routing::registry::{Registry, MIDDLEWARE};
use crate::routing::table::RouteTable;

/// Priority used when a middleware registration does not name one.
pub const DEFAULT_PRIORITY: i32 = 2 << 10;

/// Priority of the recovery handler. Lower runs first.
pub const RECOVERY_PRIORITY: i32 = 0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("http method {0:?} is not valid")]
    InvalidMethod(String),
}

/// An HTTP method is one or more ASCII uppercase letters.
pub fn is_valid_method(method: &str) -> bool {
    !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase())
}

/// Collects registrations until [`Router::compile`].
#[derive(Debug)]
pub struct Router<H> {
    registry: Registry<H>,
    default_priority: i32,
    unescape_path_values: bool,
    compiled: bool,
}

/// A registration scope under a base path.
#[derive(Debug)]
pub struct Group<'r, H> {
    registry: &'r mut Registry<H>,
    base: String,
    default_priority: i32,
}

/// Borrowed view shared by [`Router`] and [`Group`].
struct Scope<'s, H> {
    registry: &'s mut Registry<H>,
    base: &'s str,
    default_priority: i32,
}

impl<'s, H> Scope<'s, H> {
    fn register(
        self,
        method: &str,
        path: &str,
        priority: Option<i32>,
        handlers: Vec<H>,
    ) -> Result<(), RouteError> {
        if method == MIDDLEWARE {
            self.middleware(path, priority, handlers);
            return Ok(());
        }

        if !is_valid_method(method) {
            return Err(RouteError::InvalidMethod(method.to_owned()));
        }
        self.route(method, path, handlers);
        Ok(())
    }

    fn middleware(self, path: &str, priority: Option<i32>, handlers: Vec<H>) {
        let priority = priority.unwrap_or(self.default_priority);
        let path = parse_clean_path(self.base, path);
        debug!(pattern = %path.pattern, priority, handlers = handlers.len(), "Middleware registered");
        self.registry.add_middleware(path.pattern, priority, handlers);
    }

    fn route(self, method: &str, path: &str, handlers: Vec<H>) {
        let path = parse_clean_path(self.base, path);
        debug!(method, pattern = %path.pattern, handlers = handlers.len(), "Route registered");
        self.registry.add_route(method, path, handlers);
    }

    fn group(self, prefix: &str, handlers: Vec<H>) -> Group<'s, H> {
        let path = parse_clean_path(self.base, prefix);
        if !handlers.is_empty() {
            self.registry
                .add_middleware(path.pattern, self.default_priority, handlers);
        }
        Group {
            registry: self.registry,
            base: path.base,
            default_priority: self.default_priority,
        }
    }
}

macro_rules! verb {
    ($($name:ident => $method:literal),* $(,)?) => {
        $(
            #[doc = concat!("Register a `", $method, "` route.")]
            pub fn $name(&mut self, path: &str, handlers: Vec<H>) {
                self.scope().route($method, path, handlers);
            }
        )*
    };
}

macro_rules! registration_methods {
    () => {
        /// Register `handlers` for `method` at `path`. An empty method
        /// ([`MIDDLEWARE`]) registers middleware at `priority`.
        pub fn register(
            &mut self,
            method: &str,
            path: &str,
            priority: Option<i32>,
            handlers: Vec<H>,
        ) -> Result<(), RouteError> {
            self.scope().register(method, path, priority, handlers)
        }

        /// Register a route for any uppercase `method`.
        pub fn handle(&mut self, method: &str, path: &str, handlers: Vec<H>) -> Result<(), RouteError> {
            self.scope().register(method, path, None, handlers)
        }

        verb! {
            get => "GET",
            post => "POST",
            put => "PUT",
            patch => "PATCH",
            delete => "DELETE",
            options => "OPTIONS",
            head => "HEAD",
            connect => "CONNECT",
            trace => "TRACE",
        }

        /// Middleware at the current base path with the default priority.
        pub fn use_middleware(&mut self, handlers: Vec<H>) {
            self.scope().middleware("", None, handlers);
        }

        /// Middleware at the current base path with an explicit priority.
        pub fn priority_use(&mut self, priority: i32, handlers: Vec<H>) {
            self.scope().middleware("", Some(priority), handlers);
        }

        /// Register `handler` to run before every other middleware at the base path.
        pub fn use_recovery(&mut self, handler: H) {
            self.priority_use(RECOVERY_PRIORITY, vec![handler]);
        }

        /// Open a nested scope at `prefix`. Non-empty `handlers` become
        /// middleware of the group path.
        pub fn group(&mut self, prefix: &str, handlers: Vec<H>) -> Group<'_, H> {
            self.scope().group(prefix, handlers)
        }
    };
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self {
            registry: Registry::default(),
            default_priority: DEFAULT_PRIORITY,
            unescape_path_values: true,
            compiled: false,
        }
    }

    pub fn with_config(config: &RouterConfig) -> Self {
        Self {
            default_priority: config.default_priority,
            unescape_path_values: config.unescape_path_values,
            ..Self::new()
        }
    }

    pub fn default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    pub fn unescape_path_values(mut self, enabled: bool) -> Self {
        self.unescape_path_values = enabled;
        self
    }

    fn scope(&mut self) -> Scope<'_, H> {
        Scope {
            registry: &mut self.registry,
            base: "/",
            default_priority: self.default_priority,
        }
    }

    registration_methods!();

    /// Build the route table from everything registered since the last
    /// compile. Returns `None` when there is nothing new to compile.
    pub fn compile(&mut self) -> Option<RouteTable<H>> {
        if self.compiled && self.registry.is_empty() {
            debug!("Nothing registered since last compile");
            return None;
        }
        self.compiled = true;
        let registry = std::mem::take(&mut self.registry);
        Some(RouteTable::build(registry, self.unescape_path_values))
    }

    pub fn into_table(self) -> RouteTable<H> {
        RouteTable::build(self.registry, self.unescape_path_values)
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Group<'_, H> {
    /// The joined base path, parameter names included.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn scope(&mut self) -> Scope<'_, H> {
        Scope {
            registry: &mut *self.registry,
            base: &self.base,
            default_priority: self.default_priority,
        }
    }

    registration_methods!();
}
