//! Registration store.
//!
//! Holds every route and middleware registration until the tree is compiled.
//! Routes are keyed by (method, pattern); re-registering replaces. Middleware
//! is keyed by pattern alone and accumulates one priority group per call.

use tracing::debug;

use crate::routing::path::CleanPath;

/// Method name reserved for the middleware bucket.
pub const MIDDLEWARE: &str = "";

/// A handler chain registered as middleware at one priority.
#[derive(Debug, Clone)]
pub struct PriorityGroup<H> {
    pub priority: i32,
    pub handlers: Vec<H>,
}

#[derive(Debug)]
pub(crate) struct RouteEntry<H> {
    pub pattern: String,
    pub param_keys: Vec<String>,
    pub handlers: Vec<H>,
}

#[derive(Debug)]
pub(crate) struct MiddlewareEntry<H> {
    pub pattern: String,
    pub groups: Vec<PriorityGroup<H>>,
}

/// Routes of one HTTP method, in registration order.
#[derive(Debug)]
pub(crate) struct MethodRoutes<H> {
    pub method: String,
    pub routes: Vec<RouteEntry<H>>,
}

#[derive(Debug)]
pub(crate) struct Registry<H> {
    methods: Vec<MethodRoutes<H>>,
    middleware: Vec<MiddlewareEntry<H>>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
            middleware: Vec::new(),
        }
    }
}

impl<H> Registry<H> {
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.middleware.is_empty()
    }

    /// Add a route, replacing the handlers of an existing entry with the same pattern.
    pub fn add_route(&mut self, method: &str, path: CleanPath, handlers: Vec<H>) {
        let index = match self.methods.iter().position(|m| m.method == method) {
            Some(index) => index,
            None => {
                self.methods.push(MethodRoutes {
                    method: method.to_owned(),
                    routes: Vec::new(),
                });
                self.methods.len() - 1
            }
        };
        let bucket = &mut self.methods[index];

        match bucket.routes.iter_mut().find(|r| r.pattern == path.pattern) {
            Some(existing) => {
                debug!(method, pattern = %path.pattern, "Route re-registered, replacing handlers");
                existing.param_keys = path.param_keys;
                existing.handlers = handlers;
            }
            None => bucket.routes.push(RouteEntry {
                pattern: path.pattern,
                param_keys: path.param_keys,
                handlers,
            }),
        }
    }

    /// Add a middleware priority group. Groups under the same pattern accumulate.
    pub fn add_middleware(&mut self, pattern: String, priority: i32, handlers: Vec<H>) {
        let group = PriorityGroup { priority, handlers };
        match self.middleware.iter_mut().find(|m| m.pattern == pattern) {
            Some(existing) => existing.groups.push(group),
            None => self.middleware.push(MiddlewareEntry {
                pattern,
                groups: vec![group],
            }),
        }
    }

    pub fn into_parts(self) -> (Vec<MethodRoutes<H>>, Vec<MiddlewareEntry<H>>) {
        (self.methods, self.middleware)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::path::parse_clean_path;

    #[test]
    fn test_route_replaced_in_place() {
        let mut registry = Registry::default();
        registry.add_route("GET", parse_clean_path("/", "/a"), vec!["old"]);
        registry.add_route("GET", parse_clean_path("/", "/b"), vec!["b"]);
        registry.add_route("GET", parse_clean_path("/", "/a"), vec!["new"]);

        let (methods, _) = registry.into_parts();
        assert_eq!(methods.len(), 1);
        let routes = &methods[0].routes;
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].pattern, "/a");
        assert_eq!(routes[0].handlers, vec!["new"]);
        assert_eq!(routes[1].pattern, "/b");
    }

    #[test]
    fn test_methods_kept_apart() {
        let mut registry = Registry::default();
        registry.add_route("GET", parse_clean_path("/", "/a"), vec![1]);
        registry.add_route("POST", parse_clean_path("/", "/a"), vec![2]);

        let (methods, middleware) = registry.into_parts();
        assert!(middleware.is_empty());
        assert_eq!(methods[0].method, "GET");
        assert_eq!(methods[1].method, "POST");
        assert_eq!(methods[1].routes[0].handlers, vec![2]);
    }

    #[test]
    fn test_middleware_accumulates() {
        let mut registry = Registry::default();
        registry.add_middleware("/".into(), 5, vec!["a"]);
        registry.add_middleware("/".into(), 0, vec!["b"]);
        registry.add_middleware("/api".into(), 5, vec!["c"]);

        let (_, middleware) = registry.into_parts();
        assert_eq!(middleware.len(), 2);
        assert_eq!(middleware[0].groups.len(), 2);
        assert_eq!(middleware[0].groups[1].priority, 0);
        assert_eq!(middleware[1].pattern, "/api");
    }

    #[test]
    fn test_empty() {
        let mut registry: Registry<u8> = Registry::default();
        assert!(registry.is_empty());
        registry.add_middleware("/".into(), 1, vec![]);
        assert!(!registry.is_empty());
    }
}
