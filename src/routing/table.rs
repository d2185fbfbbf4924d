//! The compiled, immutable route table.

use std::fmt;

use serde::Serialize;
use tracing::{info, trace};

use crate::routing::matcher::{lookup, Trail};
use crate::routing::middleware::resolve;
use crate::routing::params::Params;
use crate::routing::registry::Registry;
use crate::routing::tree::{build, MethodTree};

/// One prefix tree per HTTP method. Safe to share across threads when `H` is.
#[derive(Debug)]
pub struct RouteTable<H> {
    trees: Vec<MethodTree<H>>,
    unescape_values: bool,
}

/// The result of a successful lookup.
#[derive(Debug, Serialize)]
pub struct RouteMatch<'t, H> {
    handlers: Vec<&'t H>,
    params: Params,
    wildcards: Vec<String>,
    pattern: &'t str,
}

impl<'t, H> RouteMatch<'t, H> {
    /// Middleware of every traversed node, root first, then the route handlers.
    pub fn handlers(&self) -> &[&'t H] {
        &self.handlers
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Text consumed by each traversed wildcard, in path order.
    pub fn wildcards(&self) -> &[String] {
        &self.wildcards
    }

    /// Canonical pattern of the matched route.
    pub fn pattern(&self) -> &'t str {
        self.pattern
    }

    pub fn into_handlers(self) -> Vec<&'t H> {
        self.handlers
    }
}

impl<H> RouteTable<H> {
    pub(crate) fn build(registry: Registry<H>, unescape_values: bool) -> Self {
        let (methods, middleware) = registry.into_parts();
        let middleware = resolve(middleware);

        let trees: Vec<MethodTree<H>> = methods
            .into_iter()
            .map(|routes| build(routes, &middleware))
            .collect();

        info!(
            methods = trees.len(),
            nodes = trees.iter().map(|t| t.root.descendants()).sum::<usize>(),
            middleware_patterns = middleware.len(),
            "Route table compiled"
        );

        Self {
            trees,
            unescape_values,
        }
    }

    /// Find the route for `method` and `path`. First match wins.
    pub fn match_route<'t>(&'t self, method: &str, path: &str) -> Option<RouteMatch<'t, H>> {
        let Some(tree) = self.tree(method) else {
            trace!(method, path, "No tree for method");
            return None;
        };

        let mut trail = Trail::default();
        let Some(leaf) = lookup(&tree.root, path, &mut trail) else {
            trace!(method, path, "No route matched");
            return None;
        };

        let handlers: Vec<&'t H> = trail
            .nodes
            .iter()
            .copied()
            .filter_map(|node| node.middleware.as_deref())
            .flatten()
            .chain(leaf.handlers.iter())
            .collect();
        let params = Params::bind(&leaf.param_keys, &trail.values, self.unescape_values);
        let wildcards = trail.wildcards.iter().map(|w| w.to_string()).collect();

        trace!(
            method,
            path,
            pattern = %leaf.pattern,
            handlers = handlers.len(),
            "Route matched"
        );

        Some(RouteMatch {
            handlers,
            params,
            wildcards,
            pattern: &leaf.pattern,
        })
    }

    /// Compiled methods, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.trees.iter().map(|t| t.method.as_str())
    }

    /// Methods with a route matching `path`. Empty means not found; non-empty
    /// for a method that did not match means "method not allowed".
    pub fn allowed(&self, path: &str) -> Vec<&str> {
        self.trees
            .iter()
            .filter(|tree| lookup(&tree.root, path, &mut Trail::default()).is_some())
            .map(|tree| tree.method.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    fn tree(&self, method: &str) -> Option<&MethodTree<H>> {
        self.trees.iter().find(|t| t.method == method)
    }
}

impl<H> fmt::Display for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tree in &self.trees {
            write!(f, "{tree}")?;
        }
        Ok(())
    }
}
