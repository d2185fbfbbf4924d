//! Middleware priority resolution.
//!
//! Flattens the priority groups registered under each middleware pattern into
//! a single chain. Lower priority values run first; groups with equal priority
//! keep their registration order.

use std::sync::Arc;

use tracing::debug;

use crate::routing::registry::MiddlewareEntry;

/// The merged middleware chain of one pattern.
#[derive(Debug)]
pub(crate) struct ResolvedMiddleware<H> {
    pub pattern: String,
    pub handlers: Arc<[H]>,
}

pub(crate) fn resolve<H>(entries: Vec<MiddlewareEntry<H>>) -> Vec<ResolvedMiddleware<H>> {
    entries
        .into_iter()
        .map(|entry| {
            let mut groups = entry.groups;
            // Stable: equal priorities stay in registration order.
            groups.sort_by_key(|g| g.priority);

            let handlers: Vec<H> = groups.into_iter().flat_map(|g| g.handlers).collect();
            debug!(
                pattern = %entry.pattern,
                handlers = handlers.len(),
                "Resolved middleware chain"
            );

            ResolvedMiddleware {
                pattern: entry.pattern,
                handlers: handlers.into(),
            }
        })
        .collect()
}
