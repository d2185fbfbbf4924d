//! Prefix tree construction.
//!
//! # Algorithm
//! ```text
//! registrations of one method (canonical patterns)
//!     → partition by the longest common run of bytes at the current depth
//!       (a run stops before `*`, before a `:` that follows `/`, and right
//!        after any prefix that is exactly a middleware pattern)
//!     → no common run: split by the byte at the current depth
//!     → one child node per group, recurse with the remaining bytes
//! ```
//!
//! # Design Decisions
//! - Fragments are bytes: a split may fall inside a multi-byte character
//! - Siblings are ordered literal, then parameter, then wildcard, so the
//!   matcher tries the most specific branch first
//! - Handler chains are shared `Arc<[H]>`; the tree is never mutated after build

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::routing::middleware::ResolvedMiddleware;
use crate::routing::path::{PARAM, SLASH, WILDCARD};
use crate::routing::registry::MethodRoutes;

/// How a node consumes request path bytes. Declaration order is sibling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Kind {
    Literal,
    Param,
    Wildcard,
}

impl Kind {
    fn of(fragment: &[u8], parent_pattern: &[u8]) -> Self {
        match fragment {
            [WILDCARD] => Kind::Wildcard,
            [PARAM] if parent_pattern.last() == Some(&SLASH) => Kind::Param,
            _ => Kind::Literal,
        }
    }
}

/// A registered route terminating at a node.
#[derive(Debug)]
pub(crate) struct Leaf<H> {
    pub pattern: String,
    pub param_keys: Arc<[String]>,
    pub handlers: Arc<[H]>,
}

#[derive(Debug)]
pub(crate) struct Node<H> {
    pub fragment: Box<[u8]>,
    pub kind: Kind,
    pub full_pattern: Box<[u8]>,
    pub leaf: Option<Leaf<H>>,
    pub middleware: Option<Arc<[H]>>,
    pub children: Vec<Node<H>>,
}

impl<H> Node<H> {
    fn root() -> Self {
        Self {
            fragment: Box::default(),
            kind: Kind::Literal,
            full_pattern: Box::default(),
            leaf: None,
            middleware: None,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, excluding `self`.
    pub fn descendants(&self) -> usize {
        self.children.iter().map(|c| 1 + c.descendants()).sum()
    }
}

/// The compiled tree of one HTTP method.
#[derive(Debug)]
pub(crate) struct MethodTree<H> {
    pub method: String,
    pub root: Node<H>,
}

/// A route waiting to be placed in the tree.
struct Pending<H> {
    pattern: String,
    param_keys: Arc<[String]>,
    handlers: Arc<[H]>,
}

/// Registrations sharing the same fragment at the current depth.
struct Group<'a, H> {
    fragment: Vec<u8>,
    entries: Vec<&'a Pending<H>>,
}

pub(crate) fn build<H>(routes: MethodRoutes<H>, middleware: &[ResolvedMiddleware<H>]) -> MethodTree<H> {
    let pending: Vec<Pending<H>> = routes
        .routes
        .into_iter()
        .map(|r| Pending {
            pattern: r.pattern,
            param_keys: r.param_keys.into(),
            handlers: r.handlers.into(),
        })
        .collect();
    let entries: Vec<&Pending<H>> = pending.iter().collect();

    let mut root = Node::root();
    build_children(&mut root, 0, &entries, middleware);

    debug!(
        method = %routes.method,
        nodes = root.descendants(),
        "Built method tree"
    );

    MethodTree {
        method: routes.method,
        root,
    }
}

fn build_children<H>(
    parent: &mut Node<H>,
    start: usize,
    entries: &[&Pending<H>],
    middleware: &[ResolvedMiddleware<H>],
) {
    let mut groups = partition(start, entries, middleware);
    groups.sort_by_key(|g| Kind::of(&g.fragment, &parent.full_pattern));

    for group in groups {
        let mut full_pattern = parent.full_pattern.to_vec();
        full_pattern.extend_from_slice(&group.fragment);

        let chain = middleware
            .iter()
            .find(|m| m.pattern.as_bytes() == full_pattern.as_slice())
            .map(|m| Arc::clone(&m.handlers));

        let leaf = group
            .entries
            .iter()
            .find(|e| e.pattern.as_bytes() == full_pattern.as_slice())
            .filter(|e| !e.handlers.is_empty())
            .map(|e| Leaf {
                pattern: e.pattern.clone(),
                param_keys: Arc::clone(&e.param_keys),
                handlers: Arc::clone(&e.handlers),
            });

        let mut child = Node {
            kind: Kind::of(&group.fragment, &parent.full_pattern),
            fragment: group.fragment.into_boxed_slice(),
            full_pattern: full_pattern.into_boxed_slice(),
            leaf,
            middleware: chain,
            children: Vec::new(),
        };
        let depth = start + child.fragment.len();
        build_children(&mut child, depth, &group.entries, middleware);

        debug!(
            fragment = %String::from_utf8_lossy(&child.fragment),
            full_pattern = %String::from_utf8_lossy(&child.full_pattern),
            kind = ?child.kind,
            leaf = child.leaf.is_some(),
            middleware = child.middleware.as_ref().map_or(0, |m| m.len()),
            "Created tree node"
        );
        if child.leaf.is_none() && child.children.is_empty() {
            warn!(
                full_pattern = %String::from_utf8_lossy(&child.full_pattern),
                "Tree node has neither handlers nor children and will never match"
            );
        }

        parent.children.push(child);
    }
}

/// Split `entries` into groups that share a fragment starting at `start`.
fn partition<'a, H>(
    start: usize,
    entries: &[&'a Pending<H>],
    middleware: &[ResolvedMiddleware<H>],
) -> Vec<Group<'a, H>> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };

    let run = common_run(start, entries, middleware);
    if run > 0 {
        return vec![Group {
            fragment: first.pattern.as_bytes()[start..start + run].to_vec(),
            entries: entries.to_vec(),
        }];
    }

    let mut by_byte: Vec<Group<'a, H>> = Vec::new();
    for &entry in entries {
        let Some(&b) = entry.pattern.as_bytes().get(start) else {
            continue;
        };
        match by_byte.iter_mut().find(|g| g.fragment[0] == b) {
            Some(group) => group.entries.push(entry),
            None => by_byte.push(Group {
                fragment: vec![b],
                entries: vec![entry],
            }),
        }
    }

    // A lone group holding every entry starts with a marker byte.
    if by_byte.len() == 1 && by_byte[0].entries.len() == entries.len() {
        return by_byte;
    }

    // Every subgroup agrees on its first byte, so this yields exactly one
    // group per subgroup.
    by_byte
        .into_iter()
        .flat_map(|g| partition(start, &g.entries, middleware))
        .collect()
}

/// Length of the byte run, starting at `start`, that every entry shares.
fn common_run<H>(start: usize, entries: &[&Pending<H>], middleware: &[ResolvedMiddleware<H>]) -> usize {
    let first = entries[0].pattern.as_bytes();
    let mut len = 0;

    for i in start..first.len() {
        let b = first[i];
        if b == WILDCARD || (b == PARAM && i > 0 && first[i - 1] == SLASH) {
            break;
        }
        if !entries.iter().all(|e| e.pattern.as_bytes().get(i) == Some(&b)) {
            break;
        }

        len += 1;

        // A middleware pattern ending here needs a node of its own.
        let prefix = &first[..=i];
        if middleware.iter().any(|m| m.pattern.as_bytes() == prefix) {
            break;
        }
    }

    len
}

impl<H> fmt::Display for MethodTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        for child in &self.root.children {
            child.fmt_indented(f, 1)?;
        }
        Ok(())
    }
}

impl<H> Node<H> {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}{:?}",
            "",
            String::from_utf8_lossy(&self.fragment),
            indent = depth * 2
        )?;
        if let Some(chain) = &self.middleware {
            write!(f, " middleware={}", chain.len())?;
        }
        if let Some(leaf) = &self.leaf {
            write!(f, " -> {} handlers={}", leaf.pattern, leaf.handlers.len())?;
            if !leaf.param_keys.is_empty() {
                write!(f, " params={}", leaf.param_keys.join(","))?;
            }
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}
