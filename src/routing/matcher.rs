//! Request path matching against a compiled method tree.
//!
//! # Responsibilities
//! - Walk the tree depth-first, consuming path bytes per node kind
//! - Collect the visited nodes and the raw parameter/wildcard captures
//! - Return the first leaf whose route consumes the whole path
//!
//! # Design Decisions
//! - First match wins: siblings are tried in tree order, no scoring
//! - Backtracking only unwinds the trail; nothing is allocated per node
//! - Recursion depth is bounded by tree depth; the wildcard scan is a loop

use crate::routing::path::SLASH;
use crate::routing::tree::{Kind, Leaf, Node};

/// What a successful walk collected, borrowing from the tree and the path.
#[derive(Debug)]
pub(crate) struct Trail<'t, 'p, H> {
    pub nodes: Vec<&'t Node<H>>,
    pub values: Vec<&'p str>,
    pub wildcards: Vec<&'p str>,
}

impl<H> Default for Trail<'_, '_, H> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            values: Vec::new(),
            wildcards: Vec::new(),
        }
    }
}

impl<H> Trail<'_, '_, H> {
    fn mark(&self) -> (usize, usize, usize) {
        (self.nodes.len(), self.values.len(), self.wildcards.len())
    }

    fn rewind(&mut self, (nodes, values, wildcards): (usize, usize, usize)) {
        self.nodes.truncate(nodes);
        self.values.truncate(values);
        self.wildcards.truncate(wildcards);
    }
}

/// Match `path` from `root`. On success the trail holds every visited node in
/// root-to-leaf order.
pub(crate) fn lookup<'t, 'p, H>(
    root: &'t Node<H>,
    path: &'p str,
    trail: &mut Trail<'t, 'p, H>,
) -> Option<&'t Leaf<H>> {
    walk(root, path, 0, trail)
}

fn walk<'t, 'p, H>(
    node: &'t Node<H>,
    path: &'p str,
    start: usize,
    trail: &mut Trail<'t, 'p, H>,
) -> Option<&'t Leaf<H>> {
    let bytes = path.as_bytes();
    let mark = trail.mark();

    let stop = match node.kind {
        Kind::Literal => {
            let stop = start + node.fragment.len();
            if bytes.get(start..stop)? != &*node.fragment {
                return None;
            }
            stop
        }
        Kind::Param => {
            let stop = bytes
                .get(start..)?
                .iter()
                .position(|&b| b == SLASH)
                .map_or(bytes.len(), |n| start + n);
            trail.values.push(path.get(start..stop)?);
            stop
        }
        Kind::Wildcard => {
            let stop = wildcard_stop(node, bytes, start)?;
            trail.wildcards.push(path.get(start..stop)?);
            stop
        }
    };
    trail.nodes.push(node);

    if stop == bytes.len() {
        if let Some(leaf) = &node.leaf {
            return Some(leaf);
        }
    }

    for child in &node.children {
        if let Some(leaf) = walk(child, path, stop, trail) {
            return Some(leaf);
        }
    }

    trail.rewind(mark);
    None
}

/// Where a wildcard starting at `start` stops consuming.
///
/// Scans forward within the current segment for the earliest position a child
/// can claim: the first child (in tree order) whose fragment starts with the
/// byte there. A childless child only claims a position if its fragment can
/// cover all the remaining bytes. Without a claim, a wildcard with handlers
/// swallows the rest of the path.
fn wildcard_stop<H>(node: &Node<H>, bytes: &[u8], start: usize) -> Option<usize> {
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if let Some(child) = node.children.iter().find(|c| c.fragment.first() == Some(&b)) {
            let remaining = bytes.len() - i;
            if child.children.is_empty() && remaining > child.fragment.len() {
                // Too much path left for this child; keep scanning.
            } else {
                return Some(i);
            }
        }
        if b == SLASH {
            break;
        }
    }

    node.leaf.as_ref().map(|_| bytes.len())
}
