//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (builder phase):
//!     Router / Group (method, path, handlers, priority)
//!     → path.rs (join base path, normalize, extract parameter names)
//!     → registry.rs (routes replace per (method, pattern), middleware accumulates)
//!
//! Compilation (once):
//!     registry
//!     → middleware.rs (merge priority groups per pattern)
//!     → tree.rs (one prefix tree per method)
//!     → RouteTable (immutable)
//!
//! Lookup (per request):
//!     (method, path)
//!     → matcher.rs (depth-first walk with backtracking)
//!     → params.rs (bind names to captured values)
//!     → RouteMatch (middleware chain + route handlers) or None
//! ```
//!
//! # Design Decisions
//! - Trees compiled once, immutable at runtime (shared without locks)
//! - No regex: literal, parameter and wildcard nodes only
//! - Deterministic: same registrations always build the same tree
//! - First match wins; literal siblings are tried before parameters and wildcards
//! - Handlers are opaque: the table stores and returns them, never calls them

pub mod matcher;
pub mod middleware;
pub mod params;
pub mod path;
pub mod registry;
pub mod router;
pub mod table;
pub mod tree;

pub use params::{unescape, Param, Params};
pub use path::{parse_clean_path, CleanPath};
pub use registry::{PriorityGroup, MIDDLEWARE};
pub use router::{is_valid_method, Group, RouteError, Router, DEFAULT_PRIORITY, RECOVERY_PRIORITY};
pub use table::{RouteMatch, RouteTable};
