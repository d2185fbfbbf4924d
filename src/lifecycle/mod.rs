//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Register middleware → Register routes → Compile
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then registrations, then the table
//! - The compiled table is the only thing handed to callers

pub mod startup;

pub use startup::{build_table, load_table, StartupError};
