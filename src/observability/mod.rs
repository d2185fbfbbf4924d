//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (debug per tree node, info per compile, trace per match)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, plain or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Library code only emits events; the binary installs the subscriber

pub mod logging;

pub use logging::init_logging;
