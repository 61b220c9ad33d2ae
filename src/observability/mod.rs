//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, incl. plugin output)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; plugin logs flow through the same
//!   subscriber under their own target
//! - Request IDs attached as a middleware layer in the HTTP server

pub mod logging;
pub mod metrics;
