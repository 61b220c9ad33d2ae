//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection arrives
//!     → listener.rs (accept, enforce max_connections)
//!     → connection.rs (track lifetime for graceful drain)
//!     → handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Backpressure via semaphore permits, released on drop
//! - Connection IDs generated here so every log line can carry one

pub mod connection;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionTracker};
pub use listener::{ConnectionPermit, Listener, ListenerError};
