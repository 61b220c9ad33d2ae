//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net layer)
//!     → server.rs (hyper connection serving, middleware stack)
//!     → dispatch into the plugin-built handler chain
//!     → response.rs (default handler, response helpers)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
