//! Pluggable HTTP gateway.
//!
//! A small gateway host whose request handling is supplied by *handler
//! plugins*: units of code registered by name that may receive a logger from
//! the host and return an HTTP handler substituting the host's default one.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                    GATEWAY                        │
//!                  │                                                   │
//!  Client Request  │  ┌─────────┐   ┌─────────┐   ┌────────────────┐  │
//!  ────────────────┼─▶│   net   │──▶│  http   │──▶│ handler chain  │  │
//!                  │  │listener │   │ server  │   │ (plugins, or   │  │
//!                  │  └─────────┘   └─────────┘   │  host default) │  │
//!  Client Response │                              └────────────────┘  │
//!  ◀───────────────┼──────────────────────────────────────┘           │
//!                  │                                                   │
//!                  │  ┌────────────────────────────────────────────┐  │
//!                  │  │           Cross-Cutting Concerns            │  │
//!                  │  │  ┌────────┐ ┌─────────────┐ ┌───────────┐  │  │
//!                  │  │  │ config │ │observability│ │ lifecycle │  │  │
//!                  │  │  └────────┘ └─────────────┘ └───────────┘  │  │
//!                  │  └────────────────────────────────────────────┘  │
//!                  └──────────────────────────────────────────────────┘
//!
//!  At startup, the plugin registry resolves the configured plugin names,
//!  offers each plugin the host logger, and threads the handler chain from
//!  the host default through every plugin in config order.
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod plugin;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use plugin::{HandlerPlugin, PluginLogger, PluginRegistry};
