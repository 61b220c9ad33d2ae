//! The logger capability offered to plugins.
//!
//! # Responsibilities
//! - Define the fixed six-level logging surface plugins may receive
//! - Bridge plugin log calls into the host's `tracing` subscriber
//!
//! # Design Decisions
//! - Levels map onto `tracing` levels; `critical` and `fatal` have no native
//!   counterpart and are emitted as errors tagged with a `severity` field
//! - The trait is object-safe so the host can hand plugins an
//!   `Arc<dyn PluginLogger>` behind an opaque `Any` value

/// The logging capability set a host may hand to plugins.
///
/// Plugins must treat the logger as optional: the host is free to never
/// provide one, or to provide a value the plugin cannot use.
pub trait PluginLogger: Send + Sync + 'static {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);
    fn critical(&self, msg: &str);
    fn fatal(&self, msg: &str);
}

/// Host-side logger backed by the `tracing` crate.
///
/// Events are emitted under the `plugin` target so plugin output can be
/// filtered independently of the gateway's own logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl PluginLogger for TracingLogger {
    fn debug(&self, msg: &str) {
        tracing::debug!(target: "plugin", "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!(target: "plugin", "{msg}");
    }

    fn warning(&self, msg: &str) {
        tracing::warn!(target: "plugin", "{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "plugin", "{msg}");
    }

    fn critical(&self, msg: &str) {
        tracing::error!(target: "plugin", severity = "critical", "{msg}");
    }

    fn fatal(&self, msg: &str) {
        tracing::error!(target: "plugin", severity = "fatal", "{msg}");
    }
}
