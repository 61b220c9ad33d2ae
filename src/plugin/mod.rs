//! Handler plugin subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     PluginRegistry::register(plugin)      (each built-in plugin, by name)
//!     PluginRegistry::register_logger(l)    (host logger offered to every plugin)
//!     PluginRegistry::build_handler(cfg, default)
//!         → resolve configured names in order
//!         → each plugin wraps or replaces the current handler
//!         → final HttpHandler installed in the HTTP server
//!
//! Per request:
//!     HTTP server → installed HttpHandler → response
//! ```
//!
//! # Design Decisions
//! - Plugins are compiled in and registered programmatically; the registry
//!   models the host's extension point, not a dynamic loader
//! - The logger is handed over as an opaque `Any` value; a plugin that cannot
//!   downcast it simply runs without logging (no error, no panic)
//! - Handler chain order follows config order; the last configured plugin is
//!   the outermost handler
//! - All registration happens before the server starts accepting traffic, so
//!   plugin state set during registration needs no further synchronization

pub mod echo;
pub mod logger;
pub mod registry;

use std::any::Any;
use std::convert::Infallible;
use std::future::Future;

use axum::body::Body;
use axum::http::{Request, Response};
use thiserror::Error;
use tower::util::BoxCloneSyncService;

pub use echo::EchoPlugin;
pub use logger::{PluginLogger, TracingLogger};
pub use registry::PluginRegistry;

/// The unit of substitution between host and plugins: a boxed, clonable
/// request handler. The host's default handler and every plugin-produced
/// replacement share this type.
pub type HttpHandler = BoxCloneSyncService<Request<Body>, Response<Body>, Infallible>;

/// Per-plugin configuration mapping, as found under the plugin's name in the
/// `[plugins.settings]` config section.
pub type PluginSettings = serde_json::Map<String, serde_json::Value>;

/// Error type for plugin registration and handler installation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A plugin with this name is already registered.
    #[error("plugin '{0}' is already registered")]
    Duplicate(String),

    /// The configuration names a plugin nobody registered.
    #[error("no plugin registered under name '{0}'")]
    Unknown(String),

    /// The plugin rejected its configuration during handler installation.
    #[error("plugin '{plugin}' rejected its configuration: {reason}")]
    Setup { plugin: String, reason: String },
}

/// The capability a handler plugin exposes to the host.
///
/// Mirrors the host's extension point: the host discovers the plugin by
/// `name`, optionally offers it a logger, and asks it for a handler that
/// substitutes the host's default one.
pub trait HandlerPlugin: Send + Sync {
    /// Registration name the host looks the plugin up by.
    fn name(&self) -> &'static str;

    /// Offer the plugin a host logger as an opaque value.
    ///
    /// Implementations downcast to `Arc<dyn PluginLogger>`; on a failed
    /// downcast the plugin keeps running without a logger. The default
    /// implementation ignores the offer entirely.
    fn register_logger(&self, value: Box<dyn Any + Send + Sync>) {
        let _ = value;
    }

    /// Produce the replacement handler.
    ///
    /// `settings` is the plugin's own section of the gateway config and
    /// `next` the handler currently installed (the host default, or the
    /// product of previously installed plugins). The plugin may wrap `next`
    /// or discard it.
    fn register_handler(
        &self,
        settings: &PluginSettings,
        next: HttpHandler,
    ) -> Result<HttpHandler, PluginError>;
}

/// Build an [`HttpHandler`] from an async request function.
pub fn handler_fn<F, Fut>(mut f: F) -> HttpHandler
where
    F: FnMut(Request<Body>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Response<Body>> + Send + 'static,
{
    BoxCloneSyncService::new(tower::service_fn(move |req| {
        let fut = f(req);
        async move { Ok::<_, Infallible>(fut.await) }
    }))
}
