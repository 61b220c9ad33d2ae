//! Plugin registration and handler chain assembly.
//!
//! # Responsibilities
//! - Hold registered plugins, keyed by name, insertion order preserved
//! - Broadcast the host logger to every plugin
//! - Thread the handler chain through the plugins named in the config
//!
//! # Design Decisions
//! - Registration is a startup-only, single-threaded affair; the registry is
//!   immutable once the server starts
//! - Unknown names in the config are a hard startup error rather than a
//!   silently skipped entry

use std::sync::Arc;

use crate::config::PluginConfig;
use crate::plugin::logger::PluginLogger;
use crate::plugin::{HandlerPlugin, HttpHandler, PluginError, PluginSettings};

/// Holds every plugin the host knows about.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn HandlerPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin under its own name. Duplicate names are rejected.
    pub fn register(&mut self, plugin: Arc<dyn HandlerPlugin>) -> Result<(), PluginError> {
        let name = plugin.name();
        if self.get(name).is_some() {
            return Err(PluginError::Duplicate(name.to_string()));
        }
        tracing::debug!(plugin = %name, "Plugin registered");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Look up a plugin by registration name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn HandlerPlugin>> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    /// Names of all registered plugins, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Offer the host logger to every registered plugin.
    ///
    /// Each plugin receives its own opaque handle and decides for itself
    /// whether it can use it.
    pub fn register_logger(&self, logger: Arc<dyn PluginLogger>) {
        for plugin in &self.plugins {
            plugin.register_logger(Box::new(Arc::clone(&logger)));
        }
    }

    /// Build the request handler the server will run.
    ///
    /// Starting from `default`, each plugin named in the config wraps or
    /// replaces the current handler, in config order. With no plugins
    /// configured the default handler is returned unchanged.
    pub fn build_handler(
        &self,
        config: &PluginConfig,
        default: HttpHandler,
    ) -> Result<HttpHandler, PluginError> {
        let mut handler = default;
        for name in &config.names {
            let plugin = self
                .get(name)
                .ok_or_else(|| PluginError::Unknown(name.clone()))?;
            let settings = config
                .settings
                .get(name)
                .cloned()
                .unwrap_or_else(PluginSettings::new);
            handler = plugin.register_handler(&settings, handler)?;
            tracing::info!(plugin = %name, "Handler plugin installed");
        }
        Ok(handler)
    }
}
