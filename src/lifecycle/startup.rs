//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Register built-in plugins and hand them the host logger
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Plugin registration completes before the listener binds, so handler
//!   state is frozen before the first request can arrive

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::http::response;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::net::Listener;
use crate::observability::metrics;
use crate::plugin::{EchoPlugin, PluginRegistry, TracingLogger};

/// Build the registry of plugins compiled into this gateway.
pub fn builtin_registry() -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    registry
        .register(Arc::new(EchoPlugin::new()))
        .expect("built-in plugin names are unique");
    registry
}

/// Run the gateway until a termination signal arrives.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                // Caught by validation for loaded configs; defaults can't hit this.
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let registry = builtin_registry();
    registry.register_logger(Arc::new(TracingLogger));

    let handler = registry.build_handler(&config.plugins, response::default_handler())?;
    tracing::info!(
        installed = ?config.plugins.names,
        available = ?registry.names(),
        "Handler chain built"
    );

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let signal_trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_trigger.trigger();
    });

    let server = HttpServer::new(config, handler);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
