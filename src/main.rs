use std::path::PathBuf;

use clap::Parser;

use plugin_gateway::config::{load_config, GatewayConfig};
use plugin_gateway::lifecycle::startup;
use plugin_gateway::observability::logging;

/// Pluggable HTTP gateway.
#[derive(Parser)]
#[command(name = "plugin-gateway", version, about)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        plugins = ?config.plugins.names,
        "Configuration loaded"
    );

    startup::run(config).await
}
