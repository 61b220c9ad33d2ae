//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use plugin_gateway::config::GatewayConfig;
use plugin_gateway::http::{response, HttpServer};
use plugin_gateway::lifecycle::Shutdown;
use plugin_gateway::net::Listener;
use plugin_gateway::plugin::PluginRegistry;

/// Start a gateway on an ephemeral loopback port with the given registry and
/// config. Returns the bound address and the shutdown handle.
pub async fn spawn_gateway(
    mut config: GatewayConfig,
    registry: &PluginRegistry,
) -> (SocketAddr, Shutdown) {
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handler = registry
        .build_handler(&config.plugins, response::default_handler())
        .unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, handler);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// HTTP client without connection pooling surprises between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// Send a raw HTTP/1.1 request and return the full response text.
///
/// Useful for request lines reqwest would normalize away.
#[allow(dead_code)]
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf).into_owned()
}
