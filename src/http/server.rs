//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router dispatching into the installed handler chain
//! - Wire up middleware (timeout, body limit, request ID, tracing)
//! - Serve connections accepted by the bounded listener
//! - Drain in-flight connections on shutdown
//! - Observability (per-request metrics)

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, Response},
    routing::any,
    Router,
};
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::net::{ConnectionGuard, ConnectionPermit, ConnectionTracker, Listener};
use crate::observability::metrics;
use crate::plugin::HttpHandler;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    /// The plugin-built handler chain serving every request.
    handler: HttpHandler,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server running the given handler chain.
    pub fn new(config: GatewayConfig, handler: HttpHandler) -> Self {
        let state = AppState { handler };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.http.max_body_size))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until the shutdown signal fires, then drain.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to accept connection");
                            continue;
                        }
                    };
                    let service = self.router.clone();
                    let guard = tracker.track();
                    tokio::spawn(serve_connection(stream, peer_addr, service, guard, permit));
                }

                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, draining connections");
                    break;
                }
            }
        }

        tracker
            .wait_until_idle(Duration::from_secs(self.config.timeouts.request_secs))
            .await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serve a single accepted connection over HTTP/1.1 or HTTP/2.
///
/// Holds the connection permit and drain guard for the connection's lifetime.
async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    service: Router,
    guard: ConnectionGuard,
    permit: ConnectionPermit,
) {
    let io = TokioIo::new(stream);
    let hyper_service = hyper::service::service_fn(move |request: Request<Incoming>| {
        service.clone().oneshot(request)
    });

    if let Err(e) = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
        .serve_connection_with_upgrades(io, hyper_service)
        .await
    {
        tracing::debug!(
            peer_addr = %peer_addr,
            connection_id = %guard.id(),
            error = %e,
            "Connection error"
        );
    }

    drop(permit);
}

/// Dispatch a request into the installed handler chain.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = match state.handler.clone().oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
