//! HTTP server wiring: routes, WebSocket upgrade, lifecycle.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::ws::{WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tracing::info;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::health::HealthResponse;
use crate::shutdown::ShutdownCoordinator;
use crate::websocket::session::run_session;
use crate::websocket::transport::split_socket;

/// Landing page served at `/` and `/index.html`.
const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>shout</title></head>
<body>
<h1>shout</h1>
<p>WebSocket echo server. Connect to <code>/socket</code> and every text
message comes back uppercased. The server sends <code>HEARTBEAT</code>
every ten seconds; send <code>close</code> to end the session.</p>
</body>
</html>
"#;

/// Shared state for the Axum handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<ServerConfig>,
    start_time: Instant,
    active: Arc<AtomicUsize>,
}

/// The shout server: owns its configuration and shutdown coordinator.
pub struct ShoutServer {
    config: ServerConfig,
    shutdown: ShutdownCoordinator,
    start_time: Instant,
    active: Arc<AtomicUsize>,
}

impl ShoutServer {
    /// Create a server from configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            shutdown: ShutdownCoordinator::new(),
            start_time: Instant::now(),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The server's configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The shutdown coordinator driving this server.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Build the router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            config: Arc::new(self.config.clone()),
            start_time: self.start_time,
            active: Arc::clone(&self.active),
        };
        Router::new()
            .route("/socket", get(ws_handler))
            .route("/", get(index_handler))
            .route("/index.html", get(index_handler))
            .route("/health", get(health_handler))
            .fallback(not_found_handler)
            .with_state(state)
            .layer(CorsLayer::permissive())
    }

    /// Bind the listener and start serving. Returns a handle with the
    /// bound address; the accept loop stops when the shutdown
    /// coordinator fires.
    pub async fn start(&self) -> Result<ServerHandle, std::io::Error> {
        let router = self.router();
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        let token = self.shutdown.token();

        info!(addr = %local_addr, "shout server listening");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router)
                .with_graceful_shutdown(token.cancelled_owned())
                .await;
        });

        Ok(ServerHandle {
            addr: local_addr,
            server,
        })
    }
}

/// Handle returned by [`ShoutServer::start`].
pub struct ServerHandle {
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the listener is bound to.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The serve task, for handing to a shutdown coordinator.
    pub fn into_task(self) -> JoinHandle<()> {
        self.server
    }

    /// Wait for the serve task to finish.
    pub async fn join(self) {
        let _ = self.server.await;
    }
}

/// WebSocket upgrade handler for `/socket`.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run a session over a freshly upgraded socket.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_id = Uuid::now_v7().to_string();
    let _ = state.active.fetch_add(1, Ordering::Relaxed);

    let (sender, receiver) = split_socket(socket);
    // Session outcomes are logged inside the loop.
    let _ = run_session(receiver, sender, session_id, state.config.session()).await;

    let _ = state.active.fetch_sub(1, Ordering::Relaxed);
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::snapshot(
        state.start_time,
        state.active.load(Ordering::Relaxed),
    ))
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}
