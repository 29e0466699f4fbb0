//! # shout-server
//!
//! Axum HTTP + `WebSocket` server hosting the shout session loop.
//!
//! - HTTP endpoints: health check, static landing page
//! - `WebSocket` gateway at `/socket`: one session task per connection
//! - Full-duplex sessions: uppercase echo plus a periodic heartbeat
//! - Graceful shutdown via `tokio::signal` + `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod health;
pub mod server;
pub mod shutdown;
pub mod websocket;

pub use config::{ServerConfig, SessionConfig};
pub use server::{ServerHandle, ShoutServer};
pub use shutdown::ShutdownCoordinator;
