//! # shout
//!
//! WebSocket echo server binary: parses flags, starts the server, and
//! shuts down on ctrl-c.

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use shout_server::{ServerConfig, ShoutServer};

/// WebSocket echo server that shouts your messages back.
#[derive(Parser, Debug)]
#[command(name = "shout", about = "WebSocket echo server that shouts your messages back")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        ..ServerConfig::default()
    };

    let server = ShoutServer::new(config);
    let handle = server.start().await.context("Failed to bind server")?;
    tracing::info!("shout listening on http://{}", handle.addr());

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server
        .shutdown()
        .graceful_shutdown(vec![handle.into_task()], None)
        .await;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_default_host() {
        let cli = Cli::parse_from(["shout"]);
        assert_eq!(cli.host, "127.0.0.1");
    }

    #[test]
    fn cli_default_port() {
        let cli = Cli::parse_from(["shout"]);
        assert_eq!(cli.port, 8080);
    }

    #[test]
    fn cli_custom_port() {
        let cli = Cli::parse_from(["shout", "--port", "0"]);
        assert_eq!(cli.port, 0);
    }

    #[test]
    fn cli_custom_host() {
        let cli = Cli::parse_from(["shout", "--host", "0.0.0.0"]);
        assert_eq!(cli.host, "0.0.0.0");
    }
}
