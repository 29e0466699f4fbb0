//! Server and session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shout_core::protocol;

/// Configuration for the shout server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Max complete message size in bytes.
    pub max_message_size: usize,
    /// Heartbeat interval in seconds.
    pub heartbeat_interval_secs: u64,
    /// Delay before the first heartbeat, in seconds.
    pub heartbeat_initial_delay_secs: u64,
    /// Capacity of the per-session outbound queue.
    pub max_send_queue: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            max_message_size: protocol::MAX_MESSAGE_SIZE,
            heartbeat_interval_secs: protocol::HEARTBEAT_INTERVAL.as_secs(),
            heartbeat_initial_delay_secs: protocol::HEARTBEAT_INITIAL_DELAY.as_secs(),
            max_send_queue: 256,
        }
    }
}

impl ServerConfig {
    /// Per-session settings derived from this server configuration.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            max_message_size: self.max_message_size,
            heartbeat_interval: Duration::from_secs(self.heartbeat_interval_secs),
            heartbeat_initial_delay: Duration::from_secs(self.heartbeat_initial_delay_secs),
            send_queue: self.max_send_queue,
        }
    }
}

/// Settings handed to each connection session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Max complete message size in bytes.
    pub max_message_size: usize,
    /// Interval between heartbeats.
    pub heartbeat_interval: Duration,
    /// Delay before the first heartbeat.
    pub heartbeat_initial_delay: Duration,
    /// Capacity of the outbound queue.
    pub send_queue: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        ServerConfig::default().session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_host() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
    }

    #[test]
    fn default_port_is_zero() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 0);
    }

    #[test]
    fn default_max_message_size() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.max_message_size, 1024);
    }

    #[test]
    fn default_heartbeat_interval() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.heartbeat_interval_secs, 10);
    }

    #[test]
    fn default_heartbeat_initial_delay() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.heartbeat_initial_delay_secs, 1);
    }

    #[test]
    fn default_send_queue() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.max_send_queue, 256);
    }

    #[test]
    fn session_converts_seconds_to_durations() {
        let cfg = ServerConfig {
            heartbeat_interval_secs: 7,
            heartbeat_initial_delay_secs: 2,
            ..ServerConfig::default()
        };
        let session = cfg.session();
        assert_eq!(session.heartbeat_interval, Duration::from_secs(7));
        assert_eq!(session.heartbeat_initial_delay, Duration::from_secs(2));
        assert_eq!(session.max_message_size, 1024);
        assert_eq!(session.send_queue, 256);
    }

    #[test]
    fn session_default_matches_server_default() {
        let session = SessionConfig::default();
        assert_eq!(session.max_message_size, 1024);
        assert_eq!(session.heartbeat_interval, Duration::from_secs(10));
        assert_eq!(session.heartbeat_initial_delay, Duration::from_secs(1));
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = ServerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.host, cfg.host);
        assert_eq!(back.port, cfg.port);
        assert_eq!(back.max_message_size, cfg.max_message_size);
        assert_eq!(back.heartbeat_interval_secs, cfg.heartbeat_interval_secs);
        assert_eq!(
            back.heartbeat_initial_delay_secs,
            cfg.heartbeat_initial_delay_secs
        );
        assert_eq!(back.max_send_queue, cfg.max_send_queue);
    }

    #[test]
    fn deserialize_from_json_string() {
        let json = r#"{"host":"10.0.0.1","port":3000,"max_message_size":512,"heartbeat_interval_secs":5,"heartbeat_initial_delay_secs":1,"max_send_queue":16}"#;
        let cfg: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.host, "10.0.0.1");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.max_message_size, 512);
    }
}
