//! Liveness reporting for the `/health` route.

use std::time::Instant;

use serde::Serialize;

/// Snapshot of server liveness returned by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` whenever the process is serving requests.
    pub status: String,
    /// Whole seconds elapsed since startup.
    pub uptime_secs: u64,
    /// Sessions currently connected to `/socket`.
    pub connections: usize,
}

impl HealthResponse {
    /// Capture the current liveness counters.
    pub fn snapshot(started: Instant, connections: usize) -> Self {
        Self {
            status: "ok".into(),
            uptime_secs: started.elapsed().as_secs(),
            connections,
        }
    }
}
