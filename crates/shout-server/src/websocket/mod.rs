//! WebSocket session handling: transport adaptation, the session loop,
//! and the per-connection heartbeat.

pub mod heartbeat;
pub mod session;
pub mod transport;

pub use heartbeat::Heartbeat;
pub use session::{run_session, Outbound};
