//! Protocol constants.
//!
//! These are the reference values of the wire protocol. Runtime
//! configuration (`ServerConfig` in the server crate) defaults to them
//! but may tighten them for tests.

use std::time::Duration;

/// Maximum size of one logical text message in bytes.
///
/// A message whose buffered bytes would exceed this limit is rejected
/// with a message-too-big close.
pub const MAX_MESSAGE_SIZE: usize = 1024;

/// Payload of every heartbeat message.
pub const HEARTBEAT_PAYLOAD: &str = "HEARTBEAT";

/// Text message that asks the server to close the connection.
///
/// Matched exactly and case-sensitively; anything else is echoed.
pub const CLOSE_SENTINEL: &str = "close";

/// Time between heartbeat firings.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(10);

/// Delay before the first heartbeat firing.
pub const HEARTBEAT_INITIAL_DELAY: Duration = Duration::from_secs(1);
