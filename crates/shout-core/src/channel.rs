//! Transport-facing traits the session loop runs against.
//!
//! The session never touches a socket directly. It pulls [`Frame`]s from a
//! [`FrameReceiver`] and pushes completed messages through a
//! [`MessageSender`], so the same loop drives a real WebSocket in
//! production and a scripted transport in tests.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::frame::{CloseFrame, Frame};

/// Inbound side of a connection.
#[async_trait]
pub trait FrameReceiver: Send {
    /// Receive the next frame.
    ///
    /// Returns `Ok(None)` when the peer ended the connection without a
    /// close handshake, and `Err` when the transport itself failed.
    /// Control frames handled at the transport layer are not surfaced.
    async fn recv(&mut self) -> Result<Option<Frame>, TransportError>;
}

/// Outbound side of a connection.
#[async_trait]
pub trait MessageSender: Send {
    /// Send a complete text message. The transport marks it final.
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Send a close frame with the given code and reason.
    async fn send_close(&mut self, frame: CloseFrame) -> Result<(), TransportError>;
}
