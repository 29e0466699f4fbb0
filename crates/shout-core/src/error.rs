//! Error taxonomy: protocol violations vs transport failures.

use thiserror::Error;

use crate::frame::{CloseFrame, close_code};

/// A peer-visible protocol violation.
///
/// Each variant maps to a specific close status + reason sent to the
/// peer before the session terminates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// The peer sent a binary message.
    #[error("binary frames are not supported")]
    BinaryUnsupported,

    /// The peer sent a frame kind outside the protocol.
    #[error("unrecognized frame kind")]
    UnknownFrameKind,

    /// A logical message grew past the configured size limit.
    #[error("message exceeds {limit} bytes")]
    MessageTooBig {
        /// The configured maximum message size.
        limit: usize,
    },
}

impl ProtocolViolation {
    /// The close frame surfaced to the peer for this violation.
    pub fn close_frame(&self) -> CloseFrame {
        match self {
            Self::BinaryUnsupported => CloseFrame {
                code: close_code::UNSUPPORTED,
                reason: "Binary frames not supported".into(),
            },
            Self::UnknownFrameKind => CloseFrame {
                code: close_code::UNSUPPORTED,
                reason: "Unknown message type".into(),
            },
            Self::MessageTooBig { .. } => CloseFrame {
                code: close_code::SIZE,
                reason: "Message too large".into(),
            },
        }
    }
}

/// A transport-level failure. The channel is presumed unusable; nothing
/// further is sent on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection ended without a close handshake.
    #[error("connection closed without a close handshake")]
    Closed,

    /// The underlying socket reported an error.
    #[error("socket error: {0}")]
    Socket(String),

    /// The outbound queue closed before the session finished with it.
    #[error("outbound queue closed")]
    SendQueueClosed,
}

/// Why a session ended, when it did not end with a clean close.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The peer broke the protocol and was sent a close frame.
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),

    /// The transport failed; nothing more could be sent.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}
