//! Inbound frame model and close frames.

/// Standard `WebSocket` close status codes used by the protocol.
pub mod close_code {
    /// Normal closure (1000).
    pub const NORMAL: u16 = 1000;
    /// Unsupported data / invalid message type (1003).
    pub const UNSUPPORTED: u16 = 1003;
    /// Message too big (1009).
    pub const SIZE: u16 = 1009;
}

/// One wire-level unit of a message exchange.
///
/// Text frames carry raw payload bytes rather than decoded text because a
/// fragment boundary can fall in the middle of a UTF-8 code point; the
/// payload is only decoded once the final fragment arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A text fragment. `is_final` marks the last fragment of a logical
    /// message.
    Text {
        /// Raw payload bytes of this fragment.
        payload: Vec<u8>,
        /// Whether this fragment completes the logical message.
        is_final: bool,
    },
    /// A binary message. Not supported by this protocol.
    Binary(Vec<u8>),
    /// The peer initiated a close handshake.
    Close(Option<CloseFrame>),
    /// A frame kind outside the protocol.
    Other,
}

impl Frame {
    /// Build a text frame from a string fragment.
    pub fn text(payload: impl Into<String>, is_final: bool) -> Self {
        Frame::Text {
            payload: payload.into().into_bytes(),
            is_final,
        }
    }
}

/// Close status code plus human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    /// `WebSocket` close status code.
    pub code: u16,
    /// Explanatory reason, empty for normal closure.
    pub reason: String,
}

impl CloseFrame {
    /// A normal closure with an empty reason.
    pub fn normal() -> Self {
        Self {
            code: close_code::NORMAL,
            reason: String::new(),
        }
    }
}
