//! # shout-core
//!
//! Protocol types for the shout `WebSocket` echo server.
//!
//! - Frame model (`frame`): text/binary/close frames with fragmentation flags
//! - Message assembly (`assembly`): bounded reassembly of fragmented text
//! - Channel seam (`channel`): the receive/send traits a session runs against
//! - Error taxonomy (`error`): protocol violations vs transport failures
//! - Protocol constants (`protocol`): size limit, sentinels, heartbeat schedule

#![deny(unsafe_code)]

pub mod assembly;
pub mod channel;
pub mod error;
pub mod frame;
pub mod protocol;

pub use assembly::MessageAssembler;
pub use channel::{FrameReceiver, MessageSender};
pub use error::{ProtocolViolation, SessionError, TransportError};
pub use frame::{CloseFrame, Frame};
