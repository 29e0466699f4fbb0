//! Reassembly of fragmented text messages into bounded complete messages.

use crate::error::ProtocolViolation;

/// Accumulates text fragments into one logical message, enforcing the
/// maximum message size.
///
/// The buffer is reused across messages: it resets when a message
/// completes, never between fragments of the same message. Size policy:
/// a fragment whose bytes cannot fit the remaining buffer space can never
/// complete, and a non-final fragment that fills the buffer exactly
/// leaves no room for the rest of the message; both are rejected as too
/// big.
#[derive(Debug)]
pub struct MessageAssembler {
    buf: Vec<u8>,
    limit: usize,
}

impl MessageAssembler {
    /// Create an assembler with the given size limit in bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::with_capacity(limit),
            limit,
        }
    }

    /// Append one fragment.
    ///
    /// Returns `Ok(Some(message))` when `is_final` completes the logical
    /// message, `Ok(None)` while more fragments are expected, and
    /// `Err(MessageTooBig)` when the running total breaks the size
    /// policy. Invalid UTF-8 in a completed message decodes lossily.
    pub fn push(
        &mut self,
        payload: &[u8],
        is_final: bool,
    ) -> Result<Option<String>, ProtocolViolation> {
        let total = self.buf.len() + payload.len();
        if total > self.limit || (!is_final && total >= self.limit) {
            self.buf.clear();
            return Err(ProtocolViolation::MessageTooBig { limit: self.limit });
        }

        self.buf.extend_from_slice(payload);
        if !is_final {
            return Ok(None);
        }

        let message = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Ok(Some(message))
    }

    /// Bytes buffered for the in-progress message.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}
