//! Adapters between axum's WebSocket types and the session's transport
//! traits.

use async_trait::async_trait;
use axum::extract::ws::{CloseFrame as WsCloseFrame, Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};

use shout_core::{CloseFrame, Frame, FrameReceiver, MessageSender, TransportError};

/// Split a socket into the session's send and receive halves.
pub fn split_socket(socket: WebSocket) -> (SocketSender, SocketReceiver) {
    let (sink, stream) = socket.split();
    (SocketSender { sink }, SocketReceiver { stream })
}

/// Inbound half of a socket.
///
/// Yields data and close frames. Ping and Pong are answered by the
/// WebSocket library and never surface here. axum reassembles fragmented
/// messages before delivery, so text frames from this adapter always
/// carry a complete message.
pub struct SocketReceiver {
    stream: SplitStream<WebSocket>,
}

#[async_trait]
impl FrameReceiver for SocketReceiver {
    async fn recv(&mut self) -> Result<Option<Frame>, TransportError> {
        loop {
            match self.stream.next().await {
                Some(Ok(msg)) => {
                    if let Some(frame) = frame_from_message(msg) {
                        return Ok(Some(frame));
                    }
                }
                Some(Err(e)) => return Err(TransportError::Socket(e.to_string())),
                None => return Ok(None),
            }
        }
    }
}

/// Outbound half of a socket.
pub struct SocketSender {
    sink: SplitSink<WebSocket, Message>,
}

#[async_trait]
impl MessageSender for SocketSender {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| TransportError::Socket(e.to_string()))
    }

    async fn send_close(&mut self, frame: CloseFrame) -> Result<(), TransportError> {
        let close = WsCloseFrame {
            code: frame.code,
            reason: frame.reason.into(),
        };
        self.sink
            .send(Message::Close(Some(close)))
            .await
            .map_err(|e| TransportError::Socket(e.to_string()))
    }
}

/// Classify one socket message. `None` means the message is handled at
/// this layer and the session never sees it.
fn frame_from_message(msg: Message) -> Option<Frame> {
    match msg {
        Message::Text(text) => Some(Frame::Text {
            payload: text.as_bytes().to_vec(),
            is_final: true,
        }),
        Message::Binary(data) => Some(Frame::Binary(data.to_vec())),
        Message::Close(frame) => Some(Frame::Close(frame.map(|f| CloseFrame {
            code: f.code,
            reason: f.reason.as_str().to_owned(),
        }))),
        Message::Ping(_) | Message::Pong(_) => None,
    }
}
