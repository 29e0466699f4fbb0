//! The connection session: receive loop, uppercase echo, and teardown.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use shout_core::{
    protocol, CloseFrame, Frame, FrameReceiver, MessageAssembler, MessageSender,
    ProtocolViolation, SessionError, TransportError,
};

use super::heartbeat::Heartbeat;
use crate::config::SessionConfig;

/// An item queued for the writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A complete text message.
    Text(String),
    /// A close frame. The writer sends it and stops.
    Close(CloseFrame),
}

/// Drive one connection from accept to teardown.
///
/// Incoming text is reassembled, uppercased, and echoed back. The exact
/// message `"close"` ends the session with a normal close instead of an
/// echo. Binary and unrecognized frames end it with a policy close, and
/// a transport failure ends it with no close at all. A heartbeat runs
/// alongside the loop for the life of the session.
///
/// Whichever path ends the loop, the heartbeat is stopped and the
/// writer drained before this returns, so nothing is written after
/// teardown.
#[instrument(skip_all, fields(session_id = %session_id))]
pub async fn run_session<R, S>(
    mut receiver: R,
    sender: S,
    session_id: String,
    config: SessionConfig,
) -> Result<(), SessionError>
where
    R: FrameReceiver,
    S: MessageSender + 'static,
{
    let (send_tx, send_rx) = mpsc::channel::<Outbound>(config.send_queue);
    let writer = spawn_writer(sender, send_rx);
    let heartbeat = Heartbeat::start(
        send_tx.clone(),
        config.heartbeat_initial_delay,
        config.heartbeat_interval,
    );
    let mut assembler = MessageAssembler::new(config.max_message_size);

    info!("client connected");

    let result = loop {
        let frame = match receiver.recv().await {
            Ok(Some(frame)) => frame,
            Ok(None) => break Err(SessionError::Transport(TransportError::Closed)),
            Err(e) => break Err(SessionError::Transport(e)),
        };

        match frame {
            Frame::Text { payload, is_final } => match assembler.push(&payload, is_final) {
                Ok(Some(message)) => {
                    debug!(len = message.len(), "message assembled");
                    if message == protocol::CLOSE_SENTINEL {
                        let _ = send_tx.send(Outbound::Close(CloseFrame::normal())).await;
                        break Ok(());
                    }
                    let echo = Outbound::Text(message.to_uppercase());
                    if send_tx.send(echo).await.is_err() {
                        break Err(SessionError::Transport(TransportError::SendQueueClosed));
                    }
                }
                Ok(None) => {}
                Err(violation) => break close_on_violation(&send_tx, violation).await,
            },
            Frame::Binary(_) => {
                break close_on_violation(&send_tx, ProtocolViolation::BinaryUnsupported).await;
            }
            Frame::Close(_) => {
                let _ = send_tx.send(Outbound::Close(CloseFrame::normal())).await;
                break Ok(());
            }
            Frame::Other => {
                break close_on_violation(&send_tx, ProtocolViolation::UnknownFrameKind).await;
            }
        }
    };

    // Teardown runs on every exit path: the heartbeat must be gone
    // before the queue closes and the writer drains.
    heartbeat.stop().await;
    drop(send_tx);
    let _ = writer.await;

    match &result {
        Ok(()) => info!("session closed"),
        Err(SessionError::Protocol(violation)) => {
            warn!(%violation, "session closed on protocol violation");
        }
        Err(SessionError::Transport(failure)) => {
            info!(%failure, "session ended by transport");
        }
    }
    result
}

/// Enqueue the violation's close frame best-effort and fail the session.
async fn close_on_violation(
    send_tx: &mpsc::Sender<Outbound>,
    violation: ProtocolViolation,
) -> Result<(), SessionError> {
    let _ = send_tx.send(Outbound::Close(violation.close_frame())).await;
    Err(SessionError::Protocol(violation))
}

/// Single writer task. Owning the sender here serializes echoes,
/// heartbeats, and close frames into one ordered stream.
fn spawn_writer<S>(mut sender: S, mut rx: mpsc::Receiver<Outbound>) -> JoinHandle<()>
where
    S: MessageSender + 'static,
{
    tokio::spawn(async move {
        while let Some(item) = rx.recv().await {
            match item {
                Outbound::Text(text) => {
                    if sender.send_text(text).await.is_err() {
                        break;
                    }
                }
                Outbound::Close(frame) => {
                    // The peer may already be closing, which makes this
                    // send fail. Our side is done either way.
                    let _ = sender.send_close(frame).await;
                    break;
                }
            }
        }
    })
}
