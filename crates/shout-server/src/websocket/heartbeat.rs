//! Periodic heartbeat emission for a session.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use shout_core::protocol::HEARTBEAT_PAYLOAD;

use super::session::Outbound;

/// Background task that enqueues a heartbeat message on a fixed schedule.
///
/// The first heartbeat fires after the initial delay, every interval
/// thereafter. A firing that cannot be delivered is logged and the
/// schedule keeps running.
pub struct Heartbeat {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Heartbeat {
    /// Spawn the heartbeat task writing into `tx`.
    pub fn start(tx: mpsc::Sender<Outbound>, initial_delay: Duration, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(tx, initial_delay, interval, cancel.clone()));
        Self {
            cancel,
            task: Some(task),
        }
    }

    /// Stop the schedule and wait for the task to finish.
    ///
    /// A firing already in flight completes its delivery attempt before
    /// the task exits, so no heartbeat can be sent after this returns.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(
    tx: mpsc::Sender<Outbound>,
    initial_delay: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    tokio::select! {
        () = time::sleep(initial_delay) => {}
        () = cancel.cancelled() => return,
    }

    // The first tick completes immediately and is the post-delay firing.
    let mut ticker = time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if tx.send(Outbound::Text(HEARTBEAT_PAYLOAD.to_string())).await.is_err() {
                    warn!("heartbeat could not be delivered");
                }
            }
            () = cancel.cancelled() => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_payloads(rx: &mut mpsc::Receiver<Outbound>) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(item) = rx.try_recv() {
            if let Outbound::Text(text) = item {
                out.push(text);
            }
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn fires_on_schedule() {
        let (tx, mut rx) = mpsc::channel(8);
        let hb = Heartbeat::start(tx, Duration::from_secs(1), Duration::from_secs(10));

        // Firings land at t=1, t=11, t=21.
        time::sleep(Duration::from_secs(25)).await;
        hb.stop().await;

        let sent = text_payloads(&mut rx);
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|p| p == "HEARTBEAT"));
    }

    #[tokio::test(start_paused = true)]
    async fn respects_initial_delay() {
        let (tx, mut rx) = mpsc::channel(8);
        let hb = Heartbeat::start(tx, Duration::from_secs(1), Duration::from_secs(10));

        time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(600)).await;
        assert_eq!(text_payloads(&mut rx).len(), 1);

        hb.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_prevents_later_firings() {
        let (tx, mut rx) = mpsc::channel(8);
        let hb = Heartbeat::start(tx, Duration::from_secs(1), Duration::from_secs(10));

        time::sleep(Duration::from_secs(5)).await;
        hb.stop().await;
        time::sleep(Duration::from_secs(60)).await;

        assert_eq!(text_payloads(&mut rx).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_first_firing_sends_nothing() {
        let (tx, mut rx) = mpsc::channel(8);
        let hb = Heartbeat::start(tx, Duration::from_secs(1), Duration::from_secs(10));

        time::sleep(Duration::from_millis(100)).await;
        hb.stop().await;
        time::sleep(Duration::from_secs(30)).await;

        assert!(text_payloads(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_waits_for_in_flight_delivery() {
        let (tx, mut rx) = mpsc::channel(1);
        // Fill the queue so the first firing blocks mid-send.
        tx.send(Outbound::Text("filler".into())).await.unwrap();

        let hb = Heartbeat::start(tx, Duration::from_secs(1), Duration::from_secs(10));
        time::sleep(Duration::from_secs(2)).await;

        let stopper = tokio::spawn(hb.stop());
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!stopper.is_finished());

        // Draining the queue lets the blocked delivery finish, which in
        // turn lets stop() resolve.
        assert!(matches!(rx.recv().await, Some(Outbound::Text(t)) if t == "filler"));
        stopper.await.unwrap();
        assert!(matches!(rx.recv().await, Some(Outbound::Text(t)) if t == "HEARTBEAT"));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_queue_does_not_kill_the_schedule() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let mut hb = Heartbeat::start(tx, Duration::from_secs(1), Duration::from_secs(10));
        time::sleep(Duration::from_secs(45)).await;

        // Several firings failed by now. The task must still be running
        // and exit cleanly, not by panic.
        hb.cancel.cancel();
        let task = hb.task.take();
        task.unwrap().await.unwrap();
    }
}
