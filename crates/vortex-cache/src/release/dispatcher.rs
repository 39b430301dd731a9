//! Background delivery of release messages to listeners.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::message::{ReleaseEnvelope, ReleaseMessageListener};

/// Handle for controlling a running dispatcher.
pub struct DispatcherHandle {
    /// Sender to signal shutdown.
    shutdown_tx: watch::Sender<bool>,
    /// The dispatch task; yields the number of messages delivered.
    task: Option<JoinHandle<u64>>,
}

impl DispatcherHandle {
    /// Signals the dispatcher to stop.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Stops the dispatcher and waits for it to finish.
    ///
    /// Returns the number of messages delivered.
    pub async fn shutdown(mut self) -> u64 {
        self.stop();
        match self.task.take() {
            Some(task) => task.await.unwrap_or(0),
            None => 0,
        }
    }

    /// Waits until the inbound channel closes and every queued message
    /// has been delivered.
    pub async fn join(mut self) -> u64 {
        match self.task.take() {
            Some(task) => task.await.unwrap_or(0),
            None => 0,
        }
    }
}

impl Drop for DispatcherHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Delivers each incoming release message to every listener, in arrival
/// order.
pub struct ReleaseMessageDispatcher {
    listeners: Vec<Arc<dyn ReleaseMessageListener>>,
}

impl ReleaseMessageDispatcher {
    pub fn new(listeners: Vec<Arc<dyn ReleaseMessageListener>>) -> Self {
        Self { listeners }
    }

    /// Starts the dispatch task reading from `inbound`.
    ///
    /// The task ends when every sender of `inbound` is dropped or the
    /// returned handle is stopped.
    pub fn spawn(self, inbound: mpsc::Receiver<ReleaseEnvelope>) -> DispatcherHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(inbound, shutdown_rx));

        DispatcherHandle {
            shutdown_tx,
            task: Some(task),
        }
    }

    async fn run(
        self,
        mut inbound: mpsc::Receiver<ReleaseEnvelope>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> u64 {
        info!(
            listeners = self.listeners.len(),
            "Starting release message dispatcher"
        );
        let mut delivered = 0;

        loop {
            tokio::select! {
                envelope = inbound.recv() => {
                    let Some(envelope) = envelope else {
                        info!("Release message channel closed");
                        break;
                    };
                    self.deliver(&envelope).await;
                    delivered += 1;
                }
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        info!("Release message dispatcher shutting down");
                        break;
                    }
                }
            }
        }

        delivered
    }

    async fn deliver(&self, envelope: &ReleaseEnvelope) {
        debug!(
            id = envelope.message.id,
            topic = %envelope.topic,
            watch_key = %envelope.message.message,
            "Dispatching release message"
        );

        for listener in &self.listeners {
            listener
                .handle_message(&envelope.message, &envelope.topic)
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::ReleaseMessage;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        seen: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl ReleaseMessageListener for RecordingListener {
        async fn handle_message(&self, message: &ReleaseMessage, topic: &str) {
            self.seen
                .lock()
                .push((message.message.clone(), topic.to_string()));
        }
    }

    #[tokio::test]
    async fn test_delivers_to_every_listener_in_order() {
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let listeners: Vec<Arc<dyn ReleaseMessageListener>> = vec![first.clone(), second.clone()];
        let dispatcher = ReleaseMessageDispatcher::new(listeners);

        let (tx, rx) = mpsc::channel(16);
        let handle = dispatcher.spawn(rx);

        tx.send(ReleaseEnvelope::release(1, "a+default+ns")).await.unwrap();
        tx.send(ReleaseEnvelope::release(2, "b+default+ns")).await.unwrap();
        drop(tx);

        assert_eq!(handle.join().await, 2);

        for listener in [&first, &second] {
            let seen = listener.seen.lock();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[0].0, "a+default+ns");
            assert_eq!(seen[1].0, "b+default+ns");
        }
    }

    #[tokio::test]
    async fn test_shutdown_stops_dispatcher() {
        let listener = Arc::new(RecordingListener::default());
        let listeners: Vec<Arc<dyn ReleaseMessageListener>> = vec![listener.clone()];
        let dispatcher = ReleaseMessageDispatcher::new(listeners);

        let (_tx, rx) = mpsc::channel::<ReleaseEnvelope>(16);
        let handle = dispatcher.spawn(rx);

        assert_eq!(handle.shutdown().await, 0);
        assert!(listener.seen.lock().is_empty());
    }
}
