//! Shutdown coordination.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Every long-running task subscribes and stops when the signal arrives.
/// Subscribe before anything can call [`Shutdown::trigger`]: a receiver
/// created after the trigger never sees the broadcast and must check
/// [`Shutdown::is_triggered`] instead.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Only the first call has an effect.
    pub fn trigger(&self) {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!(subscribers = self.tx.receiver_count(), "Shutdown triggered");
        let _ = self.tx.send(());
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once the signal is received (or the sender is gone).
///
/// `rx` must have been subscribed before the trigger.
pub async fn wait(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_subscribers_are_released() {
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let task = tokio::spawn(wait(rx));

        shutdown.trigger();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_receiver_subscribed_before_trigger_from_another_task() {
        let shutdown = std::sync::Arc::new(Shutdown::new());
        let rx = shutdown.subscribe();

        let trigger = std::sync::Arc::clone(&shutdown);
        tokio::spawn(async move { trigger.trigger() }).await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), wait(rx))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_late_receiver_misses_broadcast() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let late = shutdown.subscribe();
        assert!(tokio::time::timeout(Duration::from_millis(50), wait(late))
            .await
            .is_err());
        assert!(shutdown.is_triggered());
    }
}
