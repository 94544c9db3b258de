//! Run-wide stop coordination.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Latched, cooperative stop signal shared by all probe workers.
///
/// Workers poll [`StopSignal::is_triggered`] between attempts; long waits
/// (the scheduler's progress ticker) subscribe to the broadcast channel
/// instead of spinning.
pub struct StopSignal {
    triggered: AtomicBool,
    tx: broadcast::Sender<()>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            triggered: AtomicBool::new(false),
            tx,
        }
    }

    /// Latch the signal. Idempotent; later triggers are no-ops.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            let _ = self.tx.send(());
        }
    }

    /// Cheap poll, safe to call every attempt.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Subscribe for notification-style waiting.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_latches() {
        let stop = StopSignal::new();
        assert!(!stop.is_triggered());
        stop.trigger();
        assert!(stop.is_triggered());
        stop.trigger();
        assert!(stop.is_triggered());
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let stop = StopSignal::new();
        let mut rx = stop.subscribe();
        stop.trigger();
        assert!(rx.recv().await.is_ok());
    }
}
