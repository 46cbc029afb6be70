//! Refresh notifications between the form and the views that depend on it.
//!
//! Each successful ticket creation advances a generation counter and
//! broadcasts one [`RefreshEvent`]. Every subscriber receives every event
//! once, so a single creation triggers exactly one re-fetch per view.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;

/// Events buffered per subscriber before it starts lagging
const CHANNEL_CAPACITY: usize = 64;

/// Notification that server-side ticket data changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshEvent {
    /// Generation reached by this notification, starting at 1
    pub generation: u64,
}

/// Session-wide refresh signal. Cloning shares the same signal.
#[derive(Debug, Clone)]
pub struct RefreshSignal {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    sender: broadcast::Sender<RefreshEvent>,
    generation: AtomicU64,
}

impl RefreshSignal {
    pub fn new() -> Self {
        let (sender, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                sender,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Advance the generation and notify every subscriber
    pub fn notify(&self) -> RefreshEvent {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let event = RefreshEvent { generation };
        match self.inner.sender.send(event) {
            Ok(receivers) => tracing::debug!(generation, receivers, "refresh signalled"),
            Err(_) => tracing::debug!(generation, "refresh signalled with no subscribers"),
        }
        event
    }

    /// Receive every refresh notified after this call
    pub fn subscribe(&self) -> broadcast::Receiver<RefreshEvent> {
        self.inner.sender.subscribe()
    }

    /// Current generation (0 until the first notification)
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}
