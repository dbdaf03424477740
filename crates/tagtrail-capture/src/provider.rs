//! Reactive value provider for the published attribution record
//!
//! Backed by a `tokio::sync::watch` channel: every consumer sees the latest
//! record, starting from an empty one, and can wait for republication.

use tagtrail_domain::AttributionRecord;
use tokio::sync::watch;

/// Holds the published record and hands out consumers
#[derive(Debug)]
pub struct AttributionProvider {
    tx: watch::Sender<AttributionRecord>,
}

impl AttributionProvider {
    /// Create a provider publishing an empty record
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AttributionRecord::default());
        Self { tx }
    }

    /// Replace the published record and notify consumers
    ///
    /// Succeeds whether or not anyone is subscribed.
    pub fn publish(&self, record: AttributionRecord) {
        self.tx.send_replace(record);
    }

    /// Snapshot of the currently published record
    pub fn current(&self) -> AttributionRecord {
        self.tx.borrow().clone()
    }

    /// Create a consumer that observes this provider
    pub fn subscribe(&self) -> AttributionConsumer {
        AttributionConsumer {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live consumers
    pub fn consumer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AttributionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a provider's record
///
/// Consumers may be cloned and moved to other tasks or threads.
#[derive(Debug, Clone)]
pub struct AttributionConsumer {
    rx: watch::Receiver<AttributionRecord>,
}

impl AttributionConsumer {
    /// Latest published record
    pub fn get(&self) -> AttributionRecord {
        self.rx.borrow().clone()
    }

    /// Latest published record, marking it as seen
    pub fn get_and_mark_seen(&mut self) -> AttributionRecord {
        self.rx.borrow_and_update().clone()
    }

    /// True if a record was published since this consumer last marked one seen
    ///
    /// Returns false once the provider is gone.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next publication
    ///
    /// Returns `None` once the provider has been dropped.
    pub async fn changed(&mut self) -> Option<AttributionRecord> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
