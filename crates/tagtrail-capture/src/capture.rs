//! Stateful capture driver: config + store + provider

use crate::evaluate::{clear_stored, evaluate_detailed, CapturePath};
use crate::{AttributionConsumer, AttributionProvider, CaptureConfig, PageContext};
use std::fmt::Display;
use tagtrail_domain::{AttributionRecord, PersistentKeyStore};

/// Drives capture triggers against a store and publishes the result
///
/// Every method that evaluates takes `&mut self`, so two triggers can never
/// interleave: each one finishes its store writes before its record is
/// published and before the next one starts.
///
/// # Examples
///
/// ```
/// use tagtrail_capture::{AttributionCapture, CaptureConfig, PageContext};
/// use tagtrail_store::MemoryStore;
///
/// let mut capture = AttributionCapture::new(CaptureConfig::default(), MemoryStore::new());
/// let consumer = capture.subscribe();
///
/// let page = PageContext::new("https://shop.example/?utm_source=news");
/// capture.on_navigate(Some(&page));
/// assert_eq!(consumer.get().get("utm_source"), Some("news"));
///
/// // Later visit without parameters recalls the stored value
/// capture.on_navigate(Some(&PageContext::new("https://shop.example/cart")));
/// assert_eq!(consumer.get().get("utm_source"), Some("news"));
/// ```
pub struct AttributionCapture<S> {
    config: CaptureConfig,
    store: S,
    provider: AttributionProvider,
    last_path: Option<CapturePath>,
}

impl<S> AttributionCapture<S>
where
    S: PersistentKeyStore,
    S::Error: Display,
{
    /// Create a capture; nothing is evaluated until the first trigger
    pub fn new(config: CaptureConfig, store: S) -> Self {
        Self {
            config,
            store,
            provider: AttributionProvider::new(),
            last_path: None,
        }
    }

    /// Run one trigger (mount or navigation) and publish its record
    pub fn on_navigate(&mut self, page: Option<&PageContext>) -> AttributionRecord {
        let evaluation = evaluate_detailed(&self.config, page, &mut self.store);
        self.last_path = Some(evaluation.path);
        self.provider.publish(evaluation.record.clone());
        evaluation.record
    }

    /// Apply a new configuration
    ///
    /// A changed configuration counts as a trigger and republishes. An
    /// identical one is a no-op and returns the current record.
    pub fn reconfigure(&mut self, config: CaptureConfig, page: Option<&PageContext>) -> AttributionRecord {
        if config == self.config {
            return self.provider.current();
        }
        tracing::debug!("Capture configuration changed, re-evaluating");
        self.config = config;
        self.on_navigate(page)
    }

    /// Delete stored entries (see [`clear_stored`])
    ///
    /// The published record is left as is; the next trigger reflects the
    /// cleared store.
    pub fn clear(&mut self, names: Option<&[String]>) {
        clear_stored(&mut self.store, names);
    }

    /// Currently published record
    pub fn current(&self) -> AttributionRecord {
        self.provider.current()
    }

    /// Create a consumer of the published record
    pub fn subscribe(&self) -> AttributionConsumer {
        self.provider.subscribe()
    }

    /// Path taken by the most recent trigger, if any has run
    pub fn last_path(&self) -> Option<CapturePath> {
        self.last_path
    }

    /// Active configuration
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Underlying store, mutably (for backend-specific operations)
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Tear down, returning the store
    pub fn into_store(self) -> S {
        self.store
    }
}
