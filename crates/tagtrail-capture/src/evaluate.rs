//! Per-trigger capture decision
//!
//! One call to [`evaluate`] is one mount/navigation trigger. It runs to
//! completion synchronously, including every store write, and returns the
//! record to publish.

use crate::{CaptureConfig, PageContext};
use std::fmt::Display;
use tagtrail_domain::{AttributionRecord, PersistentKeyStore};

/// How a trigger arrived at its record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapturePath {
    /// No page context was available
    NoContext,

    /// Consent is required and was not given
    ConsentDenied,

    /// The user agent signalled do-not-track
    DoNotTrack,

    /// Parameters came from the URL and were written to the store
    Fresh,

    /// Parameters were recalled from the store
    Recalled,
}

impl CapturePath {
    /// Get the path name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CapturePath::NoContext => "no_context",
            CapturePath::ConsentDenied => "consent_denied",
            CapturePath::DoNotTrack => "do_not_track",
            CapturePath::Fresh => "fresh",
            CapturePath::Recalled => "recalled",
        }
    }

    /// True for the paths that bypass the URL and the store entirely
    pub fn is_gated(&self) -> bool {
        matches!(
            self,
            CapturePath::NoContext | CapturePath::ConsentDenied | CapturePath::DoNotTrack
        )
    }
}

impl std::fmt::Display for CapturePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Record to publish
    pub record: AttributionRecord,

    /// Which branch produced it
    pub path: CapturePath,
}

impl Evaluation {
    fn gated(path: CapturePath) -> Self {
        Self {
            record: AttributionRecord::new(),
            path,
        }
    }
}

/// Run one capture trigger and return the record to publish
///
/// See [`evaluate_detailed`] for the decision order.
pub fn evaluate<S>(config: &CaptureConfig, page: Option<&PageContext>, store: &mut S) -> AttributionRecord
where
    S: PersistentKeyStore,
    S::Error: Display,
{
    evaluate_detailed(config, page, store).record
}

/// Run one capture trigger, reporting which path was taken
///
/// Gates are checked in order and short-circuit:
///
/// 1. No page context → empty
/// 2. Consent required but not given → empty, store untouched
/// 3. Do-not-track active → empty, store untouched
/// 4. Configured names are read from the query string
/// 5. If the referrer gate passes and anything was found, every found pair
///    is written to the store and published ([`CapturePath::Fresh`])
/// 6. Otherwise each configured name is read back from the store
///    ([`CapturePath::Recalled`])
///
/// Store failures never surface: a failed write is skipped and a failed read
/// counts as absent. Both are logged.
pub fn evaluate_detailed<S>(
    config: &CaptureConfig,
    page: Option<&PageContext>,
    store: &mut S,
) -> Evaluation
where
    S: PersistentKeyStore,
    S::Error: Display,
{
    let Some(page) = page else {
        tracing::debug!("No page context, publishing empty attribution");
        return Evaluation::gated(CapturePath::NoContext);
    };

    if !config.tracking_allowed() {
        tracing::debug!("Consent required and not given, capture bypassed");
        return Evaluation::gated(CapturePath::ConsentDenied);
    }

    if page.do_not_track() {
        tracing::debug!("Do-not-track active, capture bypassed");
        return Evaluation::gated(CapturePath::DoNotTrack);
    }

    let found = page.extract(&config.capture_params);
    let referrer_ok = !config.require_referrer || page.has_referrer();

    if referrer_ok && !found.is_empty() {
        persist(store, &found, config.expiry_days);
        tracing::info!("Captured {} attribution parameter(s) from URL", found.len());
        return Evaluation {
            record: found,
            path: CapturePath::Fresh,
        };
    }

    if !found.is_empty() {
        tracing::debug!(
            "Ignoring {} URL parameter(s): referrer required but absent",
            found.len()
        );
    }

    let recalled = recall(store, &config.capture_params);
    tracing::debug!("Recalled {} attribution parameter(s) from store", recalled.len());
    Evaluation {
        record: recalled,
        path: CapturePath::Recalled,
    }
}

fn persist<S>(store: &mut S, record: &AttributionRecord, expiry_days: u32)
where
    S: PersistentKeyStore,
    S::Error: Display,
{
    for (name, value) in record.iter() {
        if let Err(e) = store.set(name, value, expiry_days) {
            tracing::warn!("Failed to store attribution parameter {}: {}", name, e);
        }
    }
}

fn recall<S>(store: &S, names: &[String]) -> AttributionRecord
where
    S: PersistentKeyStore,
    S::Error: Display,
{
    let mut record = AttributionRecord::new();
    for name in names {
        match store.get(name) {
            Ok(Some(value)) if !value.is_empty() => {
                record.insert(name.clone(), value);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to read attribution parameter {}: {}", name, e);
            }
        }
    }
    record
}

/// Explicitly delete stored attribution entries
///
/// With non-empty `names` (bare or prefixed), deletes exactly those entries;
/// otherwise deletes every prefixed entry. Never fails: a backend error is
/// logged and the call becomes a no-op.
pub fn clear_stored<S>(store: &mut S, names: Option<&[String]>)
where
    S: PersistentKeyStore,
    S::Error: Display,
{
    match store.clear(names) {
        Ok(()) => match names {
            Some(names) if !names.is_empty() => {
                tracing::info!("Cleared {} named attribution entry(s)", names.len());
            }
            _ => tracing::info!("Cleared all attribution entries"),
        },
        Err(e) => tracing::warn!("Failed to clear attribution entries: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtrail_store::MemoryStore;

    #[test]
    fn test_no_context_is_empty() {
        let mut store = MemoryStore::new();
        store.set("source", "news", 30).unwrap();

        let eval = evaluate_detailed(&CaptureConfig::default(), None, &mut store);
        assert_eq!(eval.path, CapturePath::NoContext);
        assert!(eval.record.is_empty());
    }

    #[test]
    fn test_do_not_track_bypasses_store() {
        let mut store = MemoryStore::new();
        store.set("source", "news", 30).unwrap();
        let page = PageContext::new("/?utm_source=new").with_do_not_track(true);

        let eval = evaluate_detailed(&CaptureConfig::default(), Some(&page), &mut store);
        assert_eq!(eval.path, CapturePath::DoNotTrack);
        assert!(eval.record.is_empty());
        assert_eq!(store.get("source").unwrap().as_deref(), Some("news"));
    }

    #[test]
    fn test_custom_param_is_namespaced_in_store() {
        let mut store = MemoryStore::new();
        let config = CaptureConfig::default().with_capture_params(["gclid"]);
        let page = PageContext::new("/?gclid=abc");

        let record = evaluate(&config, Some(&page), &mut store);
        assert_eq!(record.get("gclid"), Some("abc"));
        assert_eq!(store.get_raw("utm_gclid"), Some("abc"));

        let recalled = evaluate(&config, Some(&PageContext::new("/")), &mut store);
        assert_eq!(recalled, record);
    }

    #[test]
    fn test_unconfigured_params_ignored() {
        let mut store = MemoryStore::new();
        let config = CaptureConfig::default().with_capture_params(["utm_source"]);
        let page = PageContext::new("/?utm_medium=email");

        let eval = evaluate_detailed(&config, Some(&page), &mut store);
        assert_eq!(eval.path, CapturePath::Recalled);
        assert!(eval.record.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_path_names() {
        assert_eq!(CapturePath::Fresh.to_string(), "fresh");
        assert!(CapturePath::ConsentDenied.is_gated());
        assert!(!CapturePath::Recalled.is_gated());
    }
}
