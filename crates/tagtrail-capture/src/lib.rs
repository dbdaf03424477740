//! Tagtrail Capture
//!
//! Decides, once per mount/navigation trigger, whether attribution parameters
//! come from the current URL or from the durable store, writes fresh values
//! through, and publishes the result to consumers.
//!
//! # Overview
//!
//! - [`evaluate`]: the decision as a plain function over config, page and store
//! - [`AttributionCapture`]: owns config, store and provider; one call per trigger
//! - [`AttributionProvider`] / [`AttributionConsumer`]: reactive value holder
//! - [`CaptureConfig`]: parameter names, expiry, consent and referrer gates
//!
//! # Decision Order
//!
//! | Step | Condition | Result |
//! |------|-----------|--------|
//! | 1 | No page context | empty |
//! | 2 | Consent required, not given | empty, store untouched |
//! | 3 | Do-not-track active | empty, store untouched |
//! | 4 | Referrer gate passes and URL has parameters | write through, publish URL values |
//! | 5 | Otherwise | publish values recalled from store |
//!
//! # Usage
//!
//! ```
//! use tagtrail_capture::{evaluate, CaptureConfig, PageContext};
//! use tagtrail_domain::PersistentKeyStore;
//! use tagtrail_store::MemoryStore;
//!
//! let config = CaptureConfig::default();
//! let mut store = MemoryStore::new();
//!
//! let page = PageContext::new("https://shop.example/?utm_source=news&utm_medium=email");
//! let record = evaluate(&config, Some(&page), &mut store);
//!
//! assert_eq!(record.get("utm_source"), Some("news"));
//! assert_eq!(store.get("medium").unwrap().as_deref(), Some("email"));
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [capture]
//! capture_params = ["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content"]
//! expiry_days = 30
//! require_referrer = false
//! require_consent = false
//! consent_given = true
//! ```

#![warn(missing_docs)]

mod capture;
mod config;
mod error;
mod evaluate;
mod page;
mod provider;

pub use capture::AttributionCapture;
pub use config::{CaptureConfig, MAX_EXPIRY_DAYS};
pub use error::CaptureError;
pub use evaluate::{clear_stored, evaluate, evaluate_detailed, CapturePath, Evaluation};
pub use page::PageContext;
pub use provider::{AttributionConsumer, AttributionProvider};
