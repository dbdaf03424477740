//! Integration tests for tagtrail-store
//!
//! These tests exercise every backend through the PersistentKeyStore trait.

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use tagtrail_domain::{Clock, ManualClock, PersistentKeyStore};
use tagtrail_store::{CookieJarStore, MemoryStore, SqliteStore};
use tempfile::TempDir;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap())
}

/// Shared contract checks, run against each backend
fn check_namespacing<S: PersistentKeyStore>(store: &mut S)
where
    S::Error: std::fmt::Debug,
{
    store.set("source", "a", 30).unwrap();
    assert_eq!(store.get("utm_source").unwrap().as_deref(), Some("a"));

    store.set("utm_source", "b", 30).unwrap();
    assert_eq!(store.get("source").unwrap().as_deref(), Some("b"));
    assert_eq!(store.get("source").unwrap(), store.get("utm_source").unwrap());
}

fn check_expiry<S: PersistentKeyStore>(store: &mut S, clock: &ManualClock, days: u32)
where
    S::Error: std::fmt::Debug,
{
    store.set("medium", "email", days).unwrap();
    clock.advance(Duration::days(i64::from(days) - 1));
    assert_eq!(store.get("medium").unwrap().as_deref(), Some("email"));

    clock.advance(Duration::days(2));
    assert_eq!(store.get("medium").unwrap(), None, "entry must be absent after N+1 days");
}

fn check_clear_idempotent<S: PersistentKeyStore>(store: &mut S)
where
    S::Error: std::fmt::Debug,
{
    store.clear(Some(&["nothing_here".to_string()])).unwrap();
    store.clear(None).unwrap();
    store.clear(None).unwrap();
}

#[test]
fn test_memory_store_contract() {
    let clock = clock();
    let mut store = MemoryStore::with_clock(Arc::new(clock.clone()));
    check_namespacing(&mut store);
    check_expiry(&mut store, &clock, 30);
    check_clear_idempotent(&mut store);
}

#[test]
fn test_sqlite_store_contract() {
    let clock = clock();
    let mut store = SqliteStore::with_clock(":memory:", Arc::new(clock.clone())).unwrap();
    check_namespacing(&mut store);
    check_expiry(&mut store, &clock, 7);
    check_clear_idempotent(&mut store);
}

#[test]
fn test_cookie_jar_contract() {
    let clock = clock();
    let mut store = CookieJarStore::with_clock(Arc::new(clock.clone()));
    check_namespacing(&mut store);
    check_expiry(&mut store, &clock, 90);
    check_clear_idempotent(&mut store);
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tagtrail.db");
    let clock = clock();

    {
        let mut store = SqliteStore::with_clock(&path, Arc::new(clock.clone())).unwrap();
        store.set("campaign", "summer", 30).unwrap();
        store.put_raw("session", "s-1", clock.now() + Duration::days(1)).unwrap();
    }

    let mut store = SqliteStore::with_clock(&path, Arc::new(clock.clone())).unwrap();
    assert_eq!(store.get("campaign").unwrap().as_deref(), Some("summer"));

    store.clear(None).unwrap();
    assert_eq!(store.get("campaign").unwrap(), None);
    assert_eq!(store.get_raw("session").unwrap().as_deref(), Some("s-1"));
}

#[test]
fn test_clear_named_removes_exactly_those() {
    let clock = clock();
    let mut store = SqliteStore::with_clock(":memory:", Arc::new(clock.clone())).unwrap();
    for name in ["source", "medium", "campaign"] {
        store.set(name, "v", 30).unwrap();
    }

    store
        .clear(Some(&["utm_source".to_string(), "campaign".to_string()]))
        .unwrap();

    assert_eq!(store.get("source").unwrap(), None);
    assert_eq!(store.get("campaign").unwrap(), None);
    assert_eq!(store.get("medium").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_cookie_jar_round_trips_through_header() {
    let clock = clock();
    let mut first = CookieJarStore::with_clock(Arc::new(clock.clone()));
    first.set("content", "hero banner & footer", 30).unwrap();

    // A user agent would send back name=value only
    let set_cookie = first.take_set_cookie_headers().remove(0);
    let pair = set_cookie.split(';').next().unwrap();

    let second = CookieJarStore::from_cookie_header_with_clock(&format!("other=1; {}", pair), Arc::new(clock));
    assert_eq!(second.get("utm_content").unwrap().as_deref(), Some("hero banner & footer"));
}
