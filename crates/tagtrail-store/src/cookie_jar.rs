//! Cookie jar store backend

use crate::cookie::{encode_deletion, encode_set_cookie, parse_cookie_header};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tagtrail_domain::entry::expiry_from;
use tagtrail_domain::{is_namespaced, namespaced, Clock, PersistentKeyStore, StoredEntry, SystemClock};

#[derive(Debug, Clone)]
struct JarCookie {
    value: String,
    // Cookies received in a request header carry no expiry; the user agent
    // only sends live ones.
    expires_at: Option<DateTime<Utc>>,
}

/// Browser cookie jar model implementing [`PersistentKeyStore`]
///
/// Seeded from a `Cookie:` request header. Every write or deletion is
/// applied to the jar immediately and queued as a `Set-Cookie` line that a
/// host returns to the user agent.
///
/// # Examples
///
/// ```
/// use tagtrail_domain::PersistentKeyStore;
/// use tagtrail_store::CookieJarStore;
///
/// let mut jar = CookieJarStore::from_cookie_header("sid=1; utm_source=news");
/// assert_eq!(jar.get("source").unwrap().as_deref(), Some("news"));
///
/// jar.clear(None).unwrap();
/// let headers = jar.take_set_cookie_headers();
/// assert_eq!(headers.len(), 1);
/// assert!(headers[0].starts_with("utm_source=; Expires=Thu, 01 Jan 1970"));
/// ```
pub struct CookieJarStore {
    cookies: HashMap<String, JarCookie>,
    pending: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl CookieJarStore {
    /// Create an empty jar on the given clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            cookies: HashMap::new(),
            pending: Vec::new(),
            clock,
        }
    }

    /// Build a jar from a `Cookie:` request header on the wall clock
    pub fn from_cookie_header(header: &str) -> Self {
        Self::from_cookie_header_with_clock(header, Arc::new(SystemClock))
    }

    /// Build a jar from a `Cookie:` request header on the given clock
    ///
    /// When a name repeats, the first occurrence wins, as with `document.cookie`.
    pub fn from_cookie_header_with_clock(header: &str, clock: Arc<dyn Clock>) -> Self {
        let mut jar = Self::with_clock(clock);
        for (name, value) in parse_cookie_header(header) {
            jar.cookies.entry(name).or_insert(JarCookie {
                value,
                expires_at: None,
            });
        }
        jar
    }

    /// Read any cookie verbatim, without namespacing
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        let now = self.clock.now();
        self.cookies
            .get(name)
            .filter(|cookie| cookie.expires_at.map_or(true, |at| now < at))
            .map(|cookie| cookie.value.as_str())
    }

    /// Pending `Set-Cookie` lines, in write order, without draining them
    pub fn set_cookie_headers(&self) -> &[String] {
        &self.pending
    }

    /// Drain the pending `Set-Cookie` lines
    pub fn take_set_cookie_headers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    fn remove(&mut self, key: &str) {
        self.cookies.remove(key);
        self.pending.push(encode_deletion(key));
    }
}

impl Default for CookieJarStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl PersistentKeyStore for CookieJarStore {
    type Error = Infallible;

    fn set(&mut self, name: &str, value: &str, expiry_days: u32) -> Result<(), Self::Error> {
        let entry = StoredEntry::new(name, value, expiry_from(self.clock.now(), expiry_days));
        self.pending.push(encode_set_cookie(&entry));
        self.cookies.insert(
            entry.name,
            JarCookie {
                value: entry.value,
                expires_at: Some(entry.expires_at),
            },
        );
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get_raw(&namespaced(name)).map(str::to_string))
    }

    fn clear(&mut self, names: Option<&[String]>) -> Result<(), Self::Error> {
        let targets: Vec<String> = match names {
            Some(names) if !names.is_empty() => {
                names.iter().map(|name| namespaced(name).into_owned()).collect()
            }
            _ => {
                let mut keys: Vec<String> =
                    self.cookies.keys().filter(|key| is_namespaced(key)).cloned().collect();
                keys.sort();
                keys
            }
        };

        for key in targets {
            self.remove(&key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tagtrail_domain::ManualClock;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 18, 0, 0).unwrap())
    }

    #[test]
    fn test_set_queues_wire_line() {
        let clock = clock();
        let mut jar = CookieJarStore::with_clock(Arc::new(clock.clone()));
        jar.set("campaign", "launch week", 30).unwrap();

        assert_eq!(
            jar.set_cookie_headers(),
            ["utm_campaign=launch%20week; Expires=Mon, 11 Mar 2024 18:00:00 GMT; Path=/; SameSite=Lax; Secure"]
        );
        assert_eq!(jar.get("utm_campaign").unwrap().as_deref(), Some("launch week"));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let jar = CookieJarStore::from_cookie_header("utm_source=a; utm_source=b");
        assert_eq!(jar.get("source").unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn test_written_cookie_expires() {
        let clock = clock();
        let mut jar = CookieJarStore::with_clock(Arc::new(clock.clone()));
        jar.set("source", "news", 1).unwrap();

        clock.advance(Duration::days(2));
        assert_eq!(jar.get("source").unwrap(), None);
    }

    #[test]
    fn test_clear_named_emits_deletion_even_if_absent() {
        let mut jar = CookieJarStore::from_cookie_header("utm_source=news");
        jar.clear(Some(&["term".to_string()])).unwrap();

        assert_eq!(jar.get("source").unwrap().as_deref(), Some("news"));
        let headers = jar.take_set_cookie_headers();
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("utm_term=;"));
        assert!(jar.set_cookie_headers().is_empty());
    }

    #[test]
    fn test_clear_all_leaves_unrelated_cookies() {
        let mut jar = CookieJarStore::from_cookie_header("theme=dark; utm_medium=email; utm_source=news");
        jar.clear(None).unwrap();

        assert_eq!(jar.get_raw("theme"), Some("dark"));
        assert_eq!(jar.get("medium").unwrap(), None);
        let headers = jar.take_set_cookie_headers();
        assert_eq!(headers.len(), 2);
        assert!(headers[0].starts_with("utm_medium=;"));
        assert!(headers[1].starts_with("utm_source=;"));
    }
}
