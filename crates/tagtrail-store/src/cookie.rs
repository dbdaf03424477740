//! Cookie wire format for attribution entries
//!
//! Each entry is written as
//! `utm_<name>=<url-encoded value>; Expires=<IMF-fixdate>; Path=/; SameSite=Lax; Secure`.
//! Deletion writes an empty value with an expiry at the Unix epoch.

use chrono::{DateTime, Utc};
use tagtrail_domain::{namespaced, StoredEntry};

/// Attributes appended to every attribution cookie
pub const COOKIE_ATTRIBUTES: &str = "Path=/; SameSite=Lax; Secure";

/// Expiry used to delete a cookie
pub const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Format an instant as an HTTP IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn format_expires(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Render a `Set-Cookie` value that stores `entry`
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tagtrail_domain::StoredEntry;
/// use tagtrail_store::cookie::encode_set_cookie;
///
/// let at = Utc.with_ymd_and_hms(2024, 4, 2, 9, 15, 0).unwrap();
/// let entry = StoredEntry::new("source", "spring sale", at);
/// assert_eq!(
///     encode_set_cookie(&entry),
///     "utm_source=spring%20sale; Expires=Tue, 02 Apr 2024 09:15:00 GMT; Path=/; SameSite=Lax; Secure"
/// );
/// ```
pub fn encode_set_cookie(entry: &StoredEntry) -> String {
    format!(
        "{}={}; Expires={}; {}",
        namespaced(&entry.name),
        urlencoding::encode(&entry.value),
        format_expires(entry.expires_at),
        COOKIE_ATTRIBUTES
    )
}

/// Render a `Set-Cookie` value that deletes the named cookie
pub fn encode_deletion(name: &str) -> String {
    format!(
        "{}=; Expires={}; {}",
        namespaced(name),
        EPOCH_EXPIRES,
        COOKIE_ATTRIBUTES
    )
}

/// Parse a `Cookie:` request header into `(name, decoded value)` pairs
///
/// Pairs without `=` or with an empty name are skipped. Values that are not
/// valid percent-encoded UTF-8 are kept verbatim.
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), decode_value(value.trim())))
        })
        .collect()
}

fn decode_value(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_expires() {
        let at = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(format_expires(at), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let entry = StoredEntry::new("utm_campaign", "a=b;c&d", at);
        let line = encode_set_cookie(&entry);
        assert!(line.starts_with("utm_campaign=a%3Db%3Bc%26d; "));
        assert!(line.ends_with("Path=/; SameSite=Lax; Secure"));
    }

    #[test]
    fn test_encode_deletion_namespaces() {
        assert_eq!(
            encode_deletion("medium"),
            "utm_medium=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Path=/; SameSite=Lax; Secure"
        );
    }

    #[test]
    fn test_parse_cookie_header() {
        let pairs = parse_cookie_header("session=abc; utm_source=spring%20sale;utm_medium=email; junk; =x");
        assert_eq!(
            pairs,
            vec![
                ("session".to_string(), "abc".to_string()),
                ("utm_source".to_string(), "spring sale".to_string()),
                ("utm_medium".to_string(), "email".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_undecodable_value() {
        let pairs = parse_cookie_header("utm_term=%FF%FE");
        assert_eq!(pairs, vec![("utm_term".to_string(), "%FF%FE".to_string())]);
    }

    #[test]
    fn test_parse_empty_header() {
        assert!(parse_cookie_header("").is_empty());
    }
}
