//! Page context - what a capture trigger can see about the current page

use tagtrail_domain::AttributionRecord;
use url::Url;

// Resolves relative locations such as `/landing?utm_source=x`
const RELATIVE_BASE: &str = "http://localhost/";

/// Snapshot of the page at trigger time
///
/// Hosts without a page concept (server-side rendering, background jobs)
/// pass no context at all; see [`evaluate`](crate::evaluate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    location: String,
    referrer: String,
    do_not_track: bool,
}

impl PageContext {
    /// Context for a location (absolute URL or path with query)
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            referrer: String::new(),
            do_not_track: false,
        }
    }

    /// Set the document referrer
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    /// Set the do-not-track preference directly
    pub fn with_do_not_track(mut self, active: bool) -> Self {
        self.do_not_track = active;
        self
    }

    /// Set the do-not-track preference from a raw signal (`navigator.doNotTrack` or a `DNT` header)
    ///
    /// Only `"1"` counts as active; `"0"`, `"unspecified"` and absence do not.
    pub fn with_do_not_track_signal(self, signal: Option<&str>) -> Self {
        self.with_do_not_track(signal.map(str::trim) == Some("1"))
    }

    /// The page location
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The referrer, empty when none
    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    /// True when a non-empty referrer is present
    pub fn has_referrer(&self) -> bool {
        !self.referrer.is_empty()
    }

    /// True when the user agent asks not to be tracked
    pub fn do_not_track(&self) -> bool {
        self.do_not_track
    }

    /// First value for `name` in the query string, if present and non-empty
    ///
    /// Follows `URLSearchParams.get`: `+` decodes to a space, percent escapes
    /// are decoded, and the fragment is ignored. A location that cannot be
    /// parsed has no parameters.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = self.parse_location()?;
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    /// Collect the named parameters that are present and non-empty
    ///
    /// Parses the location once; names missing from the query are skipped.
    pub fn extract(&self, names: &[String]) -> AttributionRecord {
        let Some(url) = self.parse_location() else {
            return AttributionRecord::new();
        };

        let mut found = AttributionRecord::new();
        for name in names {
            let value = url
                .query_pairs()
                .find(|(key, _)| key == name.as_str())
                .map(|(_, value)| value.into_owned());
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                found.insert(name.clone(), value);
            }
        }
        found
    }

    fn parse_location(&self) -> Option<Url> {
        let base = Url::parse(RELATIVE_BASE).ok()?;
        match Url::options().base_url(Some(&base)).parse(&self.location) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Unparseable page location {:?}: {}", self.location, e);
                None
            }
        }
    }
}
