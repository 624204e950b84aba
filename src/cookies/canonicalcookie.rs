use crate::cookies::date;
use crate::cookies::parsedcookie::ParsedCookie;
use crate::cookies::psl;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use url::{Host, Url};

/// A cookie as stored in the jar, with its scope resolved against the URL it
/// was set for. Modeled after Chromium's `net::CanonicalCookie`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    /// Lower-case, without a leading dot.
    pub domain: String,
    pub path: String,
    pub creation_time: OffsetDateTime,
    /// `None` for session cookies.
    pub expiration_time: Option<OffsetDateTime>,
    pub last_access_time: OffsetDateTime,
    pub secure: bool,
    pub http_only: bool,
    pub host_only: bool,
}

/// What a parsed cookie asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDisposition {
    Store(CanonicalCookie),
    /// Already expired: drop any stored cookie with this name, domain and path.
    Delete {
        name: String,
        domain: String,
        path: String,
    },
    /// Not acceptable for this URL.
    Reject(&'static str),
}

impl CanonicalCookie {
    pub fn new(
        name: String,
        value: String,
        domain: String,
        path: String,
        creation_time: OffsetDateTime,
        expiration_time: Option<OffsetDateTime>,
    ) -> Self {
        Self {
            name,
            value,
            domain,
            path,
            creation_time,
            expiration_time,
            last_access_time: creation_time,
            secure: false,
            http_only: false,
            host_only: true, // Default to host-only if not specified
        }
    }

    /// Resolve a parsed cookie against the URL it was captured for
    /// (RFC 6265 section 5.3).
    pub fn from_parsed(parsed: &ParsedCookie, url: &Url, now: OffsetDateTime) -> CookieDisposition {
        if !matches!(url.scheme(), "http" | "https") {
            return CookieDisposition::Reject("scheme does not carry cookies");
        }
        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h.to_ascii_lowercase(),
            _ => return CookieDisposition::Reject("URL has no host"),
        };
        let host_is_ip = !matches!(url.host(), Some(Host::Domain(_)));

        let (domain, host_only) = match parsed.domain.as_deref() {
            Some(d) if !d.is_empty() => {
                let d = d.trim_start_matches('.').to_ascii_lowercase();
                if host_is_ip {
                    // IP hosts only accept a Domain equal to themselves.
                    if d != host {
                        return CookieDisposition::Reject("domain attribute on IP host");
                    }
                    (host, true)
                } else if d == host && psl::is_public_suffix(&d) {
                    // A public suffix naming the host itself degrades to host-only.
                    (host, true)
                } else if psl::is_valid_cookie_domain(&d, &host) {
                    (d, false)
                } else {
                    return CookieDisposition::Reject("domain does not cover host");
                }
            }
            _ => (host, true),
        };

        let path = match parsed.path.as_deref() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(url),
        };

        let expiration_time = match (parsed.max_age, parsed.expires) {
            (Some(secs), _) if secs > 0 => Some(
                now.checked_add(Duration::seconds(secs))
                    .unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc()),
            ),
            (None, None) => None,
            (None, Some(expires)) if expires > now => Some(expires),
            _ => {
                return CookieDisposition::Delete {
                    name: parsed.name.clone(),
                    domain,
                    path,
                }
            }
        };

        let mut cookie = CanonicalCookie::new(
            parsed.name.clone(),
            parsed.value.clone(),
            domain,
            path,
            now,
            expiration_time,
        );
        cookie.secure = parsed.secure;
        cookie.http_only = parsed.http_only;
        cookie.host_only = host_only;

        CookieDisposition::Store(cookie)
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expiration_time {
            expiry <= current_time
        } else {
            false // Session cookie
        }
    }

    /// Convert back into the record form used by the session file.
    /// Domain cookies keep their `Domain` attribute; expiry is written as an
    /// absolute `Expires` date.
    pub fn to_parsed(&self) -> Result<ParsedCookie, time::error::Format> {
        let raw_expires = self
            .expiration_time
            .map(date::format_cookie_date)
            .transpose()?;

        let mut parsed = ParsedCookie::new(self.name.clone(), self.value.clone());
        parsed.path = Some(self.path.clone());
        parsed.domain = (!self.host_only).then(|| self.domain.clone());
        parsed.expires = raw_expires.as_deref().and_then(date::parse_cookie_date);
        parsed.raw_expires = raw_expires;
        parsed.secure = self.secure;
        parsed.http_only = self.http_only;
        parsed.raw = parsed.to_string();
        Ok(parsed)
    }
}

/// RFC 6265 section 5.1.4 default-path: the request path up to, but not
/// including, its right-most `/`, or `/` when that leaves nothing.
pub fn default_path(url: &Url) -> String {
    let path = url.path();
    if !path.starts_with('/') {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::parser::parse_cookie_string;

    fn resolve(line: &str, url: &str, now: OffsetDateTime) -> CookieDisposition {
        let parsed = parse_cookie_string(line).remove(0);
        CanonicalCookie::from_parsed(&parsed, &Url::parse(url).unwrap(), now)
    }

    fn stored(line: &str, url: &str) -> CanonicalCookie {
        match resolve(line, url, OffsetDateTime::now_utc()) {
            CookieDisposition::Store(c) => c,
            other => panic!("Expected Store, got {:?}", other),
        }
    }

    #[test]
    fn test_host_only_by_default() {
        let c = stored("sid=1", "https://Example.com/account/login");
        assert_eq!(c.domain, "example.com");
        assert!(c.host_only);
        assert_eq!(c.path, "/account");
        assert_eq!(c.expiration_time, None);
    }

    #[test]
    fn test_domain_attribute() {
        let c = stored("sid=1; Domain=.Example.com; Path=/", "https://www.example.com/");
        assert_eq!(c.domain, "example.com");
        assert!(!c.host_only);
        assert_eq!(c.path, "/");
    }

    #[test]
    fn test_rejects_foreign_and_public_suffix_domains() {
        let now = OffsetDateTime::now_utc();
        assert!(matches!(
            resolve("a=1; Domain=other.com", "https://example.com/", now),
            CookieDisposition::Reject(_)
        ));
        assert!(matches!(
            resolve("a=1; Domain=com", "https://example.com/", now),
            CookieDisposition::Reject(_)
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let now = OffsetDateTime::now_utc();
        assert!(matches!(
            resolve("a=1", "ftp://example.com/", now),
            CookieDisposition::Reject(_)
        ));
    }

    #[test]
    fn test_ip_host() {
        let c = stored("a=1; Domain=127.0.0.1", "http://127.0.0.1:8080/");
        assert!(c.host_only);
        let now = OffsetDateTime::now_utc();
        assert!(matches!(
            resolve("a=1; Domain=0.0.1", "http://127.0.0.1/", now),
            CookieDisposition::Reject(_)
        ));
    }

    #[test]
    fn test_public_suffix_host_degrades_to_host_only() {
        let c = stored("a=1; Domain=co.uk", "http://co.uk/");
        assert_eq!(c.domain, "co.uk");
        assert!(c.host_only);
    }

    #[test]
    fn test_relative_path_uses_default() {
        let c = stored("a=1; Path=docs", "https://example.com/a/b/c");
        assert_eq!(c.path, "/a/b");
    }

    #[test]
    fn test_max_age_sets_expiration() {
        let now = OffsetDateTime::now_utc();
        match resolve("a=1; Max-Age=60", "https://example.com/", now) {
            CookieDisposition::Store(c) => {
                assert_eq!(c.expiration_time, Some(now + Duration::seconds(60)));
            }
            other => panic!("Expected Store, got {:?}", other),
        }
    }

    #[test]
    fn test_max_age_wins_over_expires() {
        let now = OffsetDateTime::now_utc();
        let line = "a=1; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=60";
        assert!(matches!(
            resolve(line, "https://example.com/", now),
            CookieDisposition::Store(_)
        ));
    }

    #[test]
    fn test_expired_cookies_become_deletes() {
        let now = OffsetDateTime::now_utc();
        assert!(matches!(
            resolve("a=1; Max-Age=0", "https://example.com/", now),
            CookieDisposition::Delete { .. }
        ));
        match resolve(
            "a=1; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            "https://example.com/",
            now,
        ) {
            CookieDisposition::Delete { name, domain, path } => {
                assert_eq!(name, "a");
                assert_eq!(domain, "example.com");
                assert_eq!(path, "/");
            }
            other => panic!("Expected Delete, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_max_age_saturates() {
        let c = stored("a=1; Max-Age=9223372036854775807", "https://example.com/");
        assert!(c.expiration_time.is_some());
    }

    #[test]
    fn test_default_path() {
        let url = |s: &str| Url::parse(s).unwrap();
        assert_eq!(default_path(&url("https://example.com")), "/");
        assert_eq!(default_path(&url("https://example.com/")), "/");
        assert_eq!(default_path(&url("https://example.com/file")), "/");
        assert_eq!(default_path(&url("https://example.com/dir/")), "/dir");
        assert_eq!(default_path(&url("https://example.com/dir/file")), "/dir");
    }

    #[test]
    fn test_to_parsed_keeps_scope() {
        let c = stored(
            "sid=1; Domain=example.com; Path=/app; Max-Age=3600; Secure; HttpOnly",
            "https://example.com/",
        );
        let parsed = c.to_parsed().unwrap();
        assert_eq!(parsed.domain.as_deref(), Some("example.com"));
        assert_eq!(parsed.path.as_deref(), Some("/app"));
        assert!(parsed.raw_expires.is_some());
        assert!(parsed.secure && parsed.http_only);
        assert_eq!(parsed.max_age, None);

        let host_only = stored("a=1", "https://example.com/").to_parsed().unwrap();
        assert_eq!(host_only.domain, None);
        assert_eq!(host_only.raw_expires, None);
    }
}
