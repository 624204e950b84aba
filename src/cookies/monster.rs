use crate::cookies::canonicalcookie::{CanonicalCookie, CookieDisposition};
use crate::cookies::parsedcookie::ParsedCookie;
use crate::cookies::parser::parse_cookie_string;
use crate::cookies::psl;
use crate::cookies::store::CookieStore;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Maximum cookies per domain (Chromium default).
const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
/// Chromium uses 3300, but we use a slightly lower limit to keep memory usage predictable.
const MAX_COOKIES_TOTAL: usize = 3000;

/// In-memory cookie jar that sessions are loaded into.
/// Modeled after Chromium's `net::CookieMonster`.
#[derive(Debug, Clone)]
pub struct CookieMonster {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl Default for CookieMonster {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieStore for CookieMonster {
    fn set_cookies(&self, url: &Url, cookies: Vec<ParsedCookie>) {
        let now = OffsetDateTime::now_utc();

        for parsed in cookies {
            match CanonicalCookie::from_parsed(&parsed, url, now) {
                CookieDisposition::Store(cookie) => self.set_canonical_cookie(cookie),
                CookieDisposition::Delete { name, domain, path } => {
                    self.delete_cookie(&domain, &name, &path);
                }
                CookieDisposition::Reject(reason) => {
                    tracing::debug!(url = %url, name = %parsed.name, reason, "cookie rejected");
                }
            }
        }
    }

    fn cookies_for(&self, url: &Url) -> Vec<CanonicalCookie> {
        self.get_cookies_for_url(url)
    }
}

impl CookieMonster {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        // Remove existing if name/domain/path match
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);

        // Enforce per-domain limit with LRU eviction
        while entry.len() >= MAX_COOKIES_PER_DOMAIN {
            if let Some(oldest_idx) = entry
                .iter()
                .enumerate()
                .min_by_key(|(_, c)| c.creation_time)
                .map(|(i, _)| i)
            {
                entry.remove(oldest_idx);
            } else {
                break;
            }
        }

        entry.push(cookie);
        drop(entry); // Release lock before checking global count

        self.enforce_global_limit();
    }

    /// Remove the cookie with this identity, if stored.
    pub fn delete_cookie(&self, domain: &str, name: &str, path: &str) -> bool {
        let mut removed = false;
        if let Some(mut entry) = self.store.get_mut(domain) {
            let before = entry.len();
            entry.retain(|c| c.name != name || c.path != path);
            removed = entry.len() != before;
        }
        self.store.remove_if(domain, |_, cookies| cookies.is_empty());
        removed
    }

    /// Parse a raw cookie string and store every cookie in it for `url`.
    pub fn parse_and_save_cookie(&self, url: &Url, cookie_line: &str) {
        self.set_cookies(url, parse_cookie_string(cookie_line));
    }

    /// Enforce the global cookie limit by evicting oldest cookies.
    fn enforce_global_limit(&self) {
        while self.total_cookie_count() > MAX_COOKIES_TOTAL {
            let mut oldest: Option<(String, usize, OffsetDateTime)> = None;

            for entry in self.store.iter() {
                for (idx, cookie) in entry.value().iter().enumerate() {
                    let older = oldest
                        .as_ref()
                        .map_or(true, |(_, _, oldest_time)| cookie.creation_time < *oldest_time);
                    if older {
                        oldest = Some((entry.key().clone(), idx, cookie.creation_time));
                    }
                }
            }

            match oldest {
                Some((domain, idx, _)) => {
                    if let Some(mut entry) = self.store.get_mut(&domain) {
                        if idx < entry.len() {
                            entry.remove(idx);
                        }
                    }
                }
                None => break,
            }
        }
    }

    /// Get cookies matching the URL with proper domain suffix matching.
    pub fn get_cookies_for_url(&self, url: &Url) -> Vec<CanonicalCookie> {
        let mut result = Vec::new();
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let now = OffsetDateTime::now_utc();

        for domain in Self::get_matching_domains(&host) {
            if let Some(entry) = self.store.get(&domain) {
                for cookie in entry.iter() {
                    if !Self::domain_matches(cookie, &host) {
                        continue;
                    }
                    if !Self::path_matches(&cookie.path, url.path()) {
                        continue;
                    }
                    if cookie.secure && url.scheme() != "https" {
                        continue;
                    }
                    if cookie.is_expired(now) {
                        continue;
                    }

                    result.push(cookie.clone());
                }
            }
        }

        // Sort by path length (longest first) then creation time
        result.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.creation_time.cmp(&b.creation_time))
        });

        result
    }

    /// The `Cookie` request header value for `url`, or `None` when no
    /// stored cookie applies.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.get_cookies_for_url(url);
        if cookies.is_empty() {
            return None;
        }

        let pairs: Vec<String> = cookies
            .iter()
            .map(|c| {
                cookie::Cookie::new(c.name.as_str(), c.value.as_str())
                    .stripped()
                    .to_string()
            })
            .collect();
        Some(pairs.join("; "))
    }

    /// Host-only cookies need an exact host; domain cookies also match sub-domains.
    fn domain_matches(cookie: &CanonicalCookie, request_host: &str) -> bool {
        if cookie.host_only {
            return cookie.domain.eq_ignore_ascii_case(request_host);
        }
        psl::domain_matches(request_host, &cookie.domain)
    }

    /// Check if request path matches cookie path.
    /// Implements RFC 6265 path matching.
    fn path_matches(cookie_path: &str, request_path: &str) -> bool {
        if request_path == cookie_path {
            return true;
        }

        if let Some(rest) = request_path.strip_prefix(cookie_path) {
            return cookie_path.ends_with('/') || rest.starts_with('/');
        }

        false
    }

    /// The host itself and all parent domains.
    fn get_matching_domains(host: &str) -> Vec<String> {
        let mut domains = vec![host.to_string()];

        // For "foo.bar.example.com", add "bar.example.com" and "example.com"
        let parts: Vec<&str> = host.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            domains.push(parts[i..].join("."));
        }

        domains
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterate over all cookies (for export).
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}
