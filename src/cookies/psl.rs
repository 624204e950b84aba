//! Public Suffix List (PSL) checks for cookie `Domain` attributes.
//!
//! A captured session may carry `Domain=` values that would scope a cookie
//! to a public suffix such as `com` or `co.uk`. Those are refused.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate.

use psl::{List, Psl};

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.trim_end_matches('.').to_ascii_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        Some(suffix) => suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// Check if a cookie domain may be used by a response from `url_host`.
/// The host must equal the domain or be a sub-domain of it, and the domain
/// must not be a public suffix.
pub fn is_valid_cookie_domain(cookie_domain: &str, url_host: &str) -> bool {
    let cookie_domain = cookie_domain.strip_prefix('.').unwrap_or(cookie_domain);
    if cookie_domain.is_empty() || is_public_suffix(cookie_domain) {
        return false;
    }
    domain_matches(url_host, cookie_domain)
}

/// RFC 6265 domain-match: `host` equals `domain` or ends with `.domain`.
/// Comparison is ASCII case-insensitive.
pub fn domain_matches(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    host.len() > domain.len()
        && host.is_char_boundary(host.len() - domain.len())
        && host[host.len() - domain.len()..].eq_ignore_ascii_case(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_public_suffix() {
        assert!(is_public_suffix("com"));
        assert!(is_public_suffix("CO.UK"));
        assert!(!is_public_suffix("example.com"));
        assert!(!is_public_suffix("bbc.co.uk"));
    }

    #[test]
    fn test_valid_cookie_domain() {
        assert!(is_valid_cookie_domain("example.com", "example.com"));
        assert!(is_valid_cookie_domain(".example.com", "www.example.com"));
        assert!(!is_valid_cookie_domain("com", "example.com"));
        assert!(!is_valid_cookie_domain("co.uk", "bbc.co.uk"));
        assert!(!is_valid_cookie_domain("other.com", "example.com"));
        assert!(!is_valid_cookie_domain("", "example.com"));
    }

    #[test]
    fn test_domain_matches_requires_dot_boundary() {
        assert!(domain_matches("a.example.com", "example.com"));
        assert!(domain_matches("A.EXAMPLE.com", "example.COM"));
        assert!(!domain_matches("badexample.com", "example.com"));
        assert!(!domain_matches("example.com", "a.example.com"));
    }
}
