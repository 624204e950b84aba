use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::parsedcookie::ParsedCookie;
use url::Url;

/// The cookie jar a session is loaded into.
///
/// Implementations decide how cookies are indexed, merged and matched; the
/// loader only hands over the records parsed for each URL.
pub trait CookieStore: Send + Sync {
    /// Store `cookies` as if they had been received in a response from `url`.
    fn set_cookies(&self, url: &Url, cookies: Vec<ParsedCookie>);

    /// Cookies that a request to `url` should carry.
    fn cookies_for(&self, url: &Url) -> Vec<CanonicalCookie>;
}
