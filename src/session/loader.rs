//! Session file loading.
//!
//! A session file is a JSON object mapping absolute URLs to the raw cookie
//! strings captured for them:
//!
//! ```json
//! {
//!   "https://example.com/": "sid=abc123; Path=/; HttpOnly; Max-Age=3600"
//! }
//! ```
//!
//! Only an unreadable file is fatal. Bad URL keys, non-string values and
//! malformed cookies are skipped and counted in [`LoadReport`].

use crate::base::context::IoResultExt;
use crate::base::sessionerror::SessionError;
use crate::cookies::monster::CookieMonster;
use crate::cookies::parser::parse_cookie_string;
use crate::cookies::store::CookieStore;
use crate::session::options::SessionOptions;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use url::Url;

/// Source name used in errors for sessions loaded from memory.
const INLINE_SOURCE: &str = "<inline>";

/// What a load pass did with the entries it found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries whose cookies were handed to the store.
    pub entries_loaded: usize,
    /// Entries whose key is not a valid URL.
    pub urls_skipped: usize,
    /// Entries whose value is not a JSON string.
    pub values_skipped: usize,
    /// Entries excluded by the host filter.
    pub entries_filtered: usize,
    /// Cookie records parsed across all loaded entries.
    pub cookies_parsed: usize,
    /// The file was not a JSON object and was treated as empty.
    pub decode_failed: bool,
}

/// Load the session file at `path` into a new [`CookieMonster`].
///
/// `None` or an empty path yields an empty jar. A file that cannot be read
/// is an error; anything wrong inside it is skipped.
///
/// # Example
/// ```no_run
/// use sessionjar::session::loader::load_session_cookies;
/// use std::path::Path;
///
/// let jar = load_session_cookies(Some(Path::new("session.json")))?;
/// println!("Loaded {} cookies", jar.total_cookie_count());
/// # Ok::<(), sessionjar::base::sessionerror::SessionError>(())
/// ```
pub fn load_session_cookies(path: Option<&Path>) -> Result<CookieMonster, SessionError> {
    SessionLoader::default().load(path).map(|(jar, _)| jar)
}

/// Loads session files into any [`CookieStore`].
#[derive(Debug, Clone, Default)]
pub struct SessionLoader {
    options: SessionOptions,
}

impl SessionLoader {
    pub fn new(options: SessionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Load `path` into a new [`CookieMonster`], returning the jar and the report.
    pub fn load(&self, path: Option<&Path>) -> Result<(CookieMonster, LoadReport), SessionError> {
        let jar = CookieMonster::new();
        let report = match path {
            Some(path) if !path.as_os_str().is_empty() => self.load_into(&jar, path)?,
            _ => LoadReport::default(),
        };
        Ok((jar, report))
    }

    /// Read the session file at `path` and add its cookies to `store`.
    pub fn load_into<S>(&self, store: &S, path: &Path) -> Result<LoadReport, SessionError>
    where
        S: CookieStore + ?Sized,
    {
        let contents = fs::read(path).read_context(path)?;
        self.load_bytes_into(store, &contents, path)
    }

    /// Add the cookies of an in-memory session document to `store`.
    pub fn load_str_into<S>(&self, store: &S, json: &str) -> Result<LoadReport, SessionError>
    where
        S: CookieStore + ?Sized,
    {
        self.load_bytes_into(store, json.as_bytes(), Path::new(INLINE_SOURCE))
    }

    fn load_bytes_into<S>(
        &self,
        store: &S,
        contents: &[u8],
        source: &Path,
    ) -> Result<LoadReport, SessionError>
    where
        S: CookieStore + ?Sized,
    {
        let mut report = LoadReport::default();

        let mapping: BTreeMap<String, Value> = match serde_json::from_slice(contents) {
            Ok(mapping) => mapping,
            Err(e) if self.options.strict_decode => {
                return Err(SessionError::malformed(source, e.to_string()));
            }
            Err(e) => {
                tracing::warn!(
                    path = %source.display(),
                    error = %e,
                    "session file is not a JSON object, continuing without cookies"
                );
                report.decode_failed = true;
                BTreeMap::new()
            }
        };

        for (raw_url, value) in mapping {
            let cookie_string = match value {
                Value::String(s) => s,
                _ if self.options.strict_decode => {
                    return Err(SessionError::malformed(
                        source,
                        format!("value for {} is not a string", raw_url),
                    ));
                }
                _ => {
                    tracing::debug!(url = %raw_url, "session entry value is not a string, skipped");
                    report.values_skipped += 1;
                    continue;
                }
            };

            let url = match Url::parse(&raw_url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!(url = %raw_url, error = %e, "session entry key is not a URL, skipped");
                    report.urls_skipped += 1;
                    continue;
                }
            };

            if !self.options.accepts_host(url.host_str().unwrap_or("")) {
                report.entries_filtered += 1;
                continue;
            }

            let cookies = parse_cookie_string(&cookie_string);
            report.cookies_parsed += cookies.len();
            store.set_cookies(&url, cookies);
            report.entries_loaded += 1;
        }

        tracing::debug!(
            path = %source.display(),
            entries = report.entries_loaded,
            cookies = report.cookies_parsed,
            skipped = report.urls_skipped + report.values_skipped,
            "session loaded"
        );

        Ok(report)
    }
}
