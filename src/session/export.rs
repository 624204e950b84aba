//! Session export - write a jar back out in the session file format.
//!
//! The output is the same URL → cookie string mapping that
//! [`load_session_cookies`](crate::session::loader::load_session_cookies) reads.

use crate::base::context::IoResultExt;
use crate::base::sessionerror::SessionError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::monster::CookieMonster;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use time::OffsetDateTime;

/// Group the live cookies of `monster` by origin and render each group as a
/// cookie string.
///
/// Secure cookies are keyed under `https://`, the rest under `http://`.
pub fn export_session(monster: &CookieMonster) -> Result<BTreeMap<String, String>, SessionError> {
    let now = OffsetDateTime::now_utc();
    let mut groups: BTreeMap<String, Vec<CanonicalCookie>> = BTreeMap::new();

    for cookie in monster.iter_all_cookies() {
        if cookie.is_expired(now) {
            continue;
        }
        let scheme = if cookie.secure { "https" } else { "http" };
        groups
            .entry(format!("{}://{}/", scheme, cookie.domain))
            .or_default()
            .push(cookie);
    }

    let mut session = BTreeMap::new();
    for (url, mut cookies) in groups {
        cookies.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.name.cmp(&b.name)));

        let mut lines = Vec::with_capacity(cookies.len());
        for cookie in &cookies {
            let parsed = cookie
                .to_parsed()
                .map_err(|e| SessionError::Serialize(e.to_string()))?;
            lines.push(parsed.to_string());
        }
        session.insert(url, lines.join("; "));
    }

    Ok(session)
}

/// Save the cookies of `monster` to a session file at `path`.
///
/// # Example
/// ```ignore
/// export::save_session_cookies(&jar, Path::new("session.json"))?;
/// ```
pub fn save_session_cookies(monster: &CookieMonster, path: &Path) -> Result<(), SessionError> {
    let session = export_session(monster)?;
    let json = serde_json::to_string_pretty(&session)?;
    fs::write(path, json).write_context(path)?;

    tracing::debug!(path = %path.display(), origins = session.len(), "session saved");
    Ok(())
}
