use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// One cookie definition recovered from a raw cookie string.
/// Modeled after Chromium's `net::ParsedCookie`: attributes are kept as
/// written, nothing is validated against a request URL yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedCookie {
    pub name: String,
    /// Cookie value with one pair of surrounding double quotes removed.
    pub value: String,
    /// The definition exactly as it appeared in the input, attributes included.
    pub raw: String,
    pub secure: bool,
    pub http_only: bool,
    pub domain: Option<String>,
    pub path: Option<String>,
    /// `-1` means the cookie expires immediately.
    pub max_age: Option<i64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires: Option<OffsetDateTime>,
    pub raw_expires: Option<String>,
    pub unparsed_attributes: Vec<String>,
}

impl ParsedCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Whether the definition asks for the cookie to be removed rather than stored.
    pub fn expires_immediately(&self) -> bool {
        self.max_age.is_some_and(|secs| secs < 0)
    }

    /// Compare everything except `raw`, which differs whenever the same cookie
    /// is written out with different spacing or attribute order.
    pub fn same_cookie(&self, other: &ParsedCookie) -> bool {
        ParsedCookie {
            raw: String::new(),
            ..self.clone()
        } == ParsedCookie {
            raw: String::new(),
            ..other.clone()
        }
    }
}

/// Renders the cookie as a `Set-Cookie` line that parses back to the same record.
impl fmt::Display for ParsedCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parsing strips one pair of quotes.
        if self.value.len() > 1 && self.value.starts_with('"') && self.value.ends_with('"') {
            write!(f, "{}=\"{}\"", self.name, self.value)?;
        } else {
            write!(f, "{}={}", self.name, self.value)?;
        }
        if let Some(path) = &self.path {
            write!(f, "; Path={}", path)?;
        }
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={}", domain)?;
        }
        if let Some(expires) = &self.raw_expires {
            write!(f, "; Expires={}", expires)?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age.max(0))?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        for attr in &self.unparsed_attributes {
            write!(f, "; {}", attr)?;
        }
        Ok(())
    }
}
