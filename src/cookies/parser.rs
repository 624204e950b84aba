//! Lenient cookie-string parser.
//!
//! Turns a captured cookie string such as
//! `sid=abc; Path=/; HttpOnly; theme="dark"; Max-Age=3600` into
//! [`ParsedCookie`] records. Parsing never fails: a definition without a
//! name is dropped, an attribute that cannot be understood is kept verbatim
//! in [`ParsedCookie::unparsed_attributes`].
//!
//! # Grouping
//!
//! The input is split on `;`. The first `name=value` segment always starts a
//! cookie, whatever its name. After that, a segment belongs to the preceding
//! cookie when it has no `=` or when its key is an attribute name (`Path`,
//! `Domain`, `Expires`, `Max-Age`, `Secure`, `HttpOnly`, and the attributes
//! listed in [`PRESERVED_ATTRIBUTES`]). Every other segment starts a new cookie.

use crate::cookies::date::parse_cookie_date;
use crate::cookies::parsedcookie::ParsedCookie;

/// Attributes that populate a field of [`ParsedCookie`].
pub const RECOGNIZED_ATTRIBUTES: [&str; 6] =
    ["secure", "httponly", "domain", "max-age", "expires", "path"];

/// Attribute names that are grouped with their cookie but only kept verbatim.
pub const PRESERVED_ATTRIBUTES: [&str; 8] = [
    "samesite",
    "priority",
    "partitioned",
    "comment",
    "commenturl",
    "version",
    "discard",
    "port",
];

/// Parse every cookie definition in `raw`, in input order.
pub fn parse_cookie_string(raw: &str) -> Vec<ParsedCookie> {
    let input = raw.trim();
    let mut cookies = Vec::new();
    let mut current: Option<Definition<'_>> = None;
    let mut seen_pair = false;

    for (start, segment) in segments(input) {
        let opens_input = !seen_pair && segment.contains('=');
        seen_pair |= opens_input;

        if !opens_input && is_attribute_segment(segment) {
            match current.as_mut() {
                Some(definition) => definition.push_attribute(start, segment),
                None => tracing::debug!(segment = %segment, "attribute without a cookie, dropped"),
            }
            continue;
        }

        if let Some(definition) = current.take() {
            cookies.push(definition.finish(input));
        }
        current = Definition::begin(start, segment);
        if current.is_none() {
            tracing::debug!(segment = %segment, "cookie without a name, dropped");
        }
    }

    if let Some(definition) = current {
        cookies.push(definition.finish(input));
    }

    cookies
}

/// A cookie definition being assembled: its `name=value` segment and the
/// attribute segments that follow it.
struct Definition<'a> {
    start: usize,
    end: usize,
    name: &'a str,
    value: &'a str,
    attributes: Vec<&'a str>,
}

impl<'a> Definition<'a> {
    fn begin(start: usize, segment: &'a str) -> Option<Self> {
        let (name, value) = segment.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            start,
            end: start + segment.len(),
            name,
            value: value.trim(),
            attributes: Vec::new(),
        })
    }

    fn push_attribute(&mut self, start: usize, segment: &'a str) {
        self.end = start + segment.len();
        self.attributes.push(segment);
    }

    fn finish(self, input: &str) -> ParsedCookie {
        let mut cookie = ParsedCookie::new(self.name, unquote(self.value));
        cookie.raw = input[self.start..self.end].to_string();

        for fragment in self.attributes {
            if !apply_attribute(&mut cookie, fragment) {
                cookie.unparsed_attributes.push(fragment.to_string());
            }
        }

        cookie
    }
}

/// Apply one attribute fragment to `cookie`. Returns false when the fragment
/// is not a recognized attribute or its value fails the attribute's rule.
fn apply_attribute(cookie: &mut ParsedCookie, fragment: &str) -> bool {
    let (attr, val) = fragment.split_once('=').unwrap_or((fragment, ""));

    match attr.trim().to_ascii_lowercase().as_str() {
        "secure" => cookie.secure = true,
        "httponly" => cookie.http_only = true,
        "domain" => cookie.domain = Some(val.to_string()),
        "path" => cookie.path = Some(val.to_string()),
        "max-age" => match parse_max_age(val) {
            Some(secs) => cookie.max_age = Some(secs),
            None => return false,
        },
        "expires" => {
            cookie.raw_expires = Some(val.to_string());
            cookie.expires = parse_cookie_date(val);
        }
        _ => return false,
    }

    true
}

/// `Max-Age` must be a plain integer without a leading zero. Zero and
/// negative values collapse to `-1`.
fn parse_max_age(val: &str) -> Option<i64> {
    let secs: i64 = val.parse().ok()?;
    if secs != 0 && val.starts_with('0') {
        return None;
    }
    Some(if secs <= 0 { -1 } else { secs })
}

/// Strip one pair of surrounding double quotes.
fn unquote(value: &str) -> &str {
    if value.len() > 1 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn is_attribute_segment(segment: &str) -> bool {
    match segment.split_once('=') {
        Some((key, _)) => is_attribute_name(key.trim()),
        None => true,
    }
}

fn is_attribute_name(key: &str) -> bool {
    RECOGNIZED_ATTRIBUTES
        .iter()
        .chain(PRESERVED_ATTRIBUTES.iter())
        .any(|name| key.eq_ignore_ascii_case(name))
}

/// Non-empty `;`-separated segments, trimmed, with their byte offset in `input`.
fn segments(input: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    input.split(';').filter_map(move |piece| {
        let piece_start = offset;
        offset += piece.len() + 1;

        let trimmed = piece.trim();
        if trimmed.is_empty() {
            return None;
        }
        let leading = piece.len() - piece.trim_start().len();
        Some((piece_start + leading, trimmed))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cookie() {
        let cookies = parse_cookie_string("sid=abc123");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "sid");
        assert_eq!(cookies[0].value, "abc123");
        assert_eq!(cookies[0].raw, "sid=abc123");
        assert!(!cookies[0].secure);
        assert!(!cookies[0].http_only);
        assert!(cookies[0].unparsed_attributes.is_empty());
    }

    #[test]
    fn test_raw_spans_attributes() {
        let cookies = parse_cookie_string("  a=1;  Path=/ ; Secure; b=2  ");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].raw, "a=1;  Path=/ ; Secure");
        assert_eq!(cookies[1].raw, "b=2");
    }

    #[test]
    fn test_value_keeps_equals_signs() {
        let cookies = parse_cookie_string("token=a=b==");
        assert_eq!(cookies[0].name, "token");
        assert_eq!(cookies[0].value, "a=b==");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"v\""), "v");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"v"), "\"v");
        assert_eq!(unquote("v"), "v");
    }

    #[test]
    fn test_attribute_values_are_not_unquoted() {
        let cookies = parse_cookie_string("a=\"1\"; Path=\"/x\"");
        assert_eq!(cookies[0].value, "1");
        assert_eq!(cookies[0].path.as_deref(), Some("\"/x\""));
    }

    #[test]
    fn test_max_age_rules() {
        assert_eq!(parse_max_age("3600"), Some(3600));
        assert_eq!(parse_max_age("+5"), Some(5));
        assert_eq!(parse_max_age("0"), Some(-1));
        assert_eq!(parse_max_age("-5"), Some(-1));
        assert_eq!(parse_max_age("01"), None);
        assert_eq!(parse_max_age(""), None);
        assert_eq!(parse_max_age(" 5"), None);
        assert_eq!(parse_max_age("abc"), None);
        assert_eq!(parse_max_age("99999999999999999999"), None);
    }

    #[test]
    fn test_segments_offsets() {
        let input = "a=1; ;b";
        let found: Vec<_> = segments(input).collect();
        assert_eq!(found, vec![(0, "a=1"), (6, "b")]);
    }

    #[test]
    fn test_attribute_classification() {
        assert!(is_attribute_segment("Secure"));
        assert!(is_attribute_segment("PATH=/"));
        assert!(is_attribute_segment("SameSite=Lax"));
        assert!(is_attribute_segment("whatever"));
        assert!(!is_attribute_segment("session=1"));
    }

    #[test]
    fn test_first_pair_is_a_cookie_even_with_attribute_name() {
        let cookies = parse_cookie_string("Secure; version=1; Path=/; b=2");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name, "version");
        assert_eq!(cookies[0].value, "1");
        assert_eq!(cookies[0].path.as_deref(), Some("/"));
        assert_eq!(cookies[0].raw, "version=1; Path=/");
        assert_eq!(cookies[1].name, "b");
    }

    #[test]
    fn test_attributes_after_nameless_cookie_are_dropped() {
        let cookies = parse_cookie_string("a=1; =orphan; Path=/x; b=2");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name, "a");
        assert_eq!(cookies[0].path, None);
        assert_eq!(cookies[1].name, "b");
    }
}
