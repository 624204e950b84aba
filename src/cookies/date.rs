//! `Expires` date handling.
//!
//! Two layouts are recognized, both with a short weekday and a trailing zone:
//!
//! | Layout | Example |
//! |--------|---------|
//! | RFC 1123 | `Wed, 09 Jun 2021 10:18:14 GMT` |
//! | Legacy cookie date | `Wed, 09-Jun-2021 10:18:14 GMT` |
//!
//! The hour may be written with one digit. A zone is `UTC`, `GMT` with an
//! optional signed hour offset (`GMT+3`), a bare signed hour (`+05`) or an
//! upper-case abbreviation: any three letters, four letters ending in `T`
//! (or `WITA`), five letters ending in `T`, plus `ChST` and `MeST`.
//! Abbreviations and bare signed hours carry no reliable offset and are read
//! as UTC; only the `GMT` form shifts the instant.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

const RFC1123_STAMP: &[BorrowedFormatItem<'static>] = format_description!(
    "[day] [month repr:short case_sensitive:false] [year] [hour padding:none]:[minute]:[second]"
);

const LEGACY_STAMP: &[BorrowedFormatItem<'static>] = format_description!(
    "[day]-[month repr:short case_sensitive:false]-[year] [hour padding:none]:[minute]:[second]"
);

const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Parse an `Expires` value, trying RFC 1123 first and the legacy
/// dash-separated layout second. Returns the instant in UTC.
pub fn parse_cookie_date(value: &str) -> Option<OffsetDateTime> {
    let (weekday, rest) = value.split_once(", ")?;
    if !is_weekday(weekday) {
        return None;
    }

    let (stamp, zone) = rest.rsplit_once(' ')?;
    let offset = zone_offset(zone)?;

    [RFC1123_STAMP, LEGACY_STAMP]
        .into_iter()
        .find_map(|layout| PrimitiveDateTime::parse(stamp, layout).ok())
        .map(|at| at.assume_offset(offset).to_offset(UtcOffset::UTC))
}

/// Render an instant as an RFC 1123 date in GMT, the form `parse_cookie_date` reads back.
pub fn format_cookie_date(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(HTTP_DATE)
}

fn is_weekday(token: &str) -> bool {
    WEEKDAYS.iter().any(|day| token.eq_ignore_ascii_case(day))
}

/// The offset a zone token stands for, or `None` if it is not a zone.
fn zone_offset(zone: &str) -> Option<UtcOffset> {
    if matches!(zone, "UTC" | "ChST" | "MeST") {
        return Some(UtcOffset::UTC);
    }
    if let Some(rest) = zone.strip_prefix("GMT") {
        if rest.is_empty() {
            return Some(UtcOffset::UTC);
        }
        return UtcOffset::from_hms(signed_hours(rest)?, 0, 0).ok();
    }
    if zone.starts_with(|c| c == '+' || c == '-') {
        return signed_hours(zone).map(|_| UtcOffset::UTC);
    }

    let shaped = match zone.len() {
        3 => true,
        4 => zone.ends_with('T') || zone == "WITA",
        5 => zone.ends_with('T'),
        _ => false,
    };
    (shaped && zone.bytes().all(|b| b.is_ascii_uppercase())).then_some(UtcOffset::UTC)
}

/// `+h`/`-hh` style hour offset, at most 23 hours.
fn signed_hours(text: &str) -> Option<i8> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u8 = digits.parse().ok()?;
    (hours <= 23).then(|| sign * hours as i8)
}
