//! Cookie parsing and storage.
//!
//! - **Parsing**: lenient cookie-string parser ([`parse_cookie_string`](parser::parse_cookie_string))
//!   producing [`ParsedCookie`](parsedcookie::ParsedCookie) records
//! - **Storage**: in-memory cookie jar ([`CookieMonster`](monster::CookieMonster)) behind
//!   the [`CookieStore`](store::CookieStore) trait
//! - **Validation**: Public Suffix List checks for `Domain` attributes
//!
//! # Architecture
//!
//! | Chromium (C++) | sessionjar (Rust) | Responsibility |
//! |----------------|-------------------|----------------|
//! | `net::ParsedCookie` | [`ParsedCookie`](parsedcookie::ParsedCookie) | Attributes as written |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonicalcookie::CanonicalCookie) | Cookie scoped to a URL |
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | Cookie jar with LRU eviction |
//!
//! # Example
//!
//! ```rust
//! use sessionjar::cookies::monster::CookieMonster;
//! use sessionjar::cookies::parser::parse_cookie_string;
//! use sessionjar::cookies::store::CookieStore;
//! use url::Url;
//!
//! let jar = CookieMonster::new();
//! let url = Url::parse("https://example.com/").unwrap();
//! jar.set_cookies(&url, parse_cookie_string("sid=abc123; Path=/; HttpOnly"));
//!
//! assert_eq!(jar.cookie_header(&url).as_deref(), Some("sid=abc123"));
//! ```

pub mod canonicalcookie;
pub mod date;
pub mod monster;
pub mod parsedcookie;
pub mod parser;
pub mod psl;
pub mod store;
