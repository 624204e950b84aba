//! # sessionjar
//!
//! Restore captured browser sessions into a cookie jar.
//!
//! A session file maps URLs to the raw cookie strings captured for them.
//! `sessionjar` parses those strings leniently, resolves each cookie against
//! its URL and stores it in an in-memory jar, so later requests can carry the
//! session without logging in again.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sessionjar::session::loader::load_session_cookies;
//! use std::path::Path;
//! use url::Url;
//!
//! let jar = load_session_cookies(Some(Path::new("session.json")))?;
//! let url = Url::parse("https://example.com/").unwrap();
//! if let Some(header) = jar.cookie_header(&url) {
//!     println!("Cookie: {}", header);
//! }
//! # Ok::<(), sessionjar::base::sessionerror::SessionError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types
//! - [`cookies`] - Cookie parsing, canonicalization and storage
//! - [`session`] - Session file loading and export

pub mod base;
pub mod cookies;
pub mod session;
