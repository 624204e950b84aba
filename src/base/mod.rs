//! Base types and error handling.
//!
//! - [`SessionError`](sessionerror::SessionError): failures surfaced by session loading and export
//! - [`IoResultExt`](context::IoResultExt): path context for IO results

pub mod context;
pub mod sessionerror;
