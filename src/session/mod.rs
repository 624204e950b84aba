//! Session loading and export.
//!
//! - [`loader`]: read a URL → cookie string JSON file into a cookie store
//! - [`options`]: loader configuration
//! - [`export`]: write a jar back out in the same format

pub mod export;
pub mod loader;
pub mod options;
