//! Ergonomic error context helpers.
//!
//! Extension traits for attaching the session file path to IO results,
//! converting them into context-rich `SessionError` variants.

use crate::base::sessionerror::SessionError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Attach the session file path to a read failure.
    ///
    /// # Example
    /// ```ignore
    /// use sessionjar::base::context::IoResultExt;
    ///
    /// let contents = std::fs::read(path).read_context(path)?;
    /// // Error: "Session file cookies.json could not be read: ..."
    /// ```
    fn read_context(self, path: &Path) -> Result<T, SessionError>;

    /// Attach the session file path to a write failure.
    fn write_context(self, path: &Path) -> Result<T, SessionError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn read_context(self, path: &Path) -> Result<T, SessionError> {
        self.map_err(|e| SessionError::unreadable(path, e))
    }

    fn write_context(self, path: &Path) -> Result<T, SessionError> {
        self.map_err(|e| SessionError::write_failed(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_read_context() {
        let result: Result<(), io::Error> =
            Err(Error::new(ErrorKind::PermissionDenied, "denied"));
        let err = result.read_context(Path::new("session.json")).unwrap_err();

        match err {
            SessionError::SessionFileUnreadable { path, source } => {
                assert_eq!(path, Path::new("session.json"));
                assert_eq!(source.kind(), ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected SessionFileUnreadable"),
        }
    }

    #[test]
    fn test_write_context() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "no dir"));
        let err = result.write_context(Path::new("out/session.json")).unwrap_err();

        match err {
            SessionError::SessionFileWrite { path, .. } => {
                assert_eq!(path, Path::new("out/session.json"));
            }
            _ => panic!("Expected SessionFileWrite"),
        }
    }
}
