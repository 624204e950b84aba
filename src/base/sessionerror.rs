use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by session loading and export.
///
/// Cookie parsing never fails; anything malformed below the file level is
/// skipped and counted in [`LoadReport`](crate::session::loader::LoadReport).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file {path} could not be read: {source}")]
    SessionFileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Session file {path} is not a JSON object of URL to cookie string: {message}")]
    MalformedSessionFile { path: PathBuf, message: String },
    #[error("Session file {path} could not be written: {source}")]
    SessionFileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Session serialization failed: {0}")]
    Serialize(String),
}

impl SessionError {
    pub fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SessionError::SessionFileUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SessionError::MalformedSessionFile {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SessionError::SessionFileWrite {
            path: path.into(),
            source,
        }
    }

    /// True for errors that mean the requested session state is unavailable,
    /// as opposed to a file that exists but has unusable content.
    pub fn is_fatal_io(&self) -> bool {
        matches!(
            self,
            SessionError::SessionFileUnreadable { .. } | SessionError::SessionFileWrite { .. }
        )
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialize(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_message_names_path() {
        let err = SessionError::unreadable(
            "/tmp/missing.json",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.json"));
        assert!(msg.contains("no such file"));
        assert!(err.is_fatal_io());
    }

    #[test]
    fn test_malformed_is_not_io() {
        let err = SessionError::malformed("cookies.json", "expected value at line 1");
        assert!(!err.is_fatal_io());
        assert!(matches!(err, SessionError::MalformedSessionFile { .. }));
    }
}
