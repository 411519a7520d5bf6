use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepsError {
    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    // Search response errors
    #[error("Failed to parse search response: {0}")]
    Parse(String),

    #[error("Library not found in Maven Central: {name}")]
    NotFound { name: String },

    #[error("Download took too long: {}ms elapsed, budget is {}ms", .elapsed.as_millis(), .budget.as_millis())]
    Timeout { elapsed: Duration, budget: Duration },

    // Filesystem errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Archive errors
    #[error("Entry {entry} not found in {}", .archive.display())]
    ArchiveEntryMissing { entry: String, archive: PathBuf },

    #[error("Invalid archive {}: {reason}", .path.display())]
    InvalidArchive { path: PathBuf, reason: String },

    // Input errors
    #[error("Invalid library name {name:?}: {reason}")]
    InvalidLibraryName { name: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`DepsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    NotFound,
    Timeout,
    Filesystem,
    ArchiveEntryMissing,
    Usage,
}

impl DepsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DepsError::Network(_) | DepsError::HttpStatus { .. } => ErrorKind::Network,
            DepsError::Parse(_) => ErrorKind::Parse,
            DepsError::NotFound { .. } => ErrorKind::NotFound,
            DepsError::Timeout { .. } => ErrorKind::Timeout,
            DepsError::Io(_) | DepsError::Filesystem { .. } | DepsError::InvalidArchive { .. } => {
                ErrorKind::Filesystem
            }
            DepsError::ArchiveEntryMissing { .. } => ErrorKind::ArchiveEntryMissing,
            DepsError::InvalidLibraryName { .. } | DepsError::Config(_) => ErrorKind::Usage,
        }
    }

    /// Attach a path to an I/O error.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DepsError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DepsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DepsError::HttpStatus {
            status: 404,
            url: "https://repo1.maven.org/maven2/x.aar".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: https://repo1.maven.org/maven2/x.aar");

        let err = DepsError::Timeout {
            elapsed: Duration::from_millis(6200),
            budget: Duration::from_millis(5000),
        };
        assert_eq!(
            err.to_string(),
            "Download took too long: 6200ms elapsed, budget is 5000ms"
        );

        let err = DepsError::ArchiveEntryMissing {
            entry: "classes.jar".to_string(),
            archive: PathBuf::from("okhttp.zip"),
        };
        assert_eq!(err.to_string(), "Entry classes.jar not found in okhttp.zip");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(DepsError::Parse("bad".into()).kind(), ErrorKind::Parse);
        assert_eq!(
            DepsError::NotFound { name: "x".into() }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DepsError::fs("deps", std::io::Error::from(std::io::ErrorKind::PermissionDenied)).kind(),
            ErrorKind::Filesystem
        );
        assert_eq!(DepsError::Config("x".into()).kind(), ErrorKind::Usage);
    }
}
