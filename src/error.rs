//! Centralized error handling for Folio
//!
//! One error type covers document I/O, the persistent settings store and
//! window-level failures. Nothing here is fatal to the process: callers
//! surface errors as a modal notification on the window that hit them.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the application.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a failed document load, shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// The file does not exist
    NotFound,
    /// The file exists but may not be read
    PermissionDenied,
    /// Any other I/O failure while reading
    Unreadable,
    /// The bytes were read but are not a document we understand
    InvalidFormat,
}

impl LoadFailureKind {
    /// Short human-readable description.
    pub fn describe(&self) -> &'static str {
        match self {
            LoadFailureKind::NotFound => "file not found",
            LoadFailureKind::PermissionDenied => "permission denied",
            LoadFailureKind::Unreadable => "file could not be read",
            LoadFailureKind::InvalidFormat => "not a valid document",
        }
    }
}

/// The centralized error type for the application.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic I/O error wrapper
    Io(io::Error),

    /// Failed to read a document from disk
    FileRead { path: PathBuf, source: io::Error },

    /// Failed to write a document to disk
    FileWrite { path: PathBuf, source: io::Error },

    /// The file was read but its contents are not a supported document
    InvalidDocument { path: PathBuf, message: String },

    /// A save was requested on a window with nothing loaded
    NoDocument,

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Store Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load the settings file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save the settings file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse settings (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Application Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic application error with a message
    Application(String),
}

impl Error {
    /// Classify this error as a load failure, if it came from loading a document.
    pub fn load_failure_kind(&self) -> Option<LoadFailureKind> {
        match self {
            Error::FileRead { source, .. } => Some(match source.kind() {
                io::ErrorKind::NotFound => LoadFailureKind::NotFound,
                io::ErrorKind::PermissionDenied => LoadFailureKind::PermissionDenied,
                _ => LoadFailureKind::Unreadable,
            }),
            Error::InvalidDocument { .. } => Some(LoadFailureKind::InvalidFormat),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::FileRead { path, source } => {
                write!(f, "Failed to open '{}': {}", path.display(), source)
            }
            Error::FileWrite { path, source } => {
                write!(f, "Failed to write '{}': {}", path.display(), source)
            }
            Error::InvalidDocument { path, message } => {
                write!(f, "'{}' is not a valid document: {}", path.display(), message)
            }
            Error::NoDocument => write!(f, "There is no document to save"),

            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load settings from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save settings to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid settings format: {}", message)
            }
            Error::ConfigDirNotFound => write!(f, "Configuration directory not found"),

            Error::Application(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::FileRead { source, .. } | Error::FileWrite { source, .. } => Some(source),
            Error::ConfigLoad { source, .. } => Some(source.as_ref()),
            Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::InvalidDocument { .. }
            | Error::NoDocument
            | Error::ConfigDirNotFound
            | Error::Application(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_creation() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_result: std::result::Result<String, _> = serde_json::from_str("{ nope");
        let err = Error::from(json_result.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_failure_kind_from_io_kind() {
        let not_found = Error::FileRead {
            path: PathBuf::from("/missing.pdf"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(not_found.load_failure_kind(), Some(LoadFailureKind::NotFound));

        let denied = Error::FileRead {
            path: PathBuf::from("/secret.pdf"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            denied.load_failure_kind(),
            Some(LoadFailureKind::PermissionDenied)
        );

        let other = Error::FileRead {
            path: PathBuf::from("/dev/weird"),
            source: io::Error::new(io::ErrorKind::Other, "eh"),
        };
        assert_eq!(other.load_failure_kind(), Some(LoadFailureKind::Unreadable));
    }

    #[test]
    fn test_load_failure_kind_invalid_document() {
        let err = Error::InvalidDocument {
            path: PathBuf::from("/a.pdf"),
            message: "missing header".to_string(),
        };
        assert_eq!(err.load_failure_kind(), Some(LoadFailureKind::InvalidFormat));
        assert!(err.to_string().contains("missing header"));
    }

    #[test]
    fn test_non_load_errors_have_no_kind() {
        assert_eq!(Error::NoDocument.load_failure_kind(), None);
        assert_eq!(Error::ConfigDirNotFound.load_failure_kind(), None);
        let write = Error::FileWrite {
            path: PathBuf::from("/a.pdf"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(write.load_failure_kind(), None);
    }

    #[test]
    fn test_display_messages() {
        let err = Error::FileWrite {
            path: PathBuf::from("/out.pdf"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/out.pdf"));
        assert!(msg.contains("disk full"));
        assert_eq!(
            Error::ConfigDirNotFound.to_string(),
            "Configuration directory not found"
        );
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as StdError;
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found"));
        assert!(err.source().is_some());
        assert!(Error::Application("x".to_string()).source().is_none());
        assert!(Error::NoDocument.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.unwrap_or_warn_default(0, "ctx"), 42);

        let err: Result<i32> = Err(Error::Application("test".to_string()));
        assert_eq!(err.unwrap_or_warn_default(7, "ctx"), 7);
    }
}
