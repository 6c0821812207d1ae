//! Document content collaborator for Folio
//!
//! Windows never touch document bytes themselves: loading, saving and
//! searching go through a [`DocumentBackend`] owned by the window registry.
//! Rendering is left to whatever displays the loaded document.

mod file;

pub use file::FileBackend;

use crate::error::{LoadFailureKind, Result};
use std::path::{Path, PathBuf};

/// A document successfully read by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// Path the document was read from
    pub path: PathBuf,
    /// Raw document bytes
    pub bytes: Vec<u8>,
    /// Title stored in the document's own metadata, if any
    pub metadata_title: Option<String>,
}

impl LoadedDocument {
    /// Size of the document in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Extension of the file the document came from.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }
}

/// Outcome of a window's load request, as reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    /// Whether the document was loaded
    pub success: bool,
    /// Window title after the load attempt
    pub title: String,
    /// Why the load failed, if it did
    pub error_kind: Option<LoadFailureKind>,
}

/// A text search submitted from a window's search overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub forward: bool,
    pub case_sensitive: bool,
}

/// Backend answer to a [`SearchRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The backend cannot search this kind of document
    Unsupported,
    /// Number of matches found
    Matches(usize),
}

/// Loads, saves and searches documents on behalf of windows.
pub trait DocumentBackend {
    /// Read the document at `path`.
    fn load(&self, path: &Path) -> Result<LoadedDocument>;

    /// Write `document` to `path`.
    fn save(&self, document: &LoadedDocument, path: &Path) -> Result<()>;

    /// Search within a loaded document.
    fn search(&self, _document: &LoadedDocument, _request: &SearchRequest) -> SearchOutcome {
        SearchOutcome::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_document_accessors() {
        let doc = LoadedDocument {
            path: PathBuf::from("/docs/report.PDF"),
            bytes: vec![0; 12],
            metadata_title: None,
        };
        assert_eq!(doc.size(), 12);
        assert_eq!(doc.extension(), Some("PDF"));
    }

    #[test]
    fn test_default_search_is_unsupported() {
        struct Nothing;
        impl DocumentBackend for Nothing {
            fn load(&self, path: &Path) -> Result<LoadedDocument> {
                Ok(LoadedDocument {
                    path: path.to_path_buf(),
                    bytes: Vec::new(),
                    metadata_title: None,
                })
            }
            fn save(&self, _document: &LoadedDocument, _path: &Path) -> Result<()> {
                Ok(())
            }
        }

        let backend = Nothing;
        let doc = backend.load(Path::new("/a.pdf")).unwrap();
        let request = SearchRequest {
            query: "x".to_string(),
            forward: true,
            case_sensitive: false,
        };
        assert_eq!(backend.search(&doc, &request), SearchOutcome::Unsupported);
    }
}
