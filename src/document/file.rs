//! Filesystem-backed document backend.

use super::{DocumentBackend, LoadedDocument};
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Every PDF file starts with this marker.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Literal metadata entry sniffed for a document title.
const TITLE_MARKER: &[u8] = b"/Title (";

/// Longest title we are willing to pull out of the metadata.
const MAX_TITLE_LEN: usize = 256;

/// Reads and writes documents directly on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileBackend;

impl FileBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for FileBackend {
    fn load(&self, path: &Path) -> Result<LoadedDocument> {
        debug!("Reading document: {}", path.display());
        let bytes = fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if is_pdf_path(path) && !bytes.starts_with(PDF_MAGIC) {
            return Err(Error::InvalidDocument {
                path: path.to_path_buf(),
                message: "missing PDF header".to_string(),
            });
        }

        let metadata_title = sniff_title(&bytes);
        info!("Loaded {} ({} bytes)", path.display(), bytes.len());
        Ok(LoadedDocument {
            path: path.to_path_buf(),
            bytes,
            metadata_title,
        })
    }

    fn save(&self, document: &LoadedDocument, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Application(format!("'{}' is not a file path", path.display())))?;
        let mut temp_name = file_name.to_os_string();
        temp_name.push(".part");
        let temp_path = path.with_file_name(temp_name);

        fs::write(&temp_path, &document.bytes).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        info!("Saved {} ({} bytes)", path.display(), document.bytes.len());
        Ok(())
    }
}

fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Pull a literal `/Title (...)` string out of the document, if present.
///
/// Only unescaped literal strings are recognised; anything fancier is left
/// to the renderer.
fn sniff_title(bytes: &[u8]) -> Option<String> {
    let start = bytes
        .windows(TITLE_MARKER.len())
        .position(|w| w == TITLE_MARKER)?
        + TITLE_MARKER.len();
    let rest = &bytes[start..];
    let end = rest.iter().take(MAX_TITLE_LEN).position(|&b| b == b')')?;
    let title = String::from_utf8_lossy(&rest[..end]).trim().to_string();
    (!title.is_empty()).then_some(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadFailureKind;
    use tempfile::TempDir;

    const SAMPLE_PDF: &[u8] = b"%PDF-1.7\n1 0 obj << /Title (Quarterly Report) >> endobj\n%%EOF";

    #[test]
    fn test_load_pdf_with_title() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, SAMPLE_PDF).unwrap();

        let doc = FileBackend::new().load(&path).unwrap();
        assert_eq!(doc.bytes, SAMPLE_PDF);
        assert_eq!(doc.metadata_title.as_deref(), Some("Quarterly Report"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileBackend::new()
            .load(&dir.path().join("missing.pdf"))
            .unwrap_err();
        assert_eq!(err.load_failure_kind(), Some(LoadFailureKind::NotFound));
    }

    #[test]
    fn test_load_pdf_without_header_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.pdf");
        fs::write(&path, b"hello").unwrap();

        let err = FileBackend::new().load(&path).unwrap_err();
        assert_eq!(err.load_failure_kind(), Some(LoadFailureKind::InvalidFormat));
    }

    #[test]
    fn test_load_non_pdf_skips_header_check() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"plain text").unwrap();

        let doc = FileBackend::new().load(&path).unwrap();
        assert!(doc.metadata_title.is_none());
    }

    #[test]
    fn test_save_writes_bytes_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let doc = LoadedDocument {
            path: dir.path().join("in.pdf"),
            bytes: SAMPLE_PDF.to_vec(),
            metadata_title: None,
        };
        let out = dir.path().join("out.pdf");

        FileBackend::new().save(&doc, &out).unwrap();
        assert_eq!(fs::read(&out).unwrap(), SAMPLE_PDF);
        assert!(!dir.path().join("out.pdf.part").exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let doc = LoadedDocument {
            path: dir.path().join("in.pdf"),
            bytes: vec![1, 2, 3],
            metadata_title: None,
        };
        let err = FileBackend::new()
            .save(&doc, &dir.path().join("nope").join("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
    }

    #[test]
    fn test_sniff_title_edge_cases() {
        assert_eq!(sniff_title(b"/Title ()"), None);
        assert_eq!(sniff_title(b"/Title (  Spaced  )"), Some("Spaced".to_string()));
        assert_eq!(sniff_title(b"/Title (unterminated"), None);
        assert_eq!(sniff_title(b"no metadata"), None);
    }
}
