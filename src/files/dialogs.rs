//! Native file dialog integration using the rfd crate
//!
//! Dialogs are modal and block the UI thread until the user answers, which
//! keeps open and save requests strictly ordered.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// File extension filters for supported document types.
const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Opens a native file dialog for selecting one or more documents.
///
/// Returns the selected paths in the order the dialog reports them. Empty if
/// the dialog was cancelled.
pub fn open_documents_dialog(initial_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Documents")
        .add_filter("PDF Documents", PDF_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_files().unwrap_or_default()
}

/// Opens a native save dialog.
///
/// Returns `Some(PathBuf)` if a location was selected, `None` if cancelled.
pub fn save_document_dialog(initial_dir: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Document As")
        .add_filter("PDF Documents", PDF_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .set_file_name(default_name);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
