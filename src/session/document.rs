//! Per-window document bookkeeping: current path, modified flag and title.

use super::recent::touch_recent_file;
use crate::config::SettingsStore;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Title shown for a window with no file.
pub const UNTITLED: &str = "untitled";

/// Which file a window shows and whether it has unsaved changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentState {
    path: Option<PathBuf>,
    modified: bool,
    display_title: String,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentState {
    /// A fresh, untitled, unmodified state.
    pub fn new() -> Self {
        Self {
            path: None,
            modified: false,
            display_title: UNTITLED.to_string(),
        }
    }

    /// Canonical path of the current file, `None` while untitled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Set by whatever edits the document.
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// File name of the current path, or `"untitled"`.
    pub fn display_title(&self) -> &str {
        &self.display_title
    }

    /// Record `path` as the window's current file after a load or save.
    ///
    /// An empty path resets the state to untitled. A non-empty path is
    /// canonicalized (see [`canonical_or_raw`]) and touched in the recent-files
    /// list. The modified flag is cleared in both cases.
    pub fn set_current_file_path(&mut self, path: &Path, store: &mut dyn SettingsStore) {
        if path.as_os_str().is_empty() {
            self.path = None;
            self.display_title = UNTITLED.to_string();
        } else {
            let canonical = canonical_or_raw(path);
            self.display_title = file_title(&canonical);
            if let Err(e) = touch_recent_file(store, &canonical) {
                warn!("Could not update recent files: {}", e);
            }
            debug!("Current file is now {}", canonical.display());
            self.path = Some(canonical);
        }
        self.modified = false;
    }
}

/// Resolve `path` to its absolute, symlink-free form.
///
/// Files that do not exist yet (the target of a save-as, say) cannot be
/// canonicalized directly; for those the parent directory is resolved and
/// the file name re-attached. If even that fails, the input is kept as given.
pub fn canonical_or_raw(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let (Some(parent), Some(name)) = (parent, path.file_name()) {
        if let Ok(dir) = fs::canonicalize(parent) {
            return dir.join(name);
        }
    }

    path.to_path_buf()
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use crate::session::recent::snapshot;
    use tempfile::TempDir;

    #[test]
    fn test_new_state_is_untitled() {
        let state = DocumentState::new();
        assert!(state.is_untitled());
        assert!(!state.is_modified());
        assert_eq!(state.display_title(), UNTITLED);
    }

    #[test]
    fn test_empty_path_resets_to_untitled() {
        let mut store = MemoryStore::new();
        let mut state = DocumentState::new();
        state.set_current_file_path(Path::new("/nowhere/a.pdf"), &mut store);
        state.set_modified(true);

        state.set_current_file_path(Path::new(""), &mut store);
        assert_eq!(state.display_title(), "untitled");
        assert!(state.path().is_none());
        assert!(!state.is_modified());
    }

    #[test]
    fn test_empty_path_does_not_touch_recent_files() {
        let mut store = MemoryStore::new();
        let mut state = DocumentState::new();
        state.set_current_file_path(Path::new(""), &mut store);
        assert_eq!(snapshot(&store).count(), 0);
    }

    #[test]
    fn test_existing_file_is_canonicalized() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.pdf");
        fs::write(&file, b"%PDF-1.4").unwrap();
        let indirect = dir.path().join(".").join("doc.pdf");

        let mut store = MemoryStore::new();
        let mut state = DocumentState::new();
        state.set_modified(true);
        state.set_current_file_path(&indirect, &mut store);

        let expected = fs::canonicalize(&file).unwrap();
        assert_eq!(state.path(), Some(expected.as_path()));
        assert_eq!(state.display_title(), "doc.pdf");
        assert!(!state.is_modified());
        assert_eq!(snapshot(&store).collect::<Vec<_>>(), vec![expected]);
    }

    #[test]
    fn test_missing_file_in_existing_dir_resolves_parent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("new-copy.pdf");

        let resolved = canonical_or_raw(&target);
        assert_eq!(
            resolved,
            fs::canonicalize(dir.path()).unwrap().join("new-copy.pdf")
        );
    }

    #[test]
    fn test_unresolvable_path_is_kept_raw() {
        let raw = Path::new("/definitely/not/here/x.pdf");
        assert_eq!(canonical_or_raw(raw), raw.to_path_buf());

        let bare = Path::new("orphan-name-that-does-not-exist.pdf");
        assert_eq!(canonical_or_raw(bare), bare.to_path_buf());
    }

    #[test]
    fn test_unresolvable_path_still_becomes_current() {
        let mut store = MemoryStore::new();
        let mut state = DocumentState::new();
        state.set_current_file_path(Path::new("/definitely/not/here/x.pdf"), &mut store);

        assert_eq!(state.path(), Some(Path::new("/definitely/not/here/x.pdf")));
        assert_eq!(state.display_title(), "x.pdf");
        assert_eq!(snapshot(&store).count(), 1);
    }
}
