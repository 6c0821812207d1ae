//! Most-recently-used file list.
//!
//! The list lives in the settings store under [`keys::RECENT_FILES`]. Every
//! touch is a read-modify-write against the store, and every menu build
//! re-reads it, so two windows never hold diverging copies.

use crate::config::{keys, read_value, write_value, SettingsStore};
use crate::error::Result;
use log::debug;
use std::path::{Path, PathBuf};

/// Maximum number of recent files to remember.
pub const MAX_RECENT_FILES: usize = 10;

/// Ordered, de-duplicated, bounded list of paths, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentFiles {
    entries: Vec<PathBuf>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from possibly-dirty stored entries.
    ///
    /// Empty paths and later duplicates are dropped, then the list is cut to
    /// [`MAX_RECENT_FILES`].
    pub fn from_entries(entries: Vec<PathBuf>) -> Self {
        let mut clean: Vec<PathBuf> = Vec::with_capacity(entries.len().min(MAX_RECENT_FILES));
        for path in entries {
            if path.as_os_str().is_empty() || clean.iter().any(|p| same_path(p, &path)) {
                continue;
            }
            clean.push(path);
        }
        clean.truncate(MAX_RECENT_FILES);
        Self { entries: clean }
    }

    /// Read the list from the store. A missing or malformed value is an empty list.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let entries: Vec<PathBuf> = read_value(store, keys::RECENT_FILES).unwrap_or_default();
        Self::from_entries(entries)
    }

    /// Write the list back to the store.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<()> {
        write_value(store, keys::RECENT_FILES, &self.entries)
    }

    /// Move `path` to the front, inserting it if absent.
    ///
    /// Matching is exact on the path's bytes. The oldest entry falls off when
    /// the list would grow past capacity.
    pub fn touch(&mut self, path: &Path) {
        self.entries.retain(|p| !same_path(p, path));
        self.entries.insert(0, path.to_path_buf());
        self.entries.truncate(MAX_RECENT_FILES);
    }

    /// Current entries, most recent first.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    a.as_os_str() == b.as_os_str()
}

/// Touch `path` in the stored list and persist the result immediately.
pub fn touch_recent_file(store: &mut dyn SettingsStore, path: &Path) -> Result<()> {
    let mut recent = RecentFiles::load(store);
    recent.touch(path);
    debug!("Recent files now has {} entr(ies)", recent.len());
    recent.save(store)
}

/// Fresh view of the stored list, most recent first.
///
/// Each call re-reads the store, so the result is never stale.
pub fn snapshot(store: &dyn SettingsStore) -> impl Iterator<Item = PathBuf> {
    RecentFiles::load(store).entries.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;
    use std::collections::HashSet;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/docs/{}.pdf", name))
    }

    #[test]
    fn test_touch_prepends() {
        let mut recent = RecentFiles::new();
        recent.touch(&p("a"));
        recent.touch(&p("b"));
        assert_eq!(recent.entries(), &[p("b"), p("a")]);
    }

    #[test]
    fn test_touch_existing_moves_to_front_without_growing() {
        let mut recent = RecentFiles::new();
        for name in ["a", "b", "c"] {
            recent.touch(&p(name));
        }
        recent.touch(&p("a"));
        assert_eq!(recent.entries(), &[p("a"), p("c"), p("b")]);
        assert_eq!(recent.len(), 3);
    }

    #[test]
    fn test_touch_twice_is_idempotent() {
        let mut recent = RecentFiles::new();
        recent.touch(&p("a"));
        recent.touch(&p("b"));
        recent.touch(&p("b"));
        let once = recent.clone();
        recent.touch(&p("b"));
        assert_eq!(recent, once);
        assert_eq!(recent.entries()[0], p("b"));
    }

    #[test]
    fn test_eleven_paths_evict_the_oldest() {
        let mut recent = RecentFiles::new();
        for i in 1..=11 {
            recent.touch(&p(&format!("p{}", i)));
        }
        let expected: Vec<PathBuf> = (2..=11).rev().map(|i| p(&format!("p{}", i))).collect();
        assert_eq!(recent.entries(), expected.as_slice());
        assert!(!recent.entries().contains(&p("p1")));
    }

    #[test]
    fn test_arbitrary_sequence_keeps_invariants() {
        // A deterministic pseudo-random walk over a small path pool.
        let pool: Vec<PathBuf> = (0..15).map(|i| p(&format!("f{}", i))).collect();
        let mut recent = RecentFiles::new();
        let mut seed: u32 = 12345;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let path = &pool[(seed >> 16) as usize % pool.len()];
            recent.touch(path);

            assert!(recent.len() <= MAX_RECENT_FILES);
            let unique: HashSet<_> = recent.entries().iter().collect();
            assert_eq!(unique.len(), recent.len());
            assert_eq!(recent.entries().first(), Some(path));
        }
    }

    #[test]
    fn test_matching_is_exact() {
        let mut recent = RecentFiles::new();
        recent.touch(Path::new("/docs/a.pdf"));
        recent.touch(Path::new("/docs/./a.pdf"));
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_from_entries_cleans_stored_data() {
        let mut stored = vec![p("a"), PathBuf::new(), p("b"), p("a")];
        stored.extend((0..20).map(|i| p(&format!("x{}", i))));
        let recent = RecentFiles::from_entries(stored);
        assert_eq!(recent.len(), MAX_RECENT_FILES);
        assert_eq!(recent.entries()[0], p("a"));
        assert_eq!(recent.entries()[1], p("b"));
    }

    #[test]
    fn test_touch_persists_immediately() {
        let mut store = MemoryStore::new();
        touch_recent_file(&mut store, &p("a")).unwrap();
        touch_recent_file(&mut store, &p("b")).unwrap();

        let listed: Vec<PathBuf> = snapshot(&store).collect();
        assert_eq!(listed, vec![p("b"), p("a")]);
    }

    #[test]
    fn test_snapshot_is_never_stale() {
        let mut store = MemoryStore::new();
        touch_recent_file(&mut store, &p("a")).unwrap();
        let first: Vec<PathBuf> = snapshot(&store).collect();

        touch_recent_file(&mut store, &p("b")).unwrap();
        let second: Vec<PathBuf> = snapshot(&store).collect();

        assert_eq!(first, vec![p("a")]);
        assert_eq!(second, vec![p("b"), p("a")]);
    }

    #[test]
    fn test_load_ignores_malformed_value() {
        use crate::config::SettingsStore;
        let mut store = MemoryStore::new();
        store
            .set_value(keys::RECENT_FILES, serde_json::json!({ "not": "a list" }))
            .unwrap();
        assert!(RecentFiles::load(&store).is_empty());
    }
}
