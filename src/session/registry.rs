//! The set of live document windows.
//!
//! `WindowRegistry` owns every [`DocumentWindow`] together with the two
//! collaborators they share: the settings store and the document backend.
//! All open, close and settings traffic goes through it, which is what keeps
//! the "one window per file" rule in a single place.

use super::close::{CloseChoice, CloseState};
use super::document::canonical_or_raw;
use super::recent::{snapshot, RecentFiles};
use super::window::{DocumentWindow, SaveTarget, WindowId};
use crate::config::{keys, load_preferences, write_value, Preferences, SettingsStore};
use crate::document::{DocumentBackend, LoadOutcome};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Distance, in logical pixels, between a new window and the previous one.
pub const TILE_OFFSET: f32 = 80.0;

/// Result of an open request.
#[derive(Debug, Clone, PartialEq)]
pub struct Opened {
    /// Window that now shows the request
    pub id: WindowId,
    /// Whether a window was created for it
    pub created: bool,
    /// Load result, when a load was attempted
    pub load: Option<LoadOutcome>,
}

/// Where a close request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The window was persisted and removed
    Closed,
    /// The window has unsaved changes; ask the user
    NeedsConfirmation,
    /// Save was chosen for an untitled window; ask for a target path
    NeedsSavePath,
    /// The close was refused and the window stays open
    Blocked,
}

/// Owner of every live window.
pub struct WindowRegistry {
    windows: Vec<DocumentWindow>,
    store: Box<dyn SettingsStore>,
    backend: Box<dyn DocumentBackend>,
    next_id: u64,
    focused: Option<WindowId>,
    monitor_size: Option<[f32; 2]>,
}

impl WindowRegistry {
    pub fn new(store: Box<dyn SettingsStore>, backend: Box<dyn DocumentBackend>) -> Self {
        Self {
            windows: Vec::new(),
            store,
            backend,
            next_id: 1,
            focused: None,
            monitor_size: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Live windows, oldest first.
    pub fn windows(&self) -> &[DocumentWindow] {
        &self.windows
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(DocumentWindow::id).collect()
    }

    pub fn window(&self, id: WindowId) -> Option<&DocumentWindow> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut DocumentWindow> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Window that most recently received focus.
    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Record that the UI gave `id` focus.
    pub fn set_focused(&mut self, id: WindowId) {
        if self.window(id).is_some() {
            self.focused = Some(id);
        }
    }

    /// Live window whose current file is exactly `path`.
    pub fn find_by_path(&self, path: &Path) -> Option<WindowId> {
        self.windows
            .iter()
            .find(|w| w.path() == Some(path))
            .map(DocumentWindow::id)
    }

    /// Size of the monitor new windows are tiled on, once known.
    pub fn set_monitor_size(&mut self, size: Option<[f32; 2]>) {
        self.monitor_size = size;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Open
    // ─────────────────────────────────────────────────────────────────────────

    /// Open each path in order. No paths opens one empty window.
    pub fn open_paths<I, P>(&mut self, paths: I) -> Vec<Opened>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut results: Vec<Opened> = paths
            .into_iter()
            .map(|path| self.open_path(path.as_ref()))
            .collect();
        if results.is_empty() {
            results.push(self.open_path(Path::new("")));
        }
        results
    }

    /// Open `path`, reusing the window that already shows it.
    ///
    /// An empty path always creates a new untitled window. Otherwise the path
    /// is resolved to its canonical form and compared exactly against every
    /// live window's path; a match is focused and nothing else happens. With
    /// no match a new window is created, shown and asked to load the path.
    pub fn open_path(&mut self, path: &Path) -> Opened {
        if path.as_os_str().is_empty() {
            let id = self.create_window();
            return Opened {
                id,
                created: true,
                load: None,
            };
        }

        let canonical = canonical_or_raw(path);
        if let Some(id) = self.find_by_path(&canonical) {
            info!("{} is already open in window {}", canonical.display(), id);
            self.focus(id);
            return Opened {
                id,
                created: false,
                load: None,
            };
        }

        let id = self.create_window();
        let load = self.load_into(id, &canonical);
        Opened {
            id,
            created: true,
            load,
        }
    }

    /// Open `path` on behalf of window `id` (File > Open, recent files).
    ///
    /// The requesting window loads the file itself when it is untitled,
    /// unmodified and the preference allows it; otherwise this behaves like
    /// [`Self::open_path`].
    pub fn open_in_window(&mut self, id: WindowId, path: &Path) -> Opened {
        let reusable = self.window(id).map(DocumentWindow::can_reuse_for_open).unwrap_or(false);
        let canonical = canonical_or_raw(path);
        if !reusable || path.as_os_str().is_empty() || self.find_by_path(&canonical).is_some() {
            return self.open_path(path);
        }

        debug!("Reusing untitled window {} for {}", id, canonical.display());
        let load = self.load_into(id, &canonical);
        self.focus(id);
        Opened {
            id,
            created: false,
            load,
        }
    }

    fn load_into(&mut self, id: WindowId, path: &Path) -> Option<LoadOutcome> {
        let Self {
            windows,
            store,
            backend,
            ..
        } = self;
        let window = windows.iter_mut().find(|w| w.id() == id)?;
        Some(window.load_file_path(path, backend.as_ref(), store.as_mut()))
    }

    fn create_window(&mut self) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;

        let mut window = DocumentWindow::new(id, self.store.as_ref());
        if let Some(previous) = self.windows.last() {
            if let Some(tiled) = previous.tile_after(TILE_OFFSET, self.monitor_size) {
                window.set_geometry(tiled);
            }
        }
        window.request_focus();
        self.windows.push(window);
        self.focused = Some(id);
        info!("Created window {} ({} open)", id, self.windows.len());
        id
    }

    fn focus(&mut self, id: WindowId) {
        if let Some(window) = self.window_mut(id) {
            window.request_focus();
            self.focused = Some(id);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Remove / close
    // ─────────────────────────────────────────────────────────────────────────

    /// Drop `id` from the live set. Removing an absent window does nothing.
    pub fn remove(&mut self, id: WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id() != id);
        let removed = self.windows.len() != before;
        if removed {
            if self.focused == Some(id) {
                self.focused = self.windows.last().map(DocumentWindow::id);
            }
            info!("Closed window {} ({} open)", id, self.windows.len());
        }
        removed
    }

    /// A close was requested for `id` (title bar, menu, shortcut).
    pub fn request_close(&mut self, id: WindowId) -> CloseOutcome {
        let Some(window) = self.window_mut(id) else {
            return CloseOutcome::Closed;
        };
        let modified = window.is_modified();
        match window.close_policy_mut().request(modified) {
            CloseState::Accepted => {
                self.finish_close(id);
                CloseOutcome::Closed
            }
            _ => CloseOutcome::NeedsConfirmation,
        }
    }

    /// Apply the user's answer to the unsaved-changes prompt of `id`.
    pub fn resolve_close(&mut self, id: WindowId, choice: CloseChoice) -> CloseOutcome {
        let Some(window) = self.window_mut(id) else {
            return CloseOutcome::Closed;
        };
        match window.close_policy_mut().choose(choice) {
            CloseState::SavingThenClose => {
                let result = {
                    let Self {
                        windows,
                        store,
                        backend,
                        ..
                    } = self;
                    match windows.iter_mut().find(|w| w.id() == id) {
                        Some(window) => window.save_file(backend.as_ref(), store.as_mut()),
                        None => Err(Error::Application(format!("window {} vanished", id))),
                    }
                };
                match result {
                    Ok(SaveTarget::Saved) => self.after_close_save(id, true),
                    Ok(SaveTarget::NeedsPath) => CloseOutcome::NeedsSavePath,
                    Err(_) => self.after_close_save(id, false),
                }
            }
            CloseState::ClosingWithoutSave => {
                if let Some(window) = self.window_mut(id) {
                    window.close_policy_mut().accept();
                }
                self.finish_close(id);
                CloseOutcome::Closed
            }
            CloseState::ConfirmingSave => CloseOutcome::NeedsConfirmation,
            _ => self.block_close(id),
        }
    }

    /// Finish a Save-then-close for an untitled window once the user picked
    /// a target. `None` means the save dialog was cancelled.
    pub fn complete_close_save_as(&mut self, id: WindowId, chosen: Option<&Path>) -> CloseOutcome {
        let saved = match chosen {
            Some(path) => self.save_as(id, path).is_ok(),
            None => false,
        };
        self.after_close_save(id, saved)
    }

    fn after_close_save(&mut self, id: WindowId, saved: bool) -> CloseOutcome {
        let state = match self.window_mut(id) {
            Some(window) => window.close_policy_mut().save_finished(saved),
            None => return CloseOutcome::Closed,
        };
        if state == CloseState::Accepted {
            self.finish_close(id);
            CloseOutcome::Closed
        } else {
            self.block_close(id)
        }
    }

    fn block_close(&mut self, id: WindowId) -> CloseOutcome {
        if let Some(window) = self.window_mut(id) {
            debug!("Close of window {} blocked", id);
            window.close_policy_mut().reset();
        }
        CloseOutcome::Blocked
    }

    /// Persist the window's geometry and layout, then remove it.
    fn finish_close(&mut self, id: WindowId) {
        {
            let Self { windows, store, .. } = self;
            if let Some(window) = windows.iter().find(|w| w.id() == id) {
                if let Err(e) = window.persist_state(store.as_mut()) {
                    warn!("Could not save state of window {}: {}", id, e);
                }
            }
        }
        self.remove(id);
    }

    /// Write every live window's geometry and layout without closing it.
    ///
    /// Used when the process is torn down with windows still open.
    pub fn persist_all(&mut self) {
        let Self { windows, store, .. } = self;
        for window in windows.iter() {
            if let Err(e) = window.persist_state(store.as_mut()) {
                warn!("Could not save state of window {}: {}", window.id(), e);
            }
        }
    }

    /// Quit: request a close of every window, oldest first.
    ///
    /// Clean windows close immediately. Returns the windows left waiting on
    /// the unsaved-changes prompt.
    pub fn close_all(&mut self) -> Vec<WindowId> {
        self.ids()
            .into_iter()
            .filter(|&id| self.request_close(id) != CloseOutcome::Closed)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Save / search
    // ─────────────────────────────────────────────────────────────────────────

    /// Save `id` to its current path.
    pub fn save(&mut self, id: WindowId) -> Result<SaveTarget> {
        let Self {
            windows,
            store,
            backend,
            ..
        } = self;
        let window = windows
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or_else(|| Error::Application(format!("no window {}", id)))?;
        window.save_file(backend.as_ref(), store.as_mut())
    }

    /// Save `id` to a user-chosen path. Returns the path actually written.
    ///
    /// A target already shown by another window is refused, so a path never
    /// belongs to two windows.
    pub fn save_as(&mut self, id: WindowId, chosen: &Path) -> Result<PathBuf> {
        let target = self
            .window(id)
            .ok_or_else(|| Error::Application(format!("no window {}", id)))?
            .resolve_save_as_path(chosen);
        let canonical = canonical_or_raw(&target);
        if let Some(owner) = self.find_by_path(&canonical).filter(|&owner| owner != id) {
            let message = format!(
                "{} is already open in another window. Close it there first or pick another name.",
                target.display()
            );
            warn!("Save as of window {} refused: target open in window {}", id, owner);
            if let Some(window) = self.window_mut(id) {
                window.show_error(message.clone());
            }
            return Err(Error::Application(message));
        }

        let Self {
            windows,
            store,
            backend,
            ..
        } = self;
        let window = windows
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or_else(|| Error::Application(format!("no window {}", id)))?;
        window.save_file_as(chosen, backend.as_ref(), store.as_mut())
    }

    /// Run the search currently typed into `id`'s overlay.
    pub fn submit_search(&mut self, id: WindowId, forward: bool) -> Option<String> {
        let Self {
            windows, backend, ..
        } = self;
        let window = windows.iter_mut().find(|w| w.id() == id)?;
        Some(window.submit_search(forward, backend.as_ref()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Recent files, freshly read from the store.
    pub fn recent_files(&self) -> Vec<PathBuf> {
        snapshot(self.store.as_ref()).collect()
    }

    /// Forget every recent file.
    pub fn clear_recent_files(&mut self) -> Result<()> {
        RecentFiles::new().save(self.store.as_mut())?;
        info!("Recent files cleared");
        Ok(())
    }

    /// Preferences as currently stored.
    pub fn preferences(&self) -> Preferences {
        load_preferences(self.store.as_ref())
    }

    /// Store new preferences and tell every window.
    pub fn update_preferences(&mut self, preferences: &Preferences) -> Result<()> {
        let mut preferences = preferences.clone();
        preferences.sanitize();
        write_value(self.store.as_mut(), keys::PREFERENCES, &preferences)?;
        info!("Preferences saved");
        self.propagate_settings_reload();
        Ok(())
    }

    /// Ask every live window to re-read its settings.
    pub fn propagate_settings_reload(&mut self) {
        let Self { windows, store, .. } = self;
        for window in windows.iter_mut() {
            window.reload_settings(store.as_ref());
        }
        debug!("Settings reload sent to {} window(s)", windows.len());
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }
}
