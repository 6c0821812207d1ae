//! A single top-level document window.
//!
//! `DocumentWindow` holds everything one native window needs between frames:
//! its [`DocumentState`], the loaded document, restored geometry and layout,
//! zoom, the search overlay and the close policy. It never reaches into the
//! registry; collaborators are passed in by the caller.

use super::close::ClosePolicy;
use super::document::DocumentState;
use crate::config::{
    keys, load_preferences, read_value, write_value, Preferences, SettingsStore, WindowGeometry,
    WindowLayout,
};
use crate::document::{DocumentBackend, LoadOutcome, LoadedDocument, SearchOutcome, SearchRequest};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Window title used when a document carries no metadata title.
pub const APP_TITLE: &str = "Folio";

/// Extension given to save-as targets when neither the chosen name nor the
/// current document has one.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Zoom limits, in percent.
pub const MIN_ZOOM_PERCENT: i32 = 10;
pub const MAX_ZOOM_PERCENT: i32 = 800;

/// Stable identifier of a live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What [`DocumentWindow::save_file`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    /// Written to the current path
    Saved,
    /// The window is untitled; the caller must ask for a path first
    NeedsPath,
}

/// State of the transient find overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOverlay {
    pub visible: bool,
    pub query: String,
    pub case_sensitive: bool,
    /// Last answer from the window, shown under the query field
    pub message: Option<String>,
    /// Set when the overlay was just opened so the text field grabs focus
    pub focus_input: bool,
}

/// One document window.
#[derive(Debug)]
pub struct DocumentWindow {
    id: WindowId,
    state: DocumentState,
    document: Option<LoadedDocument>,
    window_title: String,
    geometry: WindowGeometry,
    layout: WindowLayout,
    preferences: Preferences,
    zoom_steps: i32,
    fullscreen: bool,
    /// Find overlay, edited in place by the UI
    pub search: SearchOverlay,
    close: ClosePolicy,
    focus_requested: bool,
    error_message: Option<String>,
}

impl DocumentWindow {
    /// Create an untitled window, restoring geometry, layout and preferences
    /// from the store.
    pub fn new(id: WindowId, store: &dyn SettingsStore) -> Self {
        let geometry = read_value::<WindowGeometry>(store, keys::GEOMETRY)
            .map(|mut geometry| {
                geometry.sanitize();
                geometry
            })
            .unwrap_or_default();
        let layout = read_value::<WindowLayout>(store, keys::WINDOW_STATE).unwrap_or_default();

        debug!("Window {} restored geometry {:?}", id, geometry);
        Self {
            id,
            state: DocumentState::new(),
            document: None,
            window_title: APP_TITLE.to_string(),
            geometry,
            layout,
            preferences: load_preferences(store),
            zoom_steps: 0,
            fullscreen: false,
            search: SearchOverlay::default(),
            close: ClosePolicy::new(),
            focus_requested: false,
            error_message: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    /// Canonical path of the current file, `None` while untitled.
    pub fn path(&self) -> Option<&Path> {
        self.state.path()
    }

    pub fn is_modified(&self) -> bool {
        self.state.is_modified()
    }

    /// Mark the document as having unsaved changes (or not).
    pub fn set_modified(&mut self, modified: bool) {
        self.state.set_modified(modified);
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    /// Title reported by the last load: the metadata title or [`APP_TITLE`].
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    /// Text for the native title bar, e.g. `report.pdf* - Quarterly Report`.
    pub fn title_bar_text(&self) -> String {
        let marker = if self.state.is_modified() { "*" } else { "" };
        format!("{}{} - {}", self.state.display_title(), marker, self.window_title)
    }

    pub fn geometry(&self) -> &WindowGeometry {
        &self.geometry
    }

    /// Record the window's current on-screen geometry.
    pub fn set_geometry(&mut self, mut geometry: WindowGeometry) {
        geometry.sanitize();
        self.geometry = geometry;
    }

    pub fn layout(&self) -> &WindowLayout {
        &self.layout
    }

    pub fn toggle_toolbar(&mut self) {
        self.layout.show_toolbar = !self.layout.show_toolbar;
    }

    pub fn toggle_status_bar(&mut self) {
        self.layout.show_status_bar = !self.layout.show_status_bar;
    }

    pub fn close_policy(&self) -> &ClosePolicy {
        &self.close
    }

    pub fn close_policy_mut(&mut self) -> &mut ClosePolicy {
        &mut self.close
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load / save
    // ─────────────────────────────────────────────────────────────────────────

    /// Load `path` into this window.
    ///
    /// On success the document replaces the current one and the path becomes
    /// current (touching recent files). On failure nothing about the window's
    /// document state changes; the error is kept for display and its kind is
    /// reported in the outcome. An empty path resets the window to untitled.
    pub fn load_file_path(
        &mut self,
        path: &Path,
        backend: &dyn DocumentBackend,
        store: &mut dyn SettingsStore,
    ) -> LoadOutcome {
        if path.as_os_str().is_empty() {
            self.document = None;
            self.window_title = APP_TITLE.to_string();
            self.state.set_current_file_path(path, store);
            return LoadOutcome {
                success: true,
                title: self.window_title.clone(),
                error_kind: None,
            };
        }

        match backend.load(path) {
            Ok(document) => {
                self.window_title = document
                    .metadata_title
                    .clone()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| APP_TITLE.to_string());
                self.document = Some(document);
                self.zoom_steps = 0;
                self.search.message = None;
                self.state.set_current_file_path(path, store);
                info!("Window {} loaded {}", self.id, path.display());
                LoadOutcome {
                    success: true,
                    title: self.window_title.clone(),
                    error_kind: None,
                }
            }
            Err(e) => {
                warn!("Window {} failed to load {}: {}", self.id, path.display(), e);
                let error_kind = e.load_failure_kind();
                let reason = error_kind.map_or("unexpected error", |kind| kind.describe());
                self.error_message = Some(format!(
                    "Could not open {} ({}).\n\n{}",
                    path.display(),
                    reason,
                    e
                ));
                LoadOutcome {
                    success: false,
                    title: self.window_title.clone(),
                    error_kind,
                }
            }
        }
    }

    /// Write the current document to `path` and make it current.
    ///
    /// The modified flag is only cleared once the backend reports success.
    pub fn save_file_path(
        &mut self,
        path: &Path,
        backend: &dyn DocumentBackend,
        store: &mut dyn SettingsStore,
    ) -> Result<()> {
        let result = self.write_document(path, backend);
        match &result {
            Ok(()) => {
                self.state.set_current_file_path(path, store);
                if let (Some(document), Some(current)) = (self.document.as_mut(), self.state.path()) {
                    document.path = current.to_path_buf();
                }
                info!("Window {} saved {}", self.id, path.display());
            }
            Err(e) => {
                warn!("Window {} failed to save {}: {}", self.id, path.display(), e);
                self.error_message = Some(format!("Could not save {}.\n\n{}", path.display(), e));
            }
        }
        result
    }

    fn write_document(&self, path: &Path, backend: &dyn DocumentBackend) -> Result<()> {
        let document = self.document.as_ref().ok_or(Error::NoDocument)?;
        backend.save(document, path)
    }

    /// Save to the current path, or report that a path is needed.
    pub fn save_file(
        &mut self,
        backend: &dyn DocumentBackend,
        store: &mut dyn SettingsStore,
    ) -> Result<SaveTarget> {
        let Some(path) = self.state.path().map(Path::to_path_buf) else {
            return Ok(SaveTarget::NeedsPath);
        };
        self.save_file_path(&path, backend, store)?;
        Ok(SaveTarget::Saved)
    }

    /// Normalize a save-as target chosen by the user.
    ///
    /// A name without an extension gets the current document's extension,
    /// or [`DEFAULT_EXTENSION`].
    pub fn resolve_save_as_path(&self, chosen: &Path) -> PathBuf {
        if chosen.extension().is_some() {
            return chosen.to_path_buf();
        }
        let ext = self
            .document
            .as_ref()
            .and_then(LoadedDocument::extension)
            .unwrap_or(DEFAULT_EXTENSION);
        chosen.with_extension(ext)
    }

    /// Save-as: resolve the chosen path, then save there.
    pub fn save_file_as(
        &mut self,
        chosen: &Path,
        backend: &dyn DocumentBackend,
        store: &mut dyn SettingsStore,
    ) -> Result<PathBuf> {
        let target = self.resolve_save_as_path(chosen);
        self.save_file_path(&target, backend, store)?;
        Ok(target)
    }

    /// Whether a request to open a file from this window may load into it
    /// instead of spawning another window.
    pub fn can_reuse_for_open(&self) -> bool {
        self.preferences.reuse_untitled_window
            && self.state.is_untitled()
            && !self.state.is_modified()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings and persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-read preferences after a global settings change.
    pub fn reload_settings(&mut self, store: &dyn SettingsStore) {
        self.preferences = load_preferences(store);
        self.zoom_steps = self.zoom_steps.clamp(self.min_zoom_steps(), self.max_zoom_steps());
        debug!("Window {} reloaded settings", self.id);
    }

    /// Write geometry and layout to the store. Called just before the window
    /// is destroyed.
    pub fn persist_state(&self, store: &mut dyn SettingsStore) -> Result<()> {
        write_value(store, keys::GEOMETRY, &self.geometry)?;
        write_value(store, keys::WINDOW_STATE, &self.layout)?;
        debug!("Window {} persisted geometry and layout", self.id);
        Ok(())
    }

    /// Geometry for a window spawned after this one, if it still fits.
    pub fn tile_after(&self, offset: f32, monitor: Option<[f32; 2]>) -> Option<WindowGeometry> {
        self.geometry.offset_within(offset, monitor)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus, errors, full screen
    // ─────────────────────────────────────────────────────────────────────────

    /// Ask the UI to activate and raise this window on the next frame.
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    /// Consume a pending focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Error to show in this window's modal, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Queue `message` for this window's error modal.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Flip full screen and return the new value.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Zoom
    // ─────────────────────────────────────────────────────────────────────────

    fn zoom_step(&self) -> i32 {
        // Sanitized to 5..=100, so the cast cannot truncate.
        self.preferences.zoom_step as i32
    }

    fn percent_for(&self, steps: i32) -> i32 {
        100 + steps * self.zoom_step()
    }

    fn min_zoom_steps(&self) -> i32 {
        -((100 - MIN_ZOOM_PERCENT) / self.zoom_step())
    }

    fn max_zoom_steps(&self) -> i32 {
        (MAX_ZOOM_PERCENT - 100) / self.zoom_step()
    }

    /// Effective zoom in percent.
    pub fn zoom_percent(&self) -> i32 {
        self.percent_for(self.zoom_steps)
    }

    pub fn zoom_in(&mut self) {
        if self.zoom_steps < self.max_zoom_steps() {
            self.zoom_steps += 1;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.zoom_steps > self.min_zoom_steps() {
            self.zoom_steps -= 1;
        }
    }

    /// Back to 100%.
    pub fn zoom_original(&mut self) {
        self.zoom_steps = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search overlay
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_search_bar(&mut self) {
        self.search.visible = !self.search.visible;
        self.search.focus_input = self.search.visible;
    }

    /// Handle an Escape key press.
    ///
    /// Returns `true` if the key was consumed by hiding the search overlay;
    /// otherwise it should propagate.
    pub fn handle_escape(&mut self) -> bool {
        if self.search.visible {
            self.search.visible = false;
            true
        } else {
            false
        }
    }

    /// Answer a search submitted from the overlay.
    ///
    /// The reply is stored on the overlay and returned.
    pub fn submit_search(&mut self, forward: bool, backend: &dyn DocumentBackend) -> String {
        let query = self.search.query.trim().to_string();
        let message = if query.is_empty() {
            "Enter text to search for".to_string()
        } else if let Some(document) = &self.document {
            let request = SearchRequest {
                query: query.clone(),
                forward,
                case_sensitive: self.search.case_sensitive,
            };
            match backend.search(document, &request) {
                SearchOutcome::Unsupported => "Search is not available for this document".to_string(),
                SearchOutcome::Matches(0) => format!("No matches for \"{}\"", query),
                SearchOutcome::Matches(1) => "1 match".to_string(),
                SearchOutcome::Matches(n) => format!("{} matches", n),
            }
        } else {
            "No document loaded".to_string()
        };
        self.search.message = Some(message.clone());
        message
    }
}
