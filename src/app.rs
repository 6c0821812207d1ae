//! Main application module for Folio
//!
//! `FolioApp` drives every document window from a single `eframe::App`. The
//! root native viewport always hosts the oldest live window; every other
//! window is an immediate viewport keyed by its [`WindowId`]. When the last
//! window closes the root viewport is closed and the process exits.

use crate::config::{Preferences, WindowGeometry};
use crate::files::dialogs::{open_documents_dialog, save_document_dialog};
use crate::session::{
    CloseChoice, CloseOutcome, DocumentWindow, SaveTarget, WindowId, WindowRegistry, UNTITLED,
};
use crate::theme::ThemeManager;
use crate::ui::{
    confirm_close_dialog, document_view, error_dialog, menu_bar, poll_shortcuts, search_bar,
    status_bar, toolbar, AboutPanel, SettingsPanel, ToolbarState, WindowAction,
};
use eframe::egui::{self, IconData, ViewportBuilder, ViewportCommand, ViewportId};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Smallest size a document window may be resized to.
const MIN_WINDOW_SIZE: [f32; 2] = [400.0, 300.0];

/// Viewport builder for `window`, placed where its geometry says.
pub fn viewport_builder(window: &DocumentWindow, icon: Option<&Arc<IconData>>) -> ViewportBuilder {
    let geometry = window.geometry();
    let mut builder = ViewportBuilder::default()
        .with_title(window.title_bar_text())
        .with_inner_size([geometry.width, geometry.height])
        .with_min_inner_size(MIN_WINDOW_SIZE)
        .with_maximized(geometry.maximized);

    if let (Some(x), Some(y)) = (geometry.x, geometry.y) {
        builder = builder.with_position([x, y]);
    }
    if let Some(icon) = icon {
        builder = builder.with_icon(Arc::clone(icon));
    }
    builder
}

/// Viewport id of a window shown outside the root viewport.
fn child_viewport_id(id: WindowId) -> ViewportId {
    ViewportId::from_hash_of(("folio-window", id.0))
}

/// Copy the native window's size and position into `window`.
///
/// Nothing is recorded while full screen, and a maximized window keeps the
/// size it will be restored to.
fn track_geometry(ctx: &egui::Context, window: &mut DocumentWindow) {
    let (inner, outer, maximized, fullscreen) = ctx.input(|i| {
        let viewport = i.viewport();
        (
            viewport.inner_rect,
            viewport.outer_rect,
            viewport.maximized.unwrap_or(false),
            viewport.fullscreen.unwrap_or(false),
        )
    });
    if fullscreen {
        return;
    }

    let mut geometry = *window.geometry();
    geometry.maximized = maximized;
    if !maximized {
        if let Some(inner) = inner {
            geometry.width = inner.width();
            geometry.height = inner.height();
        }
        if let Some(outer) = outer {
            geometry.x = Some(outer.min.x);
            geometry.y = Some(outer.min.y);
        }
    }

    if geometry != *window.geometry() {
        window.set_geometry(geometry);
    }
}

/// Escape closes the search overlay first, then leaves full screen.
fn escape_action(window: &mut DocumentWindow) -> Option<WindowAction> {
    if window.handle_escape() || !window.is_fullscreen() {
        None
    } else {
        Some(WindowAction::ToggleFullscreen)
    }
}

/// Move the root viewport onto the geometry of the window it now hosts.
fn move_root_to(ctx: &egui::Context, geometry: &WindowGeometry) {
    if let (Some(x), Some(y)) = (geometry.x, geometry.y) {
        ctx.send_viewport_cmd_to(
            ViewportId::ROOT,
            ViewportCommand::OuterPosition(egui::pos2(x, y)),
        );
    }
    ctx.send_viewport_cmd_to(
        ViewportId::ROOT,
        ViewportCommand::InnerSize(egui::vec2(geometry.width, geometry.height)),
    );
    ctx.send_viewport_cmd_to(ViewportId::ROOT, ViewportCommand::Maximized(geometry.maximized));
    ctx.send_viewport_cmd_to(ViewportId::ROOT, ViewportCommand::Focus);
}

/// What a window's modal settings panel reported this frame.
#[derive(Default)]
struct SettingsRequests {
    changed: bool,
    reset: bool,
    clear_recent: bool,
}

/// The multi-window viewer shell.
pub struct FolioApp {
    registry: WindowRegistry,
    theme_manager: ThemeManager,
    /// Theme generation last pushed into the egui context
    applied_theme: u64,
    settings_panel: SettingsPanel,
    /// Window showing the preferences panel
    settings_target: Option<WindowId>,
    /// Preferences being edited in the panel
    preferences_draft: Preferences,
    about_panel: AboutPanel,
    about_target: Option<WindowId>,
    /// Builders are created once per window; later changes go through
    /// viewport commands so the window is not moved back every frame.
    viewport_builders: HashMap<WindowId, ViewportBuilder>,
    /// Window currently hosted by the root viewport
    root_window: Option<WindowId>,
    icon: Option<Arc<IconData>>,
}

impl FolioApp {
    /// Create the application around an already populated registry.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        registry: WindowRegistry,
        icon: Option<Arc<IconData>>,
    ) -> Self {
        info!("Initializing Folio with {} window(s)", registry.len());

        let preferences = registry.preferences();
        let mut theme_manager = ThemeManager::new(preferences.theme);
        theme_manager.set_system_dark_mode(
            cc.integration_info
                .system_theme
                .map(|theme| theme == eframe::Theme::Dark),
        );
        let mut applied_theme = 0;
        theme_manager.apply_to(&cc.egui_ctx, &mut applied_theme);
        info!("Applied initial theme: {:?}", preferences.theme);

        Self {
            root_window: registry.windows().first().map(DocumentWindow::id),
            registry,
            theme_manager,
            applied_theme,
            settings_panel: SettingsPanel::new(),
            settings_target: None,
            preferences_draft: preferences,
            about_panel: AboutPanel::new(),
            about_target: None,
            viewport_builders: HashMap::new(),
            icon,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────────

    /// Keep the root viewport attached to the oldest live window.
    fn update_root_host(&mut self, ctx: &egui::Context) -> Option<WindowId> {
        let host = self.registry.windows().first().map(DocumentWindow::id)?;
        if self.root_window != Some(host) {
            debug!("Root viewport now hosts window {}", host);
            self.viewport_builders.remove(&host);
            if let Some(window) = self.registry.window(host) {
                move_root_to(ctx, window.geometry());
            }
            self.root_window = Some(host);
        }
        Some(host)
    }

    /// Draw one document window into `ctx` and run what it asked for.
    fn show_window(&mut self, ctx: &egui::Context, id: WindowId) {
        let is_dark = self.theme_manager.is_dark();
        let recent_files = self.registry.recent_files();
        let settings_open = self.settings_target == Some(id);
        let about_open = self.about_target == Some(id);

        let mut actions: Vec<WindowAction> = Vec::new();
        let mut dropped: Vec<PathBuf> = Vec::new();
        let mut close_choice = None;
        let mut settings_requests = SettingsRequests::default();
        let mut settings_closed = false;
        let mut about_closed = false;

        let Some(window) = self.registry.window_mut(id) else {
            return;
        };

        track_geometry(ctx, window);
        let focused = ctx.input(|i| i.viewport().focused.unwrap_or(false));
        ctx.send_viewport_cmd(ViewportCommand::Title(window.title_bar_text()));
        if window.take_focus_request() {
            ctx.send_viewport_cmd(ViewportCommand::Focus);
        }

        // Native close buttons go through the close policy like Ctrl+W
        if ctx.input(|i| i.viewport().close_requested()) {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            if !window.close_policy().is_confirming() {
                actions.push(WindowAction::Close);
            }
        }

        let modal_open = settings_open
            || about_open
            || window.close_policy().is_confirming()
            || window.error_message().is_some();
        if !modal_open {
            let (shortcuts, escape) = poll_shortcuts(ctx);
            actions.extend(shortcuts);
            if escape {
                actions.extend(escape_action(window));
            }
            dropped = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|file| file.path.clone())
                    .collect()
            });
        }

        let layout = *window.layout();
        let can_save = window.document().is_some();

        egui::TopBottomPanel::top(egui::Id::new(("menu_bar", id.0))).show(ctx, |ui| {
            actions.extend(menu_bar(ui, &recent_files, &layout, can_save));
        });

        if layout.show_toolbar {
            let state = ToolbarState {
                can_save,
                zoom_percent: window.zoom_percent(),
                search_visible: window.search.visible,
                fullscreen: window.is_fullscreen(),
            };
            egui::TopBottomPanel::top(egui::Id::new(("toolbar", id.0))).show(ctx, |ui| {
                actions.extend(toolbar(ui, state, is_dark));
            });
        }

        if window.search.visible {
            egui::TopBottomPanel::top(egui::Id::new(("search_bar", id.0))).show(ctx, |ui| {
                let output = search_bar(ui, &mut window.search, is_dark);
                match output.submitted {
                    Some(true) => actions.push(WindowAction::FindNext),
                    Some(false) => actions.push(WindowAction::FindPrevious),
                    None => {}
                }
                if output.close_requested {
                    window.search.visible = false;
                }
            });
        }

        if layout.show_status_bar {
            egui::TopBottomPanel::bottom(egui::Id::new(("status_bar", id.0))).show(ctx, |ui| {
                status_bar(ui, window);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            actions.extend(document_view(ui, window, &recent_files, is_dark));
        });

        // Modals, most urgent first
        if window.close_policy().is_confirming() {
            close_choice = confirm_close_dialog(ctx, window.state().display_title(), is_dark);
        } else if let Some(message) = window.error_message().map(str::to_owned) {
            if error_dialog(ctx, &message, is_dark) {
                window.dismiss_error();
            }
        } else if settings_open {
            let output = self.settings_panel.show(
                ctx,
                &mut self.preferences_draft,
                recent_files.len(),
                is_dark,
            );
            settings_requests = SettingsRequests {
                changed: output.changed,
                reset: output.reset_requested,
                clear_recent: output.clear_recent_requested,
            };
            settings_closed = output.close_requested;
        } else if about_open {
            about_closed = self.about_panel.show(ctx, is_dark).close_requested;
        }

        if focused {
            self.registry.set_focused(id);
        }
        if settings_closed {
            self.settings_target = None;
        }
        if about_closed {
            self.about_target = None;
        }
        self.apply_settings_requests(id, settings_requests);

        if let Some(choice) = close_choice {
            self.resolve_close(id, choice);
        }
        for path in dropped {
            self.open_from(id, &path);
        }
        for action in actions {
            if self.registry.window(id).is_none() {
                break;
            }
            self.execute(ctx, id, action);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn execute(&mut self, ctx: &egui::Context, id: WindowId, action: WindowAction) {
        debug!("Window {} action: {:?}", id, action);
        match action {
            WindowAction::NewWindow => {
                self.registry.open_path(Path::new(""));
            }
            WindowAction::Open => {
                let initial_dir = self.initial_dir(id);
                for path in open_documents_dialog(initial_dir.as_deref()) {
                    self.open_from(id, &path);
                }
            }
            WindowAction::OpenRecent(path) => self.open_from(id, &path),
            WindowAction::Save => self.save(id),
            WindowAction::SaveAs => {
                self.save_as(id);
            }
            WindowAction::Close => self.close_window(id),
            WindowAction::Quit => self.quit(),
            WindowAction::FindNext => self.find(id, true),
            WindowAction::FindPrevious => self.find(id, false),
            WindowAction::OpenSettings => {
                self.preferences_draft = self.registry.preferences();
                self.about_target = None;
                self.settings_target = Some(id);
            }
            WindowAction::About => {
                self.settings_target = None;
                self.about_target = Some(id);
            }
            action => {
                let Some(window) = self.registry.window_mut(id) else {
                    return;
                };
                match action {
                    WindowAction::ZoomIn => window.zoom_in(),
                    WindowAction::ZoomOut => window.zoom_out(),
                    WindowAction::ZoomOriginal => window.zoom_original(),
                    WindowAction::ToggleFullscreen => {
                        let fullscreen = window.toggle_fullscreen();
                        ctx.send_viewport_cmd(ViewportCommand::Fullscreen(fullscreen));
                    }
                    WindowAction::ToggleFind => window.toggle_search_bar(),
                    WindowAction::ToggleToolbar => window.toggle_toolbar(),
                    WindowAction::ToggleStatusBar => window.toggle_status_bar(),
                    _ => {}
                }
            }
        }
    }

    /// Directory the file dialogs start in: next to the window's document.
    fn initial_dir(&self, id: WindowId) -> Option<PathBuf> {
        self.registry
            .window(id)
            .and_then(DocumentWindow::path)
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }

    /// Open `path` on behalf of window `id`.
    ///
    /// Load failures are already queued on the target window's error modal.
    fn open_from(&mut self, id: WindowId, path: &Path) {
        let opened = self.registry.open_in_window(id, path);
        match &opened.load {
            Some(load) if !load.success => debug!(
                "Open of {} failed in window {}: {:?}",
                path.display(),
                opened.id,
                load.error_kind
            ),
            None if !opened.created => {
                debug!("{} is shown by window {}", path.display(), opened.id)
            }
            _ => {}
        }
    }

    fn save(&mut self, id: WindowId) {
        match self.registry.save(id) {
            Ok(SaveTarget::Saved) => {}
            Ok(SaveTarget::NeedsPath) => {
                self.save_as(id);
            }
            // The window already holds the error for its modal
            Err(e) => debug!("Save of window {} failed: {}", id, e),
        }
    }

    /// Ask for a target and save there. Returns `true` if a file was written.
    fn save_as(&mut self, id: WindowId) -> bool {
        let Some(chosen) = self.ask_save_path(id) else {
            return false;
        };
        match self.registry.save_as(id, &chosen) {
            Ok(path) => {
                debug!("Window {} saved as {}", id, path.display());
                true
            }
            Err(e) => {
                debug!("Save as of window {} failed: {}", id, e);
                false
            }
        }
    }

    fn ask_save_path(&self, id: WindowId) -> Option<PathBuf> {
        let window = self.registry.window(id)?;
        let default_name = window
            .path()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.pdf", UNTITLED));
        save_document_dialog(self.initial_dir(id).as_deref(), &default_name)
    }

    fn find(&mut self, id: WindowId, forward: bool) {
        if let Some(window) = self.registry.window_mut(id) {
            if !window.search.visible {
                window.toggle_search_bar();
            }
        }
        if let Some(message) = self.registry.submit_search(id, forward) {
            debug!("Window {} search: {}", id, message);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Closing
    // ─────────────────────────────────────────────────────────────────────────

    fn close_window(&mut self, id: WindowId) {
        match self.registry.request_close(id) {
            CloseOutcome::Closed => self.forget_window(id),
            outcome => debug!("Close of window {} pending: {:?}", id, outcome),
        }
    }

    fn resolve_close(&mut self, id: WindowId, choice: CloseChoice) {
        let mut outcome = self.registry.resolve_close(id, choice);
        if outcome == CloseOutcome::NeedsSavePath {
            let chosen = self.ask_save_path(id);
            outcome = self.registry.complete_close_save_as(id, chosen.as_deref());
        }
        match outcome {
            CloseOutcome::Closed => self.forget_window(id),
            CloseOutcome::Blocked => info!("Window {} stays open", id),
            _ => {}
        }
    }

    fn quit(&mut self) {
        let before = self.registry.ids();
        let pending = self.registry.close_all();
        for id in before {
            if self.registry.window(id).is_none() {
                self.forget_window(id);
            }
        }
        if !pending.is_empty() {
            info!("Quit waiting on {} window(s) with unsaved changes", pending.len());
        }
    }

    /// Drop UI state kept for a window that no longer exists.
    fn forget_window(&mut self, id: WindowId) {
        self.viewport_builders.remove(&id);
        if self.settings_target == Some(id) {
            self.settings_target = None;
        }
        if self.about_target == Some(id) {
            self.about_target = None;
        }
        if self.root_window == Some(id) {
            self.root_window = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_settings_requests(&mut self, id: WindowId, requests: SettingsRequests) {
        if requests.reset {
            self.preferences_draft = Preferences::default();
        }
        if requests.changed || requests.reset {
            self.theme_manager.set_theme(self.preferences_draft.theme);
            if let Err(e) = self.registry.update_preferences(&self.preferences_draft) {
                warn!("Failed to save preferences: {}", e);
                if let Some(window) = self.registry.window_mut(id) {
                    window.show_error(format!("Could not save preferences.\n\n{}", e));
                }
            }
        }
        if requests.clear_recent {
            if let Err(e) = self.registry.clear_recent_files() {
                warn!("Failed to clear recent files: {}", e);
            }
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.theme_manager.set_system_dark_mode(
            frame
                .info()
                .system_theme
                .map(|theme| theme == eframe::Theme::Dark),
        );
        self.theme_manager.apply_to(ctx, &mut self.applied_theme);

        let monitor = ctx.input(|i| i.viewport().monitor_size);
        self.registry.set_monitor_size(monitor.map(|size| [size.x, size.y]));

        let Some(host) = self.update_root_host(ctx) else {
            info!("Last window closed, exiting");
            ctx.send_viewport_cmd_to(ViewportId::ROOT, ViewportCommand::Close);
            return;
        };

        self.show_window(ctx, host);

        for id in self.registry.ids() {
            if Some(id) == self.root_window {
                continue;
            }
            let icon = self.icon.clone();
            let builder = match self.registry.window(id) {
                Some(window) => self
                    .viewport_builders
                    .entry(id)
                    .or_insert_with(|| viewport_builder(window, icon.as_ref()))
                    .clone(),
                None => continue,
            };
            ctx.show_viewport_immediate(child_viewport_id(id), builder, |ctx, _class| {
                self.show_window(ctx, id);
            });
        }

        let live = self.registry.ids();
        self.viewport_builders.retain(|id, _| live.contains(id));

        if self.registry.is_empty() {
            info!("Last window closed, exiting");
            ctx.send_viewport_cmd_to(ViewportId::ROOT, ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if !self.registry.is_empty() {
            self.registry.persist_all();
        }
        info!("Application exiting");
    }
}
