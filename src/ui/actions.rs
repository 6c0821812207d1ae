//! Window actions and their keyboard shortcuts.
//!
//! Menus, the toolbar and shortcuts all produce a [`WindowAction`]. Actions
//! are collected while the window's UI is drawn and executed afterwards so
//! the handlers can borrow the registry freely.

use eframe::egui::{self, Key, Modifiers};
use std::path::PathBuf;

/// Something the user asked a window to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowAction {
    /// New empty window (Ctrl+N)
    NewWindow,
    /// Open file dialog (Ctrl+O)
    Open,
    /// Entry of the recent files menu
    OpenRecent(PathBuf),
    /// Save to the current path (Ctrl+S)
    Save,
    /// Save As dialog (Ctrl+Shift+S)
    SaveAs,
    /// Close this window (Ctrl+W)
    Close,
    /// Close every window (Ctrl+Q)
    Quit,
    /// Ctrl+=
    ZoomIn,
    /// Ctrl+-
    ZoomOut,
    /// Ctrl+0
    ZoomOriginal,
    /// F11
    ToggleFullscreen,
    /// Show or hide the search overlay (Ctrl+F)
    ToggleFind,
    /// Search forward (F3)
    FindNext,
    /// Search backward (Shift+F3)
    FindPrevious,
    ToggleToolbar,
    ToggleStatusBar,
    /// Preferences panel (Ctrl+,)
    OpenSettings,
    /// About box (F1)
    About,
}

impl WindowAction {
    /// Map a key press to an action.
    ///
    /// More specific chords are checked first so that Ctrl+Shift+S does not
    /// also trigger Save.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Self> {
        let cmd = modifiers.command || modifiers.ctrl;
        let shift = modifiers.shift;

        let action = match key {
            Key::S if cmd && shift => Self::SaveAs,
            Key::S if cmd => Self::Save,
            Key::O if cmd => Self::Open,
            Key::N if cmd => Self::NewWindow,
            Key::W if cmd => Self::Close,
            Key::Q if cmd => Self::Quit,
            Key::F if cmd && !shift => Self::ToggleFind,
            Key::Equals | Key::Plus if cmd => Self::ZoomIn,
            Key::Minus if cmd => Self::ZoomOut,
            Key::Num0 if cmd => Self::ZoomOriginal,
            Key::Comma if cmd => Self::OpenSettings,
            Key::F3 if shift => Self::FindPrevious,
            Key::F3 => Self::FindNext,
            Key::F11 => Self::ToggleFullscreen,
            Key::F1 => Self::About,
            _ => return None,
        };
        Some(action)
    }

    /// Shortcut text shown in menus and tooltips.
    pub fn shortcut_label(&self) -> Option<&'static str> {
        let label = match self {
            Self::NewWindow => "Ctrl+N",
            Self::Open => "Ctrl+O",
            Self::Save => "Ctrl+S",
            Self::SaveAs => "Ctrl+Shift+S",
            Self::Close => "Ctrl+W",
            Self::Quit => "Ctrl+Q",
            Self::ZoomIn => "Ctrl+=",
            Self::ZoomOut => "Ctrl+-",
            Self::ZoomOriginal => "Ctrl+0",
            Self::ToggleFullscreen => "F11",
            Self::ToggleFind => "Ctrl+F",
            Self::FindNext => "F3",
            Self::FindPrevious => "Shift+F3",
            Self::OpenSettings => "Ctrl+,",
            Self::About => "F1",
            Self::OpenRecent(_) | Self::ToggleToolbar | Self::ToggleStatusBar => return None,
        };
        Some(label)
    }
}

/// Collect the shortcut actions pressed this frame.
///
/// Returns the actions and whether Escape was pressed.
pub fn poll_shortcuts(ctx: &egui::Context) -> (Vec<WindowAction>, bool) {
    ctx.input(|i| {
        let mut actions = Vec::new();
        let mut escape = false;
        for event in &i.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } = event
            {
                if *key == Key::Escape && modifiers.is_none() {
                    escape = true;
                } else if let Some(action) = WindowAction::from_key(*key, *modifiers) {
                    log::debug!("Keyboard shortcut: {:?}", action);
                    actions.push(action);
                }
            }
        }
        (actions, escape)
    })
}
