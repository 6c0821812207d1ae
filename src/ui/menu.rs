//! Menu bar shown at the top of every document window.

use super::actions::WindowAction;
use crate::config::WindowLayout;
use eframe::egui::{self, Ui};
use std::path::{Path, PathBuf};

/// Render the menu bar and return the action picked, if any.
///
/// `recent_files` should be a fresh snapshot; the menu never caches it.
pub fn menu_bar(
    ui: &mut Ui,
    recent_files: &[PathBuf],
    layout: &WindowLayout,
    can_save: bool,
) -> Option<WindowAction> {
    let mut action = None;

    egui::menu::bar(ui, |ui| {
        ui.menu_button("File", |ui| {
            item(ui, &mut action, "New Window", WindowAction::NewWindow, true);
            item(ui, &mut action, "Open…", WindowAction::Open, true);

            ui.add_enabled_ui(!recent_files.is_empty(), |ui| {
                ui.menu_button("Open Recent", |ui| {
                    for (index, path) in recent_files.iter().enumerate() {
                        let label = recent_label(index, path);
                        if ui
                            .button(label)
                            .on_hover_text(path.display().to_string())
                            .clicked()
                        {
                            action = Some(WindowAction::OpenRecent(path.clone()));
                            ui.close_menu();
                        }
                    }
                });
            });

            ui.separator();
            item(ui, &mut action, "Save", WindowAction::Save, can_save);
            item(ui, &mut action, "Save As…", WindowAction::SaveAs, can_save);
            ui.separator();
            item(ui, &mut action, "Close", WindowAction::Close, true);
            item(ui, &mut action, "Quit", WindowAction::Quit, true);
        });

        ui.menu_button("Edit", |ui| {
            item(ui, &mut action, "Find", WindowAction::ToggleFind, true);
            item(ui, &mut action, "Find Next", WindowAction::FindNext, true);
            item(ui, &mut action, "Find Previous", WindowAction::FindPrevious, true);
            ui.separator();
            item(ui, &mut action, "Preferences…", WindowAction::OpenSettings, true);
        });

        ui.menu_button("View", |ui| {
            item(ui, &mut action, "Zoom In", WindowAction::ZoomIn, true);
            item(ui, &mut action, "Zoom Out", WindowAction::ZoomOut, true);
            item(ui, &mut action, "Original Size", WindowAction::ZoomOriginal, true);
            ui.separator();
            item(ui, &mut action, "Full Screen", WindowAction::ToggleFullscreen, true);
            ui.separator();

            let mut toolbar = layout.show_toolbar;
            if ui.checkbox(&mut toolbar, "Toolbar").clicked() {
                action = Some(WindowAction::ToggleToolbar);
                ui.close_menu();
            }
            let mut status_bar = layout.show_status_bar;
            if ui.checkbox(&mut status_bar, "Status Bar").clicked() {
                action = Some(WindowAction::ToggleStatusBar);
                ui.close_menu();
            }
        });

        ui.menu_button("Help", |ui| {
            item(ui, &mut action, "About Folio", WindowAction::About, true);
        });
    });

    action
}

fn item(
    ui: &mut Ui,
    action: &mut Option<WindowAction>,
    label: &str,
    value: WindowAction,
    enabled: bool,
) {
    let mut button = egui::Button::new(label);
    if let Some(shortcut) = value.shortcut_label() {
        button = button.shortcut_text(shortcut);
    }
    if ui.add_enabled(enabled, button).clicked() {
        *action = Some(value);
        ui.close_menu();
    }
}

/// Menu label for a recent file, numbered from one.
fn recent_label(index: usize, path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("{} {}", index + 1, name)
}
