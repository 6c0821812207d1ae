//! About box for Folio
//!
//! Version information and a keyboard reference. The reference is built
//! from [`WindowAction::shortcut_label`], the same table menus and tooltips
//! read, so it always matches what the key handler accepts.

use super::actions::WindowAction;
use super::dialogs::backdrop;
use eframe::egui::{self, Color32, Key, RichText, Ui};

/// Actions listed in the keyboard reference, grouped under a heading.
fn shortcut_groups() -> Vec<(&'static str, Vec<(WindowAction, &'static str)>)> {
    vec![
        (
            "File",
            vec![
                (WindowAction::NewWindow, "New window"),
                (WindowAction::Open, "Open"),
                (WindowAction::Save, "Save"),
                (WindowAction::SaveAs, "Save as"),
                (WindowAction::Close, "Close window"),
                (WindowAction::Quit, "Quit"),
            ],
        ),
        (
            "View",
            vec![
                (WindowAction::ZoomIn, "Zoom in"),
                (WindowAction::ZoomOut, "Zoom out"),
                (WindowAction::ZoomOriginal, "Original size"),
                (WindowAction::ToggleFullscreen, "Full screen"),
                (WindowAction::OpenSettings, "Preferences"),
                (WindowAction::About, "This window"),
            ],
        ),
        (
            "Search",
            vec![
                (WindowAction::ToggleFind, "Show or hide search"),
                (WindowAction::FindNext, "Next match"),
                (WindowAction::FindPrevious, "Previous match"),
            ],
        ),
    ]
}

/// `(keys, description)` rows for one group; actions without a shortcut are
/// left out.
fn shortcut_rows(actions: &[(WindowAction, &'static str)]) -> Vec<(&'static str, &'static str)> {
    actions
        .iter()
        .filter_map(|(action, description)| action.shortcut_label().map(|keys| (keys, *description)))
        .collect()
}

/// Result of showing the about box.
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutPanelOutput {
    pub close_requested: bool,
}

/// State of the about box.
#[derive(Debug, Clone, Default)]
pub struct AboutPanel {
    /// Keyboard reference page instead of the version page
    showing_shortcuts: bool,
}

impl AboutPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the about box over the window. Escape, the Close button or a
    /// click on the backdrop dismiss it.
    pub fn show(&mut self, ctx: &egui::Context, is_dark: bool) -> AboutPanelOutput {
        let mut output = AboutPanelOutput {
            close_requested: backdrop(ctx, "about_backdrop", is_dark)
                || ctx.input(|i| i.key_pressed(Key::Escape)),
        };

        egui::Window::new("About Folio")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(420.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.showing_shortcuts, false, "About");
                    ui.selectable_value(&mut self.showing_shortcuts, true, "Keyboard");
                });
                ui.separator();

                ui.vertical(|ui| {
                    ui.set_min_height(240.0);
                    if self.showing_shortcuts {
                        show_shortcuts(ui, is_dark);
                    } else {
                        show_version(ui);
                    }
                });

                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        output.close_requested = true;
                    }
                });
            });

        output
    }
}

fn show_version(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(16.0);
        ui.label(RichText::new("Folio").size(26.0).strong());
        ui.label(RichText::new(concat!("Version ", env!("CARGO_PKG_VERSION"))).weak());
        ui.add_space(12.0);
        ui.label(env!("CARGO_PKG_DESCRIPTION"));
        ui.add_space(24.0);
        ui.label(
            RichText::new("Built with egui, serde, rfd and clap. MIT licensed.")
                .small()
                .weak(),
        );
    });
}

fn show_shortcuts(ui: &mut Ui, is_dark: bool) {
    let key_color = if is_dark {
        Color32::from_rgb(255, 200, 100)
    } else {
        Color32::from_rgb(150, 80, 0)
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (heading, actions) in shortcut_groups() {
            ui.label(RichText::new(heading).strong());
            egui::Grid::new(("about_shortcuts", heading))
                .num_columns(2)
                .spacing([24.0, 4.0])
                .min_col_width(110.0)
                .show(ui, |ui| {
                    for (keys, description) in shortcut_rows(&actions) {
                        ui.label(RichText::new(keys).monospace().color(key_color));
                        ui.label(description);
                        ui.end_row();
                    }
                });
            ui.add_space(8.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_panel_starts_on_version_page() {
        assert!(!AboutPanel::new().showing_shortcuts);
    }

    #[test]
    fn test_every_listed_action_has_a_shortcut() {
        for (heading, actions) in shortcut_groups() {
            assert_eq!(shortcut_rows(&actions).len(), actions.len(), "{}", heading);
        }
    }

    #[test]
    fn test_rows_skip_actions_without_shortcut() {
        let rows = shortcut_rows(&[
            (WindowAction::ToggleToolbar, "Toolbar"),
            (WindowAction::NewWindow, "New window"),
        ]);
        assert_eq!(rows, vec![("Ctrl+N", "New window")]);
    }
}
