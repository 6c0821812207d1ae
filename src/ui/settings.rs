//! Settings Panel Component for Folio
//!
//! A modal preferences panel. It edits a draft [`Preferences`] value; the
//! application writes the draft to the settings store whenever it changes
//! and then tells every window to reload.

use super::dialogs::backdrop;
use crate::config::{Preferences, Theme};
use eframe::egui::{self, RichText, Ui};

/// Settings panel sections for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsSection {
    #[default]
    Appearance,
    Viewing,
    Files,
}

impl SettingsSection {
    pub fn label(&self) -> &'static str {
        match self {
            SettingsSection::Appearance => "Appearance",
            SettingsSection::Viewing => "Viewing",
            SettingsSection::Files => "Files",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SettingsSection::Appearance => "🎨",
            SettingsSection::Viewing => "🔍",
            SettingsSection::Files => "📁",
        }
    }
}

/// Result of showing the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanelOutput {
    /// Whether the preferences were modified.
    pub changed: bool,
    /// Whether the panel should be closed.
    pub close_requested: bool,
    /// Whether a reset to defaults was requested.
    pub reset_requested: bool,
    /// Whether the recent files list should be emptied.
    pub clear_recent_requested: bool,
}

/// Settings panel state and rendering.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    active_section: SettingsSection,
}

impl SettingsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the settings panel as a modal window over `ctx`.
    ///
    /// `recent_count` is only used for display.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        preferences: &mut Preferences,
        recent_count: usize,
        is_dark: bool,
    ) -> SettingsPanelOutput {
        let mut output = SettingsPanelOutput {
            close_requested: backdrop(ctx, "settings_backdrop", is_dark)
                || ctx.input(|i| i.key_pressed(egui::Key::Escape)),
            ..Default::default()
        };

        egui::Window::new("⚙ Preferences")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(460.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.set_min_width(120.0);

                        for section in [
                            SettingsSection::Appearance,
                            SettingsSection::Viewing,
                            SettingsSection::Files,
                        ] {
                            let selected = self.active_section == section;
                            let text = format!("{} {}", section.icon(), section.label());
                            let btn = ui.add_sized(
                                [110.0, 32.0],
                                egui::SelectableLabel::new(selected, RichText::new(text).size(14.0)),
                            );
                            if btn.clicked() {
                                self.active_section = section;
                            }
                        }

                        ui.add_space(ui.available_height() - 40.0);

                        if ui
                            .add_sized([110.0, 28.0], egui::Button::new("↺ Reset All"))
                            .on_hover_text("Reset all preferences to defaults")
                            .clicked()
                        {
                            output.reset_requested = true;
                        }
                    });

                    ui.separator();

                    ui.vertical(|ui| {
                        ui.set_min_width(300.0);
                        ui.set_min_height(240.0);

                        let changed = match self.active_section {
                            SettingsSection::Appearance => show_appearance_section(ui, preferences),
                            SettingsSection::Viewing => show_viewing_section(ui, preferences),
                            SettingsSection::Files => {
                                show_files_section(ui, preferences, recent_count, &mut output)
                            }
                        };
                        output.changed |= changed;
                    });
                });

                ui.separator();

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            output.close_requested = true;
                        }
                        ui.label(
                            RichText::new("Preferences are saved automatically")
                                .small()
                                .weak(),
                        );
                    });
                });
            });

        output
    }
}

fn show_appearance_section(ui: &mut Ui, preferences: &mut Preferences) -> bool {
    let mut changed = false;

    ui.heading("Appearance");
    ui.add_space(8.0);
    ui.label(RichText::new("Theme").strong());
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        for theme in Theme::all() {
            let icon = match theme {
                Theme::Light => "☀",
                Theme::Dark => "🌙",
                Theme::System => "💻",
            };
            let label = format!("{} {}", icon, theme.label());
            if ui
                .selectable_value(&mut preferences.theme, *theme, label)
                .changed()
            {
                changed = true;
            }
        }
    });

    changed
}

fn show_viewing_section(ui: &mut Ui, preferences: &mut Preferences) -> bool {
    let mut changed = false;

    ui.heading("Viewing");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Zoom Step").strong());
        ui.add_space(8.0);
        ui.label(format!("{}%", preferences.zoom_step));
    });
    ui.add_space(4.0);

    let slider = ui.add(
        egui::Slider::new(
            &mut preferences.zoom_step,
            Preferences::MIN_ZOOM_STEP..=Preferences::MAX_ZOOM_STEP,
        )
        .show_value(false)
        .step_by(5.0),
    );
    if slider.changed() {
        changed = true;
    }

    ui.horizontal(|ui| {
        for step in [10u32, 25, 50] {
            if ui.small_button(format!("{}%", step)).clicked() {
                preferences.zoom_step = step;
                changed = true;
            }
        }
    });

    changed
}

fn show_files_section(
    ui: &mut Ui,
    preferences: &mut Preferences,
    recent_count: usize,
    output: &mut SettingsPanelOutput,
) -> bool {
    let mut changed = false;

    ui.heading("Files");
    ui.add_space(8.0);

    if ui
        .checkbox(
            &mut preferences.reuse_untitled_window,
            "Open files in the current window when it is empty",
        )
        .on_hover_text("Otherwise every opened file gets a new window")
        .changed()
    {
        changed = true;
    }

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(recent_count > 0, egui::Button::new("Clear Recent Files"))
            .on_hover_text("Remove all files from the recent files list")
            .clicked()
        {
            output.clear_recent_requested = true;
        }
        if recent_count > 0 {
            ui.label(
                RichText::new(format!("({} files)", recent_count))
                    .small()
                    .weak(),
            );
        }
    });

    changed
}
