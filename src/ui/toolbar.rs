//! Toolbar Component for Folio
//!
//! A single row of icon buttons under the menu bar. Visibility is part of the
//! window layout persisted under `windowState`.

use super::actions::WindowAction;
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};

/// Height of the toolbar row.
const TOOLBAR_HEIGHT: f32 = 32.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(30.0, 26.0);

/// What the toolbar needs to know about its window.
#[derive(Debug, Clone, Copy)]
pub struct ToolbarState {
    pub can_save: bool,
    pub zoom_percent: i32,
    pub search_visible: bool,
    pub fullscreen: bool,
}

/// Render the toolbar and return any triggered action.
pub fn toolbar(ui: &mut Ui, state: ToolbarState, is_dark: bool) -> Option<WindowAction> {
    let mut action = None;
    let separator_color = if is_dark {
        Color32::from_rgb(70, 70, 70)
    } else {
        Color32::from_rgb(210, 210, 210)
    };

    ui.horizontal(|ui| {
        ui.set_height(TOOLBAR_HEIGHT);
        ui.spacing_mut().item_spacing.x = 2.0;

        let mut button = |ui: &mut Ui, icon: &str, tooltip: &str, value: WindowAction, enabled: bool| {
            let tooltip = match value.shortcut_label() {
                Some(shortcut) => format!("{} ({})", tooltip, shortcut),
                None => tooltip.to_string(),
            };
            if icon_button(ui, icon, &tooltip, enabled, is_dark).clicked() {
                action = Some(value);
            }
        };

        button(ui, "🗋", "New Window", WindowAction::NewWindow, true);
        button(ui, "📂", "Open", WindowAction::Open, true);
        button(ui, "💾", "Save", WindowAction::Save, state.can_save);

        vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 10.0);

        button(ui, "➖", "Zoom Out", WindowAction::ZoomOut, true);
        ui.label(RichText::new(format!("{}%", state.zoom_percent)).size(12.0));
        button(ui, "➕", "Zoom In", WindowAction::ZoomIn, true);
        button(ui, "1:1", "Original Size", WindowAction::ZoomOriginal, true);

        vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 10.0);

        let find_tip = if state.search_visible { "Hide Find" } else { "Find" };
        button(ui, "🔍", find_tip, WindowAction::ToggleFind, true);
        let fullscreen_tip = if state.fullscreen {
            "Leave Full Screen"
        } else {
            "Full Screen"
        };
        button(ui, "⛶", fullscreen_tip, WindowAction::ToggleFullscreen, true);
    });

    action
}

fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool, is_dark: bool) -> Response {
    let text_color = match (enabled, is_dark) {
        (true, true) => Color32::from_rgb(220, 220, 220),
        (true, false) => Color32::from_rgb(50, 50, 50),
        (false, true) => Color32::from_rgb(100, 100, 100),
        (false, false) => Color32::from_rgb(160, 160, 160),
    };
    let hover_bg = if is_dark {
        Color32::from_rgb(60, 60, 60)
    } else {
        Color32::from_rgb(220, 220, 220)
    };

    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(" ").size(15.0))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
    }

    ui.painter().text(
        btn.rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(15.0),
        text_color,
    );

    btn.on_hover_text(tooltip)
}

fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    ui.add_space(4.0);
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
    ui.add_space(4.0);
}
