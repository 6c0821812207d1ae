//! Conversion of a [`Palette`] into egui `Visuals`.

use super::Palette;
use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

const WIDGET_ROUNDING: f32 = 4.0;
const WINDOW_ROUNDING: f32 = 8.0;

/// Build egui visuals for `palette`.
pub fn build_visuals(palette: &Palette) -> Visuals {
    let dark = palette.is_dark();
    let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };

    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.background;
    visuals.extreme_bg_color = palette.canvas;
    visuals.faint_bg_color = palette.background_secondary;

    visuals.override_text_color = None;
    visuals.warn_fg_color = palette.warning;
    visuals.error_fg_color = palette.error;
    visuals.hyperlink_color = palette.link;

    visuals.selection.bg_fill = palette.selected;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);

    let rounding = Rounding::same(WIDGET_ROUNDING);
    let widgets = &mut visuals.widgets;

    widgets.noninteractive.bg_fill = palette.background_secondary;
    widgets.noninteractive.weak_bg_fill = palette.background_secondary;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border_subtle);
    widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text);
    widgets.noninteractive.rounding = rounding;

    widgets.inactive.bg_fill = palette.background_secondary;
    widgets.inactive.weak_bg_fill = palette.background_secondary;
    widgets.inactive.bg_stroke = Stroke::new(1.0, palette.border);
    widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text_secondary);
    widgets.inactive.rounding = rounding;

    widgets.hovered.bg_fill = palette.hover;
    widgets.hovered.weak_bg_fill = palette.hover;
    widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent);
    widgets.hovered.fg_stroke = Stroke::new(1.5, palette.text);
    widgets.hovered.rounding = rounding;

    widgets.active.bg_fill = palette.accent;
    widgets.active.weak_bg_fill = palette.selected;
    widgets.active.bg_stroke = Stroke::new(1.0, palette.accent_hover);
    widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    widgets.active.rounding = rounding;

    widgets.open.bg_fill = palette.selected;
    widgets.open.weak_bg_fill = palette.selected;
    widgets.open.bg_stroke = Stroke::new(1.0, palette.accent);
    widgets.open.fg_stroke = Stroke::new(1.0, palette.text);
    widgets.open.rounding = rounding;

    let shadow = Color32::from_black_alpha(palette.shadow_alpha);
    visuals.window_rounding = Rounding::same(WINDOW_ROUNDING);
    visuals.window_stroke = Stroke::new(1.0, palette.border);
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 2.0),
        blur: 8.0,
        spread: 0.0,
        color: shadow,
    };
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 12.0,
        spread: 0.0,
        color: shadow,
    };
    visuals.menu_rounding = rounding;

    visuals.button_frame = true;
    visuals.striped = true;
    visuals.slider_trailing_fill = true;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    visuals.dark_mode = dark;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_visuals_is_light_mode() {
        let visuals = build_visuals(&Palette::light());
        assert!(!visuals.dark_mode);
        assert_eq!(visuals.panel_fill, Palette::light().background);
    }

    #[test]
    fn test_dark_visuals_is_dark_mode() {
        let visuals = build_visuals(&Palette::dark());
        assert!(visuals.dark_mode);
        assert_eq!(visuals.extreme_bg_color, Palette::dark().canvas);
    }

    #[test]
    fn test_dark_shadows_are_stronger() {
        let light = build_visuals(&Palette::light());
        let dark = build_visuals(&Palette::dark());
        assert!(dark.window_shadow.color.a() > light.window_shadow.color.a());
    }
}
