//! Modal dialogs for a document window.
//!
//! The unsaved-changes prompt and the error notification. Each one is drawn
//! inside the window it belongs to, over a dimmed backdrop that swallows
//! clicks meant for the document.

use crate::session::CloseChoice;
use eframe::egui::{self, Color32, Key, RichText};

fn dialog_colors(is_dark: bool) -> (Color32, Color32) {
    if is_dark {
        (Color32::from_rgb(40, 40, 45), Color32::from_rgb(70, 70, 80))
    } else {
        (Color32::from_rgb(250, 250, 250), Color32::from_rgb(180, 180, 190))
    }
}

/// Dim the whole window under a modal. Returns `true` if the dimmed area
/// was clicked.
pub(super) fn backdrop(ctx: &egui::Context, id: &str, is_dark: bool) -> bool {
    let screen_rect = ctx.screen_rect();
    let alpha = if is_dark { 160 } else { 100 };
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Middle)
        .fixed_pos(screen_rect.min)
        .show(ctx, |ui| {
            let response = ui.allocate_response(screen_rect.size(), egui::Sense::click());
            ui.painter()
                .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(alpha));
            response.clicked()
        })
        .inner
}

/// Ask whether to save `document_title` before closing.
///
/// Returns the choice once a button is clicked. Escape counts as Cancel.
pub fn confirm_close_dialog(
    ctx: &egui::Context,
    document_title: &str,
    is_dark: bool,
) -> Option<CloseChoice> {
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return Some(CloseChoice::Cancel);
    }

    let (bg_color, border_color) = dialog_colors(is_dark);
    let mut choice = None;

    backdrop(ctx, "confirm_close_backdrop", is_dark);
    egui::Window::new("Unsaved Changes")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(340.0);
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "Do you want to save the changes to \"{}\"?",
                    document_title
                ))
                .strong(),
            );
            ui.label("Your changes will be lost if you don't save them.");
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save").clicked() {
                        choice = Some(CloseChoice::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        choice = Some(CloseChoice::Cancel);
                    }
                    ui.add_space(16.0);
                    if ui.button("Don't Save").clicked() {
                        choice = Some(CloseChoice::Discard);
                    }
                });
            });
            ui.add_space(4.0);
        });

    choice
}

/// Show `message` as a blocking error notification.
///
/// Returns `true` once the user dismissed it.
pub fn error_dialog(ctx: &egui::Context, message: &str, is_dark: bool) -> bool {
    let (bg_color, border_color) = dialog_colors(is_dark);
    let mut dismissed = ctx.input(|i| i.key_pressed(Key::Escape) || i.key_pressed(Key::Enter));

    backdrop(ctx, "error_backdrop", is_dark);
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("⚠")
                        .size(24.0)
                        .color(Color32::from_rgb(220, 160, 80)),
                );
                ui.label(message);
            });
            ui.separator();
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    dismissed
}
