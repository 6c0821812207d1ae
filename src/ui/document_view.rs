//! Central area of a document window.
//!
//! Page rendering belongs to a real renderer; this view draws a page-sized
//! sheet scaled by the window's zoom with the document's details on it, or a
//! start page listing recent files when nothing is loaded.

use super::actions::WindowAction;
use super::status_bar::format_size;
use crate::session::DocumentWindow;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui, Vec2};
use std::path::PathBuf;

/// Page size at 100% zoom, in points (A4).
const PAGE_SIZE: Vec2 = Vec2::new(595.0, 842.0);

/// Render the document area and return any action it triggered.
pub fn document_view(
    ui: &mut Ui,
    window: &DocumentWindow,
    recent_files: &[PathBuf],
    is_dark: bool,
) -> Option<WindowAction> {
    match window.document() {
        Some(_) => {
            show_page(ui, window, is_dark);
            None
        }
        None => show_start_page(ui, recent_files),
    }
}

fn show_page(ui: &mut Ui, window: &DocumentWindow, is_dark: bool) {
    let Some(document) = window.document() else {
        return;
    };
    let scale = window.zoom_percent() as f32 / 100.0;
    let page_size = PAGE_SIZE * scale;
    let (page_fill, shadow) = if is_dark {
        (Color32::from_rgb(235, 235, 235), Color32::from_black_alpha(120))
    } else {
        (Color32::WHITE, Color32::from_black_alpha(50))
    };

    ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            let (rect, _response) = ui.allocate_exact_size(page_size, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect.translate(Vec2::splat(3.0)), 2.0, shadow);
            ui.painter().rect_filled(rect, 2.0, page_fill);

            let text_color = Color32::from_rgb(40, 40, 40);
            let mut cursor = rect.min + Vec2::new(48.0, 64.0) * scale;
            let mut line = |text: String, size: f32| {
                ui.painter().text(
                    cursor,
                    egui::Align2::LEFT_TOP,
                    text,
                    egui::FontId::proportional(size * scale),
                    text_color,
                );
                cursor.y += size * scale * 1.8;
            };

            line(window.window_title().to_string(), 22.0);
            line(window.state().display_title().to_string(), 14.0);
            line(format_size(document.size()), 12.0);
            ui.add_space(16.0);
        });
    });
}

fn show_start_page(ui: &mut Ui, recent_files: &[PathBuf]) -> Option<WindowAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.2);
        ui.heading(RichText::new("No document open").size(20.0));
        ui.add_space(8.0);
        if ui.button("Open a document…").clicked() {
            action = Some(WindowAction::Open);
        }
        ui.label(RichText::new("or press Ctrl+O").small().weak());

        if !recent_files.is_empty() {
            ui.add_space(24.0);
            ui.label(RichText::new("Recent Files").strong());
            ui.add_space(4.0);
            for path in recent_files {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                if ui
                    .link(name)
                    .on_hover_text(path.display().to_string())
                    .clicked()
                {
                    action = Some(WindowAction::OpenRecent(path.clone()));
                }
            }
        }
    });

    action
}
