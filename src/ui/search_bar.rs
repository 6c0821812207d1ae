//! Search Bar Component for Folio
//!
//! The find overlay shown under the toolbar. It edits the window's
//! [`SearchOverlay`] in place and reports what the user asked for; the
//! window answers a submitted search with a message that is drawn on the
//! next frame.

use crate::session::SearchOverlay;
use eframe::egui::{self, Color32, Key, RichText, Ui, Vec2};

/// What the user did in the search bar this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBarOutput {
    /// Search submitted; `Some(true)` searches forward
    pub submitted: Option<bool>,
    /// The close button was clicked
    pub close_requested: bool,
}

/// Render the search bar for `overlay`.
pub fn search_bar(ui: &mut Ui, overlay: &mut SearchOverlay, is_dark: bool) -> SearchBarOutput {
    let mut output = SearchBarOutput::default();

    let muted_color = if is_dark {
        Color32::from_rgb(140, 140, 140)
    } else {
        Color32::from_rgb(120, 120, 120)
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new("🔍").size(14.0));

        let search_id = egui::Id::new("folio_search_input");
        let response = ui.add_sized(
            Vec2::new(260.0, 22.0),
            egui::TextEdit::singleline(&mut overlay.query)
                .id(search_id)
                .hint_text("Find in document…")
                .font(egui::FontId::proportional(13.0)),
        );
        if overlay.focus_input {
            response.request_focus();
            overlay.focus_input = false;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            let backward = ui.input(|i| i.modifiers.shift);
            output.submitted = Some(!backward);
            response.request_focus();
        }

        if ui
            .button("▲")
            .on_hover_text("Previous match (Shift+F3)")
            .clicked()
        {
            output.submitted = Some(false);
        }
        if ui.button("▼").on_hover_text("Next match (F3)").clicked() {
            output.submitted = Some(true);
        }

        ui.checkbox(&mut overlay.case_sensitive, "Match case");

        if let Some(message) = &overlay.message {
            ui.label(RichText::new(message).size(12.0).color(muted_color));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add(egui::Button::new(RichText::new("×").size(16.0).color(muted_color)).frame(false))
                .on_hover_text("Close (Escape)")
                .clicked()
            {
                output.close_requested = true;
            }
        });
    });

    output
}
