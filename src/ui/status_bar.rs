//! Status bar shown at the bottom of a document window.

use crate::session::DocumentWindow;
use eframe::egui::{self, RichText, Ui};

/// Render the status bar for `window`.
pub fn status_bar(ui: &mut Ui, window: &DocumentWindow) {
    ui.horizontal(|ui| {
        let path_display = window
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "No file open".to_string());
        ui.label(RichText::new(path_display).small());

        if window.is_modified() {
            ui.label(RichText::new("● modified").small().weak());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(format!("{}%", window.zoom_percent())).small());
            if let Some(document) = window.document() {
                ui.separator();
                ui.label(RichText::new(format_size(document.size())).small().weak());
            }
        });
    });
}

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
