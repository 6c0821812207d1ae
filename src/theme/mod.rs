//! Theme support for Folio
//!
//! A small palette per variant is turned into egui `Visuals` by
//! [`visuals::build_visuals`]. The [`ThemeManager`] decides which variant is
//! in effect and pushes it into the egui context.

pub mod manager;
pub mod visuals;

pub use manager::ThemeManager;

use eframe::egui::Color32;

/// Colors for one theme variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Panel and window fill
    pub background: Color32,
    /// Toolbars, status bar, inactive widgets
    pub background_secondary: Color32,
    /// Text edits and the area around pages
    pub canvas: Color32,
    pub border: Color32,
    pub border_subtle: Color32,
    pub hover: Color32,
    pub selected: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub link: Color32,
    pub accent: Color32,
    pub accent_hover: Color32,
    pub warning: Color32,
    pub error: Color32,
    /// Alpha of window and popup shadows
    pub shadow_alpha: u8,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            background_secondary: Color32::from_rgb(250, 250, 250),
            canvas: Color32::from_rgb(232, 232, 236),
            border: Color32::from_rgb(200, 200, 200),
            border_subtle: Color32::from_rgb(230, 230, 230),
            hover: Color32::from_rgb(240, 240, 240),
            selected: Color32::from_rgb(230, 240, 255),
            text: Color32::from_rgb(30, 30, 30),
            text_secondary: Color32::from_rgb(80, 80, 80),
            link: Color32::from_rgb(0, 100, 180),
            accent: Color32::from_rgb(0, 120, 212),
            accent_hover: Color32::from_rgb(0, 100, 180),
            warning: Color32::from_rgb(200, 130, 0),
            error: Color32::from_rgb(200, 40, 40),
            shadow_alpha: 25,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(30, 30, 30),
            background_secondary: Color32::from_rgb(37, 37, 37),
            canvas: Color32::from_rgb(22, 22, 24),
            border: Color32::from_rgb(60, 60, 60),
            border_subtle: Color32::from_rgb(50, 50, 50),
            hover: Color32::from_rgb(50, 50, 50),
            selected: Color32::from_rgb(40, 60, 80),
            text: Color32::from_rgb(220, 220, 220),
            text_secondary: Color32::from_rgb(180, 180, 180),
            link: Color32::from_rgb(100, 170, 255),
            accent: Color32::from_rgb(60, 140, 230),
            accent_hover: Color32::from_rgb(90, 160, 240),
            warning: Color32::from_rgb(230, 170, 60),
            error: Color32::from_rgb(240, 90, 90),
            shadow_alpha: 60,
        }
    }

    /// Dark palettes have dark backgrounds.
    pub fn is_dark(&self) -> bool {
        self.background.r() < 128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_darkness() {
        assert!(!Palette::light().is_dark());
        assert!(Palette::dark().is_dark());
    }

    #[test]
    fn test_text_contrasts_with_background() {
        for palette in [Palette::light(), Palette::dark()] {
            let diff = (palette.text.r() as i32 - palette.background.r() as i32).abs();
            assert!(diff > 150, "{:?}", palette);
        }
    }
}
