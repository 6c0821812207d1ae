//! Theme manager
//!
//! Tracks the theme preference and applies it to the egui context. All
//! viewports share the context's style, so applying once per frame covers
//! every window.

use eframe::egui::{Context, Visuals};
use log::{debug, info};

use super::{visuals::build_visuals, Palette};
use crate::config::Theme;

#[derive(Debug, Clone)]
pub struct ThemeManager {
    current_theme: Theme,
    /// Bumped on every change so viewports know to re-apply.
    generation: u64,
    /// Platform dark mode, if known.
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        info!("ThemeManager initialized with theme: {:?}", theme);
        Self {
            current_theme: theme,
            generation: 1,
            last_system_dark_mode: None,
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the theme. Takes effect the next time a context is applied.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            info!("Theme changed from {:?} to {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.generation += 1;
        }
    }

    /// Record the platform's dark mode, as reported by the windowing backend.
    pub fn set_system_dark_mode(&mut self, dark: Option<bool>) {
        if self.last_system_dark_mode != dark {
            debug!("System dark mode changed to: {:?}", dark);
            self.last_system_dark_mode = dark;
            if self.current_theme == Theme::System {
                self.generation += 1;
            }
        }
    }

    /// Apply the theme to `ctx` unless it already carries the current one.
    ///
    /// `applied` is the generation last applied to this context; it is
    /// updated in place. Returns `true` if visuals were changed.
    pub fn apply_to(&self, ctx: &Context, applied: &mut u64) -> bool {
        if *applied == self.generation {
            return false;
        }
        ctx.set_visuals(self.visuals());
        *applied = self.generation;
        true
    }

    /// Visuals for the effective theme.
    pub fn visuals(&self) -> Visuals {
        build_visuals(&self.palette())
    }

    pub fn palette(&self) -> Palette {
        if self.is_dark() {
            Palette::dark()
        } else {
            Palette::light()
        }
    }

    /// Whether the effective theme is dark. System follows the platform and
    /// falls back to light when the platform does not say.
    pub fn is_dark(&self) -> bool {
        match self.current_theme {
            Theme::Dark => true,
            Theme::Light => false,
            Theme::System => self.last_system_dark_mode.unwrap_or(false),
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_manager_new() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
    }

    #[test]
    fn test_set_same_theme_keeps_generation() {
        let mut manager = ThemeManager::new(Theme::Light);
        let generation = manager.generation;
        manager.set_theme(Theme::Light);
        assert_eq!(manager.generation, generation);
        manager.set_theme(Theme::Dark);
        assert_eq!(manager.generation, generation + 1);
    }

    #[test]
    fn test_apply_to_only_once_per_change() {
        let ctx = Context::default();
        let mut manager = ThemeManager::new(Theme::Dark);
        let mut applied = 0;

        assert!(manager.apply_to(&ctx, &mut applied));
        assert!(ctx.style().visuals.dark_mode);
        assert!(!manager.apply_to(&ctx, &mut applied));

        manager.set_theme(Theme::Light);
        assert!(manager.apply_to(&ctx, &mut applied));
        assert!(!ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_is_dark_explicit_themes() {
        assert!(ThemeManager::new(Theme::Dark).is_dark());
        assert!(!ThemeManager::new(Theme::Light).is_dark());
    }

    #[test]
    fn test_system_theme_follows_platform() {
        let mut manager = ThemeManager::new(Theme::System);
        assert!(!manager.is_dark());

        let generation = manager.generation;
        manager.set_system_dark_mode(Some(true));
        assert!(manager.is_dark());
        assert_eq!(manager.generation, generation + 1);
    }

    #[test]
    fn test_system_change_ignored_for_explicit_theme() {
        let mut manager = ThemeManager::new(Theme::Light);
        let generation = manager.generation;
        manager.set_system_dark_mode(Some(true));
        assert!(!manager.is_dark());
        assert_eq!(manager.generation, generation);
    }
}
